use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use vwm_core::{ConditionKey, Scope, SessionId};
use vwm_metrics::Counts;

/// Metrics of one (condition, scope) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeResult {
    pub scope: Scope,
    pub counts: Counts,
    /// Uncorrected
    pub hit_rate: f64,
    /// Uncorrected
    pub false_alarm_rate: f64,
    pub d_prime: f64,
    pub criterion: f64,
    pub k: f64,
    pub hit_rt: Option<f64>,
    pub false_alarm_rt: Option<f64>,
}

impl ScopeResult {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Hits => Some(self.counts.hits as f64),
            Metric::Misses => Some(self.counts.misses as f64),
            Metric::FalseAlarms => Some(self.counts.false_alarms as f64),
            Metric::CorrectRejections => Some(self.counts.correct_rejections as f64),
            Metric::HitRate => Some(self.hit_rate),
            Metric::FalseAlarmRate => Some(self.false_alarm_rate),
            Metric::HitRt => self.hit_rt,
            Metric::FalseAlarmRt => self.false_alarm_rt,
            Metric::K => Some(self.k),
            Metric::DPrime => Some(self.d_prime),
            Metric::Criterion => Some(self.criterion),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub key: ConditionKey,
    pub scopes: Vec<ScopeResult>,
}

impl ConditionResult {
    pub fn scope(&self, scope: Scope) -> Option<&ScopeResult> {
        self.scopes.iter().find(|s| s.scope == scope)
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RtKind {
    Hit,
    FalseAlarm,
}

/// A cell whose median RT has no trials to draw on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyScopeWarning {
    pub condition: ConditionKey,
    pub scope: Scope,
    pub kind: RtKind,
}

impl std::fmt::Display for EmptyScopeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            RtKind::Hit => "hit",
            RtKind::FalseAlarm => "false-alarm",
        };
        write!(
            f,
            "condition {}: no {} trials with a reaction time in the {} field",
            self.condition, kind, self.scope
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub session: SessionId,
    pub conditions: Vec<ConditionResult>,
    pub warnings: Vec<EmptyScopeWarning>,
}

impl AnalysisResult {
    pub fn cell(&self, key: &ConditionKey, scope: Scope) -> Option<&ScopeResult> {
        self.conditions
            .iter()
            .find(|c| &c.key == key)
            .and_then(|c| c.scope(scope))
    }

    /// Metric-name → condition → value view (`lHits`, `rHRs`, `wKs`, ...)
    pub fn metric_table(&self) -> MetricTable {
        let mut scopes: Vec<Scope> = Vec::new();
        for condition in &self.conditions {
            for cell in &condition.scopes {
                if !scopes.contains(&cell.scope) {
                    scopes.push(cell.scope);
                }
            }
        }

        let mut columns = Vec::with_capacity(Metric::ALL.len() * scopes.len());
        for metric in Metric::ALL {
            for &scope in &scopes {
                let values = self
                    .conditions
                    .iter()
                    .map(|c| (c.key.clone(), c.scope(scope).and_then(|s| s.value(metric))))
                    .collect();
                columns.push(MetricColumn {
                    name: metric.name(scope),
                    values,
                });
            }
        }
        MetricTable { columns }
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    Hits,
    Misses,
    FalseAlarms,
    CorrectRejections,
    HitRate,
    FalseAlarmRate,
    HitRt,
    FalseAlarmRt,
    K,
    DPrime,
    Criterion,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Hits,
        Metric::Misses,
        Metric::FalseAlarms,
        Metric::CorrectRejections,
        Metric::HitRate,
        Metric::FalseAlarmRate,
        Metric::HitRt,
        Metric::FalseAlarmRt,
        Metric::K,
        Metric::DPrime,
        Metric::Criterion,
    ];

    fn suffix(&self) -> &'static str {
        match self {
            Metric::Hits => "Hits",
            Metric::Misses => "Misses",
            Metric::FalseAlarms => "FAs",
            Metric::CorrectRejections => "CRs",
            Metric::HitRate => "HRs",
            Metric::FalseAlarmRate => "faRates",
            Metric::HitRt => "HitRTs",
            Metric::FalseAlarmRt => "FaRTs",
            Metric::K => "Ks",
            Metric::DPrime => "dPs",
            Metric::Criterion => "Crits",
        }
    }

    pub fn name(&self, scope: Scope) -> String {
        format!("{}{}", scope.prefix(), self.suffix())
    }
}

/// One metric across conditions, in design order
#[derive(Debug, Clone, PartialEq)]
pub struct MetricColumn {
    pub name: String,
    pub values: Vec<(ConditionKey, Option<f64>)>,
}

impl MetricColumn {
    pub fn get(&self, key: &ConditionKey) -> Option<f64> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| *v)
    }
}

impl Serialize for MetricColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub columns: Vec<MetricColumn>,
}

impl MetricTable {
    pub fn column(&self, name: &str) -> Option<&MetricColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

impl Serialize for MetricTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, column)?;
        }
        map.end()
    }
}
