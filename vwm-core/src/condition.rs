use crate::scope::Scope;
use crate::trial::TrialRecord;
use serde::{Deserialize, Serialize};

/// Label of a task condition, e.g. `t1d0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionKey(pub String);

impl ConditionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConditionKey {
    fn from(key: &str) -> Self {
        ConditionKey(key.to_string())
    }
}

impl std::fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task condition: which `Cond` code selects it and how many items it shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDescriptor {
    pub key: ConditionKey,
    pub code: u8,
    pub target_count: u32,
    pub distractor_count: u32,
}

impl ConditionDescriptor {
    pub fn matches(&self, record: &TrialRecord) -> bool {
        record.condition == Some(self.code)
    }

    pub fn total_items(&self) -> u32 {
        self.target_count + self.distractor_count
    }

    /// Items on display within `scope`, used as the `S` of Pashler's K.
    ///
    /// Each hemifield gets half the display: the presentation places half of
    /// every target and distractor set on each side of fixation, so a
    /// hemifield-specific K is bounded by what that side showed. This makes
    /// `lKs`/`rKs` half of what a whole-display `S` would give for the same
    /// rates.
    pub fn set_size(&self, scope: Scope) -> f64 {
        let total = self.total_items() as f64;
        if scope.is_hemifield() {
            total / 2.0
        } else {
            total
        }
    }
}

/// Ordered list of the conditions a session is analyzed over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub conditions: Vec<ConditionDescriptor>,
}

impl Design {
    /// Crosses target set sizes with distractor set sizes, targets outermost.
    /// Codes run from 1; keys are `t<target index from 1>d<distractor index from 0>`.
    pub fn from_sets(targets: &[u32], distractors: &[u32]) -> Self {
        let mut conditions = Vec::with_capacity(targets.len() * distractors.len());
        for (ti, &target_count) in targets.iter().enumerate() {
            for (di, &distractor_count) in distractors.iter().enumerate() {
                conditions.push(ConditionDescriptor {
                    key: ConditionKey(format!("t{}d{}", ti + 1, di)),
                    code: (conditions.len() + 1) as u8,
                    target_count,
                    distractor_count,
                });
            }
        }
        Self { conditions }
    }

    pub fn get(&self, key: &ConditionKey) -> Option<&ConditionDescriptor> {
        self.conditions.iter().find(|c| &c.key == key)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for Design {
    fn default() -> Self {
        Design::from_sets(&[2, 4], &[0, 2, 4])
    }
}
