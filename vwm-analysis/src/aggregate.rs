use crate::config::{AnalysisConfig, BalanceCheck};
use crate::error::AnalysisError;
use crate::plan::ScopePlan;
use crate::result::{AnalysisResult, ConditionResult, EmptyScopeWarning, RtKind, ScopeResult};
use crate::selector::{Mask, select_count, select_median_rt};
use tracing::{debug, info, warn};
use vwm_core::{ConditionDescriptor, RawTrialRow, SessionId, TableError, TrialRecord, parse_table};
use vwm_metrics::{Counts, RateError, pashler_k, signal_detection};

/// Turns one session's trial table into per-condition, per-scope metrics
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub config: AnalysisConfig,
}

/// Masks of one scope plan, built once per session
struct ScopeMasks<'a> {
    plan: &'a ScopePlan,
    change: Mask,
    false_alarms: Mask,
    false_alarm_rt: Mask,
    balance_pool: Mask,
}

struct ResponseMasks {
    hit_press: Mask,
    reject_press: Mask,
    any_press: Mask,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze_rows<I>(
        &self,
        session: &SessionId,
        rows: I,
    ) -> Result<AnalysisResult, AnalysisError>
    where
        I: IntoIterator<Item = RawTrialRow>,
    {
        let records = parse_table(rows).map_err(|source| AnalysisError::MissingData {
            session: session.clone(),
            source,
        })?;
        self.analyze(session, &records)
    }

    /// Aggregates the whole session or fails; no partial results.
    pub fn analyze(
        &self,
        session: &SessionId,
        records: &[TrialRecord],
    ) -> Result<AnalysisResult, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::MissingData {
                session: session.clone(),
                source: TableError::Empty,
            });
        }

        let design = &self.config.design;
        let full_session = self.config.balance.session_trials(design);
        let check_balance = records.len() == full_session;
        if !check_balance {
            debug!(
                %session,
                trials = records.len(),
                expected = full_session,
                "partial session, skipping counterbalancing checks"
            );
        }

        let responses = ResponseMasks {
            hit_press: Mask::from_fn(records, |r| r.is_hit_press()),
            reject_press: Mask::from_fn(records, |r| r.is_reject_press()),
            any_press: Mask::from_fn(records, |r| r.response.is_some()),
        };
        let scopes: Vec<ScopeMasks> = self
            .config
            .plan
            .scopes
            .iter()
            .map(|plan| ScopeMasks {
                plan,
                change: Mask::from_fn(records, |r| plan.change.contains(r)),
                false_alarms: Mask::from_fn(records, |r| plan.false_alarms.contains(r)),
                false_alarm_rt: Mask::from_fn(records, |r| plan.false_alarm_rt.contains(r)),
                balance_pool: Mask::from_fn(records, |r| plan.balance_pool.contains(r)),
            })
            .collect();

        let mut conditions = Vec::with_capacity(design.len());
        let mut warnings = Vec::new();
        for descriptor in &design.conditions {
            let in_condition = Mask::from_fn(records, |r| descriptor.matches(r));

            let tallies: Vec<Counts> = scopes
                .iter()
                .map(|masks| tally(&responses, masks, &in_condition))
                .collect();

            if check_balance {
                for masks in &scopes {
                    self.verify_balance(session, descriptor, &responses, masks, &in_condition)?;
                }
            }

            let mut cells = Vec::with_capacity(scopes.len());
            for (masks, counts) in scopes.iter().zip(tallies) {
                let scope = masks.plan.scope;
                let hit_rt =
                    select_median_rt(records, &responses.hit_press, &masks.change, &in_condition);
                let false_alarm_rt = select_median_rt(
                    records,
                    &responses.hit_press,
                    &masks.false_alarm_rt,
                    &in_condition,
                );
                for (rt, kind) in [(hit_rt, RtKind::Hit), (false_alarm_rt, RtKind::FalseAlarm)] {
                    if rt.is_none() {
                        let warning = EmptyScopeWarning {
                            condition: descriptor.key.clone(),
                            scope,
                            kind,
                        };
                        warn!(%session, "{warning}");
                        warnings.push(warning);
                    }
                }

                let degenerate = |source: RateError| AnalysisError::DegenerateRate {
                    session: session.clone(),
                    condition: descriptor.key.clone(),
                    scope,
                    source,
                };
                let capacity = pashler_k(counts, descriptor.set_size(scope)).map_err(degenerate)?;
                let sdt = signal_detection(counts).map_err(degenerate)?;

                debug!(
                    %session,
                    condition = %descriptor.key,
                    %scope,
                    hits = counts.hits,
                    misses = counts.misses,
                    false_alarms = counts.false_alarms,
                    correct_rejections = counts.correct_rejections,
                    k = capacity.k,
                    d_prime = sdt.d_prime,
                    "cell"
                );

                cells.push(ScopeResult {
                    scope,
                    counts,
                    hit_rate: capacity.hit_rate,
                    false_alarm_rate: capacity.false_alarm_rate,
                    d_prime: sdt.d_prime,
                    criterion: sdt.criterion,
                    k: capacity.k,
                    hit_rt,
                    false_alarm_rt,
                });
            }

            conditions.push(ConditionResult {
                key: descriptor.key.clone(),
                scopes: cells,
            });
        }

        info!(
            %session,
            trials = records.len(),
            conditions = conditions.len(),
            empty_rt_cells = warnings.len(),
            "session analyzed"
        );
        Ok(AnalysisResult {
            session: session.clone(),
            conditions,
            warnings,
        })
    }

    fn verify_balance(
        &self,
        session: &SessionId,
        descriptor: &ConditionDescriptor,
        responses: &ResponseMasks,
        masks: &ScopeMasks,
        in_condition: &Mask,
    ) -> Result<(), AnalysisError> {
        let scope = masks.plan.scope;
        let checks = [
            (BalanceCheck::Change, &masks.change),
            (BalanceCheck::NoChange, &masks.balance_pool),
        ];
        for (check, pool) in checks {
            let expected = self.config.balance.expected(scope, check);
            let actual = select_count(&responses.any_press, pool, in_condition);
            if actual != expected {
                return Err(AnalysisError::CounterbalancingViolation {
                    session: session.clone(),
                    condition: descriptor.key.clone(),
                    scope,
                    check,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

fn tally(responses: &ResponseMasks, masks: &ScopeMasks, in_condition: &Mask) -> Counts {
    let count = |response: &Mask, pool: &Mask| select_count(response, pool, in_condition) as u32;
    Counts {
        hits: count(&responses.hit_press, &masks.change),
        misses: count(&responses.reject_press, &masks.change),
        false_alarms: count(&responses.hit_press, &masks.false_alarms),
        correct_rejections: count(&responses.reject_press, &masks.false_alarms),
    }
}
