//! Counterbalanced sessions with scripted responses, for tests and benches.

use crate::config::{AnalysisConfig, BalancePlan};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use vwm_core::{Design, Hemifield, ResponseKey, TrialRecord};

/// How the simulated subject answers
#[derive(Debug, Clone, PartialEq)]
pub enum Responder {
    /// Every change detected, no false alarms
    Perfect,
    /// Per condition: this many misses on each side and this many false alarms
    Exact {
        misses_per_side: usize,
        false_alarms: usize,
    },
    /// Independent draws per trial
    Random {
        hit_rate: f64,
        false_alarm_rate: f64,
    },
}

#[derive(Debug, Clone)]
pub struct SessionBuilder {
    design: Design,
    balance: BalancePlan,
    responder: Responder,
    seed: u64,
    shuffle: bool,
}

impl SessionBuilder {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            design: config.design.clone(),
            balance: config.balance.clone(),
            responder: Responder::Perfect,
            seed: 0,
            shuffle: true,
        }
    }

    pub fn responder(mut self, responder: Responder) -> Self {
        self.responder = responder;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep trials grouped by condition instead of interleaving them
    pub fn ordered(mut self) -> Self {
        self.shuffle = false;
        self
    }

    pub fn build(&self) -> Vec<TrialRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.balance.change_trials_per_side;
        let mut records = Vec::with_capacity(self.balance.session_trials(&self.design));

        for condition in &self.design.conditions {
            for side in [Hemifield::Left, Hemifield::Right] {
                for i in 0..n {
                    let detected = match &self.responder {
                        Responder::Perfect => true,
                        Responder::Exact {
                            misses_per_side, ..
                        } => i >= *misses_per_side,
                        Responder::Random { hit_rate, .. } => rng.random_bool(*hit_rate),
                    };
                    records.push(TrialRecord {
                        response: Some(press(detected)),
                        change_trial: Some(true),
                        change_hemifield: Some(side),
                        condition: Some(condition.code),
                        reaction_time: Some(rng.random_range(0.3..1.2)),
                    });
                }
            }
            for i in 0..2 * n {
                let alarmed = match &self.responder {
                    Responder::Perfect => false,
                    Responder::Exact { false_alarms, .. } => i < *false_alarms,
                    Responder::Random {
                        false_alarm_rate, ..
                    } => rng.random_bool(*false_alarm_rate),
                };
                records.push(TrialRecord {
                    response: Some(press(alarmed)),
                    change_trial: Some(false),
                    change_hemifield: None,
                    condition: Some(condition.code),
                    reaction_time: Some(rng.random_range(0.3..1.2)),
                });
            }
        }

        if self.shuffle {
            records.shuffle(&mut rng);
        }
        records
    }
}

fn press(change_reported: bool) -> ResponseKey {
    if change_reported {
        ResponseKey::HitPress
    } else {
        ResponseKey::RejectPress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_full_and_balanced() {
        let records = SessionBuilder::new(&AnalysisConfig::default()).build();
        assert_eq!(384, records.len());
        for code in 1..=6u8 {
            let block: Vec<&TrialRecord> = records.iter().filter(|r| r.condition == Some(code)).collect();
            assert_eq!(64, block.len());
            let left = block
                .iter()
                .filter(|r| r.change_hemifield == Some(Hemifield::Left))
                .count();
            let unchanged = block.iter().filter(|r| r.is_no_change()).count();
            assert_eq!(16, left);
            assert_eq!(32, unchanged);
        }
    }

    #[test]
    fn same_seed_same_session() {
        let config = AnalysisConfig::default();
        let responder = Responder::Random {
            hit_rate: 0.8,
            false_alarm_rate: 0.2,
        };
        let a = SessionBuilder::new(&config)
            .responder(responder.clone())
            .seed(7)
            .build();
        let b = SessionBuilder::new(&config).responder(responder).seed(7).build();
        assert_eq!(a, b);
    }

    #[test]
    fn exact_responder_scripts_errors() {
        let records = SessionBuilder::new(&AnalysisConfig::default())
            .responder(Responder::Exact {
                misses_per_side: 2,
                false_alarms: 5,
            })
            .ordered()
            .build();
        let block = &records[..64];
        let misses = block
            .iter()
            .filter(|r| r.is_change() && r.is_reject_press())
            .count();
        let false_alarms = block
            .iter()
            .filter(|r| r.is_no_change() && r.is_hit_press())
            .count();
        assert_eq!(4, misses);
        assert_eq!(5, false_alarms);
    }
}
