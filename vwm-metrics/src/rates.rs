use crate::probit::probit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome tallies of one cell
#[derive(Copy, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub hits: u32,
    pub misses: u32,
    pub false_alarms: u32,
    pub correct_rejections: u32,
}

impl Counts {
    pub fn new(hits: u32, misses: u32, false_alarms: u32, correct_rejections: u32) -> Self {
        Self {
            hits,
            misses,
            false_alarms,
            correct_rejections,
        }
    }

    pub fn change_trials(&self) -> u32 {
        self.hits + self.misses
    }

    pub fn no_change_trials(&self) -> u32 {
        self.false_alarms + self.correct_rejections
    }

    /// Signal and noise swapped: hits/misses take the place of false
    /// alarms/correct rejections and vice versa.
    pub fn swapped(&self) -> Self {
        Self {
            hits: self.false_alarms,
            misses: self.correct_rejections,
            false_alarms: self.hits,
            correct_rejections: self.misses,
        }
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTerm {
    HitRate,
    FalseAlarmRate,
    /// The `1 - F` denominator of Pashler's K
    Capacity,
}

impl std::fmt::Display for RateTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RateTerm::HitRate => "hit rate",
            RateTerm::FalseAlarmRate => "false-alarm rate",
            RateTerm::Capacity => "capacity",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    #[error("{term} has a zero denominator ({counts:?})")]
    ZeroDenominator { term: RateTerm, counts: Counts },
}

#[derive(Copy, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub k: f64,
    pub hit_rate: f64,
    pub false_alarm_rate: f64,
}

/// Pashler's K: `floor(S) * (H - F) / (1 - F)` on uncorrected rates.
pub fn pashler_k(counts: Counts, set_size: f64) -> Result<Capacity, RateError> {
    let zero = |term| RateError::ZeroDenominator { term, counts };

    if counts.change_trials() == 0 {
        return Err(zero(RateTerm::HitRate));
    }
    if counts.no_change_trials() == 0 {
        return Err(zero(RateTerm::FalseAlarmRate));
    }
    let hit_rate = counts.hits as f64 / counts.change_trials() as f64;
    let false_alarm_rate = counts.false_alarms as f64 / counts.no_change_trials() as f64;
    if counts.correct_rejections == 0 {
        return Err(zero(RateTerm::Capacity));
    }

    let k = set_size.trunc() * (hit_rate - false_alarm_rate) / (1.0 - false_alarm_rate);
    Ok(Capacity {
        k,
        hit_rate,
        false_alarm_rate,
    })
}

#[derive(Copy, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetection {
    pub d_prime: f64,
    pub criterion: f64,
    /// Rates after extreme-value correction, as fed to the z-transform
    pub hit_rate: f64,
    pub false_alarm_rate: f64,
}

/// d' and criterion c, with 0% and 100% rates pulled in by half a trial.
pub fn signal_detection(counts: Counts) -> Result<SignalDetection, RateError> {
    let false_alarm_rate = corrected_false_alarm_rate(counts)?;
    let hit_rate = corrected_hit_rate(counts)?;

    let z_hit = probit(hit_rate);
    let z_fa = probit(false_alarm_rate);
    Ok(SignalDetection {
        d_prime: z_hit - z_fa,
        criterion: -0.5 * (z_hit + z_fa),
        hit_rate,
        false_alarm_rate,
    })
}

fn corrected_false_alarm_rate(counts: Counts) -> Result<f64, RateError> {
    let fa = counts.false_alarms as f64;
    let cr = counts.correct_rejections as f64;
    match (counts.false_alarms, counts.correct_rejections) {
        (0, 0) => Err(RateError::ZeroDenominator {
            term: RateTerm::FalseAlarmRate,
            counts,
        }),
        (0, _) => Ok(1.0 / (2.0 * cr)),
        (_, 0) => Ok(1.0 - 1.0 / (2.0 * fa)),
        _ => Ok(fa / (fa + cr)),
    }
}

fn corrected_hit_rate(counts: Counts) -> Result<f64, RateError> {
    let hits = counts.hits as f64;
    let misses = counts.misses as f64;
    match (counts.hits, counts.misses) {
        (0, 0) => Err(RateError::ZeroDenominator {
            term: RateTerm::HitRate,
            counts,
        }),
        (_, 0) => Ok(1.0 - 1.0 / (2.0 * hits)),
        (0, _) => Ok(1.0 / (2.0 * misses)),
        _ => Ok(hits / (hits + misses)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncorrected_rates_for_capacity() {
        let capacity = pashler_k(Counts::new(12, 4, 8, 24), 4.0).unwrap();
        assert_eq!(0.75, capacity.hit_rate);
        assert_eq!(0.25, capacity.false_alarm_rate);
        assert!((capacity.k - 4.0 * 0.5 / 0.75).abs() < 1e-12);
    }

    #[test]
    fn capacity_truncates_set_size() {
        let whole = pashler_k(Counts::new(16, 0, 0, 32), 3.0).unwrap();
        let fractional = pashler_k(Counts::new(16, 0, 0, 32), 3.9).unwrap();
        assert_eq!(whole.k, fractional.k);
        assert_eq!(3.0, whole.k);
    }

    #[test]
    fn capacity_is_zero_at_chance() {
        let capacity = pashler_k(Counts::new(8, 8, 16, 16), 6.0).unwrap();
        assert_eq!(0.0, capacity.k);
    }

    #[test]
    fn capacity_rejects_empty_pairs() {
        assert_eq!(
            Err(RateError::ZeroDenominator {
                term: RateTerm::HitRate,
                counts: Counts::new(0, 0, 3, 5)
            }),
            pashler_k(Counts::new(0, 0, 3, 5), 4.0)
        );
        assert!(matches!(
            pashler_k(Counts::new(3, 5, 0, 0), 4.0),
            Err(RateError::ZeroDenominator {
                term: RateTerm::FalseAlarmRate,
                ..
            })
        ));
        assert!(matches!(
            pashler_k(Counts::new(3, 5, 4, 0), 4.0),
            Err(RateError::ZeroDenominator {
                term: RateTerm::Capacity,
                ..
            })
        ));
    }

    #[test]
    fn corrects_zero_false_alarms() {
        let sdt = signal_detection(Counts::new(4, 4, 0, 5)).unwrap();
        assert_eq!(0.1, sdt.false_alarm_rate);
        assert_eq!(0.5, sdt.hit_rate);
    }

    #[test]
    fn corrects_zero_hits_and_full_rates() {
        let sdt = signal_detection(Counts::new(0, 3, 2, 2)).unwrap();
        assert_eq!(1.0 / 6.0, sdt.hit_rate);

        let sdt = signal_detection(Counts::new(16, 0, 4, 0)).unwrap();
        assert_eq!(1.0 - 1.0 / 32.0, sdt.hit_rate);
        assert_eq!(1.0 - 1.0 / 8.0, sdt.false_alarm_rate);
    }

    #[test]
    fn d_prime_and_criterion() {
        let sdt = signal_detection(Counts::new(30, 10, 10, 30)).unwrap();
        let z = 0.6744897501960817;
        assert!((sdt.d_prime - 2.0 * z).abs() < 1e-7);
        assert!(sdt.criterion.abs() < 1e-9);

        let liberal = signal_detection(Counts::new(36, 4, 20, 20)).unwrap();
        assert!(liberal.criterion < 0.0);
    }

    #[test]
    fn degenerate_pairs_are_errors() {
        assert!(matches!(
            signal_detection(Counts::new(5, 5, 0, 0)),
            Err(RateError::ZeroDenominator {
                term: RateTerm::FalseAlarmRate,
                ..
            })
        ));
        assert!(matches!(
            signal_detection(Counts::new(0, 0, 5, 5)),
            Err(RateError::ZeroDenominator {
                term: RateTerm::HitRate,
                ..
            })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn non_degenerate() -> impl Strategy<Value = Counts> {
        (0u32..64, 0u32..64, 0u32..64, 0u32..64)
            .prop_filter("both pairs need a trial", |(h, m, f, c)| {
                h + m > 0 && f + c > 0
            })
            .prop_map(|(h, m, f, c)| Counts::new(h, m, f, c))
    }

    proptest! {
        #[test]
        fn d_prime_flips_sign_when_signal_and_noise_swap(counts in non_degenerate()) {
            let forward = signal_detection(counts).unwrap();
            let backward = signal_detection(counts.swapped()).unwrap();
            prop_assert_eq!(forward.d_prime, -backward.d_prime);
        }

        #[test]
        fn corrected_rates_stay_inside_the_unit_interval(counts in non_degenerate()) {
            let sdt = signal_detection(counts).unwrap();
            prop_assert!(sdt.hit_rate > 0.0 && sdt.hit_rate < 1.0);
            prop_assert!(sdt.false_alarm_rate > 0.0 && sdt.false_alarm_rate < 1.0);
            prop_assert!(sdt.d_prime.is_finite());
            prop_assert!(sdt.criterion.is_finite());
        }

        #[test]
        fn capacity_hit_rate_is_uncorrected(hits in 0u32..64, misses in 0u32..64) {
            prop_assume!(hits + misses > 0);
            let capacity = pashler_k(Counts::new(hits, misses, 3, 13), 4.0).unwrap();
            prop_assert_eq!(hits as f64 / (hits + misses) as f64, capacity.hit_rate);
        }

        #[test]
        fn capacity_grows_with_hit_rate(
            change_trials in 1u32..64,
            fa in 0u32..32,
            cr in 1u32..32,
            set_size in 1u32..9,
        ) {
            let mut previous = f64::NEG_INFINITY;
            for hits in 0..=change_trials {
                let counts = Counts::new(hits, change_trials - hits, fa, cr);
                let capacity = pashler_k(counts, set_size as f64).unwrap();
                prop_assert!(capacity.k > previous);
                previous = capacity.k;
            }
        }

        #[test]
        fn capacity_vanishes_when_rates_match(n in 1u32..32, scale in 1u32..4, set_size in 1u32..9) {
            // same proportion on both sides, F < 1
            let counts = Counts::new(n, n, n * scale, n * scale);
            let capacity = pashler_k(counts, set_size as f64).unwrap();
            prop_assert_eq!(0.0, capacity.k);
        }
    }
}
