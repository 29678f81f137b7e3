use vwm_core::TrialRecord;
use vwm_metrics::median;

/// Boolean mask over a trial table, aligned by record index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_fn<F>(records: &[TrialRecord], predicate: F) -> Self
    where
        F: Fn(&TrialRecord) -> bool,
    {
        Self {
            bits: records.iter().map(predicate).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Element-wise AND.
    ///
    /// # Panics
    ///
    /// If the masks have different lengths, i.e. were built from different
    /// trial tables.
    pub fn and(&self, other: &Mask) -> Mask {
        assert_eq!(
            self.len(),
            other.len(),
            "masks must be built from the same trial table"
        );
        Mask {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(a, b)| *a && *b)
                .collect(),
        }
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| i)
    }
}

/// Number of records selected by all three masks.
///
/// # Panics
///
/// If the masks were not all built from the same trial table.
pub fn select_count(response: &Mask, change: &Mask, condition: &Mask) -> usize {
    response.and(change).and(condition).count()
}

/// Median reaction time of the records selected by all three masks; `None`
/// when no selected record has a reaction time.
///
/// # Panics
///
/// If the masks were not all built from `records`.
pub fn select_median_rt(
    records: &[TrialRecord],
    response: &Mask,
    change: &Mask,
    condition: &Mask,
) -> Option<f64> {
    let selected = response.and(change).and(condition);
    assert_eq!(records.len(), selected.len(), "mask does not fit trial table");
    median(
        selected
            .indices()
            .filter_map(|i| records[i].reaction_time),
    )
}
