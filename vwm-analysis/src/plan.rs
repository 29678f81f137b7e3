//! Which trials feed which cell of a scope.
//!
//! No-change trials have no side, so the left and right scopes draw their
//! false alarms and correct rejections from the same no-change trials, and the
//! whole-field scope draws from an identical pool of its own. The hemifield
//! false-alarm RTs and the hemifield no-change counterbalancing check use the
//! wider "nothing changed on this side" pool instead.

use serde::{Deserialize, Serialize};
use vwm_core::{Hemifield, Scope, TrialRecord};

/// Trial subset selected by the change columns
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPool {
    /// Change on this side (`ChangeCond` equals the side code)
    Side(Hemifield),
    /// No change on this side (`ChangeCond` differs from the side code)
    OffSide(Hemifield),
    /// `ChangeTrial == 1`
    AnyChange,
    /// `ChangeTrial == 0`
    NoChange,
}

impl TrialPool {
    pub fn contains(&self, record: &TrialRecord) -> bool {
        match self {
            TrialPool::Side(side) => record.change_hemifield == Some(*side),
            TrialPool::OffSide(side) => record.change_hemifield != Some(*side),
            TrialPool::AnyChange => record.is_change(),
            TrialPool::NoChange => record.is_no_change(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopePlan {
    pub scope: Scope,
    /// Hits and misses
    pub change: TrialPool,
    /// False alarms and correct rejections
    pub false_alarms: TrialPool,
    pub false_alarm_rt: TrialPool,
    /// Pool checked against the no-change expectation on full sessions
    pub balance_pool: TrialPool,
}

impl ScopePlan {
    pub fn standard(scope: Scope) -> Self {
        match scope {
            Scope::Left => Self::hemifield(Hemifield::Left),
            Scope::Right => Self::hemifield(Hemifield::Right),
            Scope::Whole => Self {
                scope,
                change: TrialPool::AnyChange,
                false_alarms: TrialPool::NoChange,
                false_alarm_rt: TrialPool::NoChange,
                balance_pool: TrialPool::NoChange,
            },
        }
    }

    fn hemifield(side: Hemifield) -> Self {
        Self {
            scope: match side {
                Hemifield::Left => Scope::Left,
                Hemifield::Right => Scope::Right,
            },
            change: TrialPool::Side(side),
            // shared with the other hemifield
            false_alarms: TrialPool::NoChange,
            false_alarm_rt: TrialPool::OffSide(side),
            balance_pool: TrialPool::OffSide(side),
        }
    }
}

/// Scopes analyzed for every condition, in output order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellPlan {
    pub scopes: Vec<ScopePlan>,
}

impl Default for CellPlan {
    fn default() -> Self {
        Self {
            scopes: Scope::ALL.iter().map(|&s| ScopePlan::standard(s)).collect(),
        }
    }
}
