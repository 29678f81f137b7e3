use crate::plan::CellPlan;
use serde::{Deserialize, Serialize};
use vwm_core::{Design, Scope};

/// Trial counts a correctly generated session must show per condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancePlan {
    /// Change trials per hemifield and condition
    pub change_trials_per_side: usize,
}

impl Default for BalancePlan {
    fn default() -> Self {
        Self {
            change_trials_per_side: 16,
        }
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceCheck {
    Change,
    NoChange,
}

impl std::fmt::Display for BalanceCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BalanceCheck::Change => "change",
            BalanceCheck::NoChange => "no-change",
        })
    }
}

impl BalancePlan {
    /// Half of every condition block changes (split over both sides), half does not.
    pub fn trials_per_condition(&self) -> usize {
        self.change_trials_per_side * 4
    }

    pub fn session_trials(&self, design: &Design) -> usize {
        design.len() * self.trials_per_condition()
    }

    pub fn expected(&self, scope: Scope, check: BalanceCheck) -> usize {
        let n = self.change_trials_per_side;
        match (scope.is_hemifield(), check) {
            (true, BalanceCheck::Change) => n,
            (true, BalanceCheck::NoChange) => 3 * n,
            (false, BalanceCheck::Change) => 2 * n,
            (false, BalanceCheck::NoChange) => 2 * n,
        }
    }
}

/// Everything the analyzer needs besides the trial table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub design: Design,
    pub plan: CellPlan,
    pub balance: BalancePlan,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            design: Design::default(),
            plan: CellPlan::default(),
            balance: BalancePlan::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_expectations() {
        let balance = BalancePlan::default();
        assert_eq!(384, balance.session_trials(&Design::default()));
        assert_eq!(16, balance.expected(Scope::Left, BalanceCheck::Change));
        assert_eq!(48, balance.expected(Scope::Right, BalanceCheck::NoChange));
        assert_eq!(32, balance.expected(Scope::Whole, BalanceCheck::Change));
        assert_eq!(32, balance.expected(Scope::Whole, BalanceCheck::NoChange));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{"balance": {"change_trials_per_side": 8}}"#)
            .unwrap();
        assert_eq!(8, config.balance.change_trials_per_side);
        assert_eq!(Design::default(), config.design);
        assert_eq!(3, config.plan.scopes.len());
    }

    #[test]
    fn alternate_design_from_json() {
        let config = AnalysisConfig::from_json(
            r#"{"design": {"conditions": [
                {"key": "small", "code": 1, "target_count": 2, "distractor_count": 0},
                {"key": "large", "code": 2, "target_count": 6, "distractor_count": 0}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(2, config.design.len());
        assert_eq!(128, config.balance.session_trials(&config.design));
    }
}
