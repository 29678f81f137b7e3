pub mod aggregate;
pub mod config;
pub mod error;
pub mod plan;
pub mod result;
pub mod selector;
#[cfg(feature = "synthetic")]
pub mod synthetic;
pub use aggregate::Analyzer;
pub use config::{AnalysisConfig, BalanceCheck, BalancePlan};
pub use error::AnalysisError;
pub use plan::{CellPlan, ScopePlan, TrialPool};
pub use result::{
    AnalysisResult, ConditionResult, EmptyScopeWarning, Metric, MetricColumn, MetricTable,
    RtKind, ScopeResult,
};
pub use selector::{Mask, select_count, select_median_rt};
