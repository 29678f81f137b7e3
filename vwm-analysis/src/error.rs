use crate::config::BalanceCheck;
use thiserror::Error;
use vwm_core::{ConditionKey, Scope, SessionId, TableError};
use vwm_metrics::RateError;

/// Reasons a session cannot be analyzed. Every variant names the session so
/// the raw run file can be found again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("{session}: missing data: {source}")]
    MissingData {
        session: SessionId,
        #[source]
        source: TableError,
    },
    #[error(
        "{session}: condition {condition}: {scope} {check} counterbalancing failed: expected {expected} trials, found {actual}"
    )]
    CounterbalancingViolation {
        session: SessionId,
        condition: ConditionKey,
        scope: Scope,
        check: BalanceCheck,
        expected: usize,
        actual: usize,
    },
    #[error("{session}: condition {condition}: {scope} field: {source}")]
    DegenerateRate {
        session: SessionId,
        condition: ConditionKey,
        scope: Scope,
        #[source]
        source: RateError,
    },
}

impl AnalysisError {
    pub fn session(&self) -> &SessionId {
        match self {
            AnalysisError::MissingData { session, .. }
            | AnalysisError::CounterbalancingViolation { session, .. }
            | AnalysisError::DegenerateRate { session, .. } => session,
        }
    }

    pub fn condition(&self) -> Option<&ConditionKey> {
        match self {
            AnalysisError::MissingData { .. } => None,
            AnalysisError::CounterbalancingViolation { condition, .. }
            | AnalysisError::DegenerateRate { condition, .. } => Some(condition),
        }
    }
}
