use serde::{Deserialize, Serialize};

/// Identifies the raw run file a trial table came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId {
    pub subject: String,
    pub run: String,
    pub round: String,
}

impl SessionId {
    pub fn new(
        subject: impl Into<String>,
        run: impl Into<String>,
        round: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            run: run.into(),
            round: round.into(),
        }
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "subject {}, run {}, round {}",
            self.subject, self.run, self.round
        )
    }
}
