use serde::{Deserialize, Serialize};

/// Spatial field a set of metrics is computed over
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Left,
    Right,
    Whole,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Left, Scope::Right, Scope::Whole];

    /// Prefix used in metric names (`lHits`, `rKs`, `wdPs`, ...)
    pub fn prefix(&self) -> &'static str {
        match self {
            Scope::Left => "l",
            Scope::Right => "r",
            Scope::Whole => "w",
        }
    }

    pub fn is_hemifield(&self) -> bool {
        !matches!(self, Scope::Whole)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Scope::Left => "left",
            Scope::Right => "right",
            Scope::Whole => "whole",
        })
    }
}
