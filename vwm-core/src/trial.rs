use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Button pressed on a trial
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKey {
    /// "change" button, code 1
    HitPress,
    /// "no change" button, code 2
    RejectPress,
}

impl ResponseKey {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ResponseKey::HitPress),
            2 => Some(ResponseKey::RejectPress),
            _ => None,
        }
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemifield {
    Left,
    Right,
}

impl Hemifield {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Hemifield::Left),
            2 => Some(Hemifield::Right),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Hemifield::Left => 1,
            Hemifield::Right => 2,
        }
    }
}

impl std::fmt::Display for Hemifield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Hemifield::Left => "left",
            Hemifield::Right => "right",
        })
    }
}

/// One row of the behavioral table, after column decoding.
///
/// `change_trial` and `change_hemifield` come from separate columns and are
/// kept as recorded; nothing here checks that a change trial has a side. A
/// blank or unrecognised code becomes `None` and the trial matches no cell
/// that depends on that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub response: Option<ResponseKey>,
    pub change_trial: Option<bool>,
    pub change_hemifield: Option<Hemifield>,
    pub condition: Option<u8>,
    /// Seconds
    pub reaction_time: Option<f64>,
}

impl TrialRecord {
    pub fn is_hit_press(&self) -> bool {
        self.response == Some(ResponseKey::HitPress)
    }

    pub fn is_reject_press(&self) -> bool {
        self.response == Some(ResponseKey::RejectPress)
    }

    pub fn is_change(&self) -> bool {
        self.change_trial == Some(true)
    }

    pub fn is_no_change(&self) -> bool {
        self.change_trial == Some(false)
    }
}

/// A column value as found in one row: the column may be absent from the
/// row altogether, present but blank, or hold a number.
#[derive(Copy, Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Absent,
    Null,
    Value(f64),
}

impl Cell {
    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    /// The value as an integer code. Blank cells, NaN and non-integral values
    /// have no code. Integral floats (`1.0`) are accepted.
    pub fn code(&self) -> Option<i64> {
        match *self {
            Cell::Value(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            Cell::Value(v) if !v.is_nan() => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Value(v)
    }
}

impl Serialize for Cell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Value(v) => serializer.serialize_some(v),
            Cell::Absent | Cell::Null => serializer.serialize_none(),
        }
    }
}

// Only called for keys that are present; absent keys fall back to `Default`.
fn present_cell<'de, D>(deserializer: D) -> Result<Cell, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<f64>::deserialize(deserializer)? {
        Some(v) => Cell::Value(v),
        None => Cell::Null,
    })
}

/// Row as written by the presentation software. Every column is a `Cell`
/// so that an absent column can be reported by name while blank cells pass
/// through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrialRow {
    #[serde(
        rename = "Response",
        default,
        deserialize_with = "present_cell",
        skip_serializing_if = "Cell::is_absent"
    )]
    pub response: Cell,
    #[serde(
        rename = "ChangeTrial",
        default,
        deserialize_with = "present_cell",
        skip_serializing_if = "Cell::is_absent"
    )]
    pub change_trial: Cell,
    #[serde(
        rename = "ChangeCond",
        default,
        deserialize_with = "present_cell",
        skip_serializing_if = "Cell::is_absent"
    )]
    pub change_cond: Cell,
    #[serde(
        rename = "Cond",
        default,
        deserialize_with = "present_cell",
        skip_serializing_if = "Cell::is_absent"
    )]
    pub cond: Cell,
    #[serde(
        rename = "RT",
        default,
        deserialize_with = "present_cell",
        skip_serializing_if = "Cell::is_absent"
    )]
    pub rt: Cell,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("trial table is empty")]
    Empty,
    #[error("row {row}: missing column `{column}`")]
    MissingColumn { row: usize, column: &'static str },
    #[error("row {row}: negative reaction time {value}")]
    NegativeReactionTime { row: usize, value: f64 },
}

impl RawTrialRow {
    pub fn into_record(self, row: usize) -> Result<TrialRecord, TableError> {
        let columns = [
            ("Response", self.response),
            ("ChangeTrial", self.change_trial),
            ("ChangeCond", self.change_cond),
            ("Cond", self.cond),
            ("RT", self.rt),
        ];
        if let Some(&(column, _)) = columns.iter().find(|(_, cell)| cell.is_absent()) {
            return Err(TableError::MissingColumn { row, column });
        }

        let reaction_time = match self.rt.value() {
            Some(rt) if rt < 0.0 => {
                return Err(TableError::NegativeReactionTime { row, value: rt });
            }
            rt => rt,
        };

        Ok(TrialRecord {
            response: self.response.code().and_then(ResponseKey::from_code),
            change_trial: match self.change_trial.code() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            change_hemifield: self.change_cond.code().and_then(Hemifield::from_code),
            condition: self.cond.code().and_then(|c| u8::try_from(c).ok()),
            reaction_time,
        })
    }
}

/// Decodes a whole table, failing on the first unusable row.
pub fn parse_table<I>(rows: I) -> Result<Vec<TrialRecord>, TableError>
where
    I: IntoIterator<Item = RawTrialRow>,
{
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record(i))
        .collect::<Result<Vec<_>, _>>()?;
    if records.is_empty() {
        return Err(TableError::Empty);
    }
    Ok(records)
}
