pub mod condition;
pub mod scope;
pub mod session;
pub mod trial;

pub use condition::{ConditionDescriptor, ConditionKey, Design};
pub use scope::Scope;
pub use session::SessionId;
pub use trial::{Cell, Hemifield, RawTrialRow, ResponseKey, TableError, TrialRecord, parse_table};
