//! History log entities.

pub mod change_type;
pub mod model;

pub use change_type::ChangeType;
pub use model::{CreateHistoryEntry, HistoryEntry};
