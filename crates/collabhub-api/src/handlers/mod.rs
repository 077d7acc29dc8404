//! HTTP request handlers, one module per resource.

pub mod file;
pub mod health;
pub mod history;
pub mod version;
