//! Core traits defined in `collabhub-core` and implemented by other crates.

pub mod directory;
pub mod storage;

pub use directory::{ProjectDirectory, UserDirectory};
pub use storage::StorageProvider;
