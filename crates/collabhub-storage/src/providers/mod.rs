//! Concrete [`StorageProvider`](collabhub_core::traits::StorageProvider) backends.

pub mod local;
pub mod memory;

pub use local::LocalStorageProvider;
pub use memory::MemoryStorageProvider;
