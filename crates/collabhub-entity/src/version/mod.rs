//! Version log entities.

pub mod model;

pub use model::{CreateVersion, Version};
