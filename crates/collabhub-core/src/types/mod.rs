//! Core type definitions used across the CollabHub workspace.

pub mod id;

pub use id::*;
