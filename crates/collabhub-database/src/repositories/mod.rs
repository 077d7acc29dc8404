//! PostgreSQL repository implementations.

pub mod directory;
pub mod file;
pub mod history;
pub mod version;

pub use directory::{PgProjectDirectory, PgUserDirectory};
pub use file::PgFileRepository;
pub use history::PgHistoryRepository;
pub use version::PgVersionRepository;
