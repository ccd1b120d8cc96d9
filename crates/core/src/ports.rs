use crate::domain::{JobPosting, RawJobPosting};
use std::path::Path;

pub type Result<T> = std::result::Result<T, crate::error::Error>;

pub trait JobSource {
    // Pulls the current listing and projects it onto RawJobPosting rows
    fn fetch_jobs(&self) -> Result<Vec<RawJobPosting>>;
}

/// Trait for persisting the cleaned table
/// This is a port (interface) that defines how the core hands data to storage adapters
pub trait JobWriter: Send + Sync {
    /// Replaces whatever is stored at `destination()` with `jobs`.
    fn write_jobs(&self, jobs: &[JobPosting]) -> Result<()>;

    fn destination(&self) -> &Path;
}

/// Trait for reading a previously persisted table back
pub trait JobReader: Send + Sync {
    fn read_jobs(&self) -> Result<Vec<JobPosting>>;

    fn location(&self) -> &Path;
}
