use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Tags as they arrive from the listing: a list, or anything else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawTags {
    List(Vec<String>),
    #[default]
    Missing,
}

/// One listing projected onto the five columns the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawJobPosting {
    pub company: Option<String>,
    pub position: Option<String>,
    pub tags: RawTags,
    pub location: Option<String>,
    pub date: Option<String>, // Unparsed, may be garbage
}

/// A cleaned posting, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub company: String,
    pub position: String,
    pub tags: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub year_month: String,
}

/// Output of the cleaning stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedJobs {
    pub jobs: Vec<JobPosting>,
    /// Rows removed because their date could not be parsed.
    pub dropped: usize,
}

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub fetched: usize,
    pub kept: usize,
    pub dropped: usize,
    pub output: PathBuf,
}
