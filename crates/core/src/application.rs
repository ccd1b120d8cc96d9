use crate::cleaning::clean_jobs;
use crate::domain::PipelineReport;
use crate::ports::{JobSource, JobWriter, Result};

/// Application service that runs fetch, clean and save in order
pub struct PipelineServiceImpl {
    job_source: Box<dyn JobSource>,
    job_writer: Box<dyn JobWriter>,
}

impl PipelineServiceImpl {
    /// Creates a new PipelineServiceImpl with the given dependencies
    pub fn new(job_source: Box<dyn JobSource>, job_writer: Box<dyn JobWriter>) -> Self {
        Self {
            job_source,
            job_writer,
        }
    }

    /// Executes the pipeline: fetches the listing, cleans it and persists the result.
    /// The first failing stage aborts the run; later stages are not attempted.
    pub fn execute_pipeline(&self) -> Result<PipelineReport> {
        let raw = self.job_source.fetch_jobs()?;
        let fetched = raw.len();
        tracing::info!(rows = fetched, "fetched job listing");

        let cleaned = clean_jobs(raw);

        self.job_writer.write_jobs(&cleaned.jobs)?;
        let output = self.job_writer.destination().to_path_buf();
        tracing::info!(rows = cleaned.jobs.len(), path = %output.display(), "saved cleaned jobs");

        Ok(PipelineReport {
            fetched,
            kept: cleaned.jobs.len(),
            dropped: cleaned.dropped,
            output,
        })
    }
}
