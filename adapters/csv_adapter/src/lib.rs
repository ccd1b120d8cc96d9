use hiring_core::domain::JobPosting;
use hiring_core::ports::{JobReader, JobWriter, Result};
use hiring_core::utils::{format_persisted_date, is_year_month_key, parse_persisted_date};
use hiring_core::{DashboardLoadError, Error};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Header of the persisted file, in column order
pub const COLUMNS: [&str; 6] = ["company", "position", "tags", "location", "date", "year_month"];

/// One line of the persisted file
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    company: String,
    position: String,
    tags: String,
    location: String,
    date: String,
    year_month: String,
}

impl From<&JobPosting> for CsvRow {
    fn from(job: &JobPosting) -> Self {
        Self {
            company: job.company.clone(),
            position: job.position.clone(),
            tags: job.tags.clone(),
            location: job.location.clone(),
            date: format_persisted_date(&job.date),
            year_month: job.year_month.clone(),
        }
    }
}

impl CsvRow {
    fn into_job(self, row: usize) -> std::result::Result<JobPosting, DashboardLoadError> {
        let date = parse_persisted_date(&self.date).ok_or_else(|| {
            DashboardLoadError::InvalidField {
                row,
                column: "date",
                value: self.date.clone(),
            }
        })?;
        if !is_year_month_key(&self.year_month) {
            return Err(DashboardLoadError::InvalidField {
                row,
                column: "year_month",
                value: self.year_month,
            });
        }

        Ok(JobPosting {
            company: self.company,
            position: self.position,
            tags: self.tags,
            location: self.location,
            date,
            year_month: self.year_month,
        })
    }
}

/// CSV file implementation of the JobWriter and JobReader traits
pub struct CsvJobStore {
    path: PathBuf,
}

impl CsvJobStore {
    /// Creates a new CsvJobStore backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_atomically(&self, jobs: &[JobPosting]) -> io::Result<()> {
        self.replace_with(|file| {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file);
            writer.write_record(COLUMNS)?;
            for job in jobs {
                writer.serialize(CsvRow::from(job))?;
            }
            writer.flush()
        })
    }

    /// Fills a temporary file next to the target, then renames it over the
    /// target so readers never see a half-written table. If `fill` fails the
    /// target is left untouched and the temporary file is removed.
    fn replace_with(&self, fill: impl FnOnce(&File) -> io::Result<()>) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".cleaned_jobs").suffix(".tmp");
        // Let the umask decide, like a plain File::create would
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let staging = builder.tempfile_in(dir)?;

        fill(staging.as_file())?;
        staging.as_file().sync_all()?;

        if let Ok(existing) = fs::metadata(&self.path) {
            staging.as_file().set_permissions(existing.permissions())?;
        }

        staging.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn load(&self) -> std::result::Result<Vec<JobPosting>, DashboardLoadError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DashboardLoadError::Missing,
            _ => DashboardLoadError::Io(e),
        })?;

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| DashboardLoadError::Malformed {
                row: 0,
                message: e.to_string(),
            })?
            .clone();
        if !headers.iter().eq(COLUMNS.iter().copied()) {
            return Err(DashboardLoadError::Schema {
                expected: COLUMNS.join(","),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        let mut jobs = Vec::new();
        for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = index + 1;
            let record = result.map_err(|e| DashboardLoadError::Malformed {
                row,
                message: e.to_string(),
            })?;
            jobs.push(record.into_job(row)?);
        }
        Ok(jobs)
    }
}

impl JobWriter for CsvJobStore {
    fn write_jobs(&self, jobs: &[JobPosting]) -> Result<()> {
        self.write_atomically(jobs).map_err(|source| Error::Persist {
            path: self.path.clone(),
            source,
        })
    }

    fn destination(&self) -> &Path {
        &self.path
    }
}

impl JobReader for CsvJobStore {
    fn read_jobs(&self) -> Result<Vec<JobPosting>> {
        let jobs = self.load().map_err(|source| {
            tracing::warn!(path = %self.path.display(), error = %source, "could not load persisted jobs");
            Error::Load {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %self.path.display(), rows = jobs.len(), "loaded persisted jobs");
        Ok(jobs)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
