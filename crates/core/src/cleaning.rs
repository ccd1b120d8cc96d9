use crate::domain::{CleanedJobs, JobPosting, RawJobPosting, RawTags};
use crate::utils::{parse_posting_date, year_month};

/// Separator used when flattening tag lists, and when splitting them again.
pub const TAG_SEPARATOR: &str = ", ";

/// Turns raw rows into persisted-ready postings.
///
/// Rows whose date does not parse are dropped and counted; nothing else
/// affects whether a row survives. Surviving rows keep their input order.
pub fn clean_jobs(raw: Vec<RawJobPosting>) -> CleanedJobs {
    let mut cleaned = CleanedJobs::default();

    for (index, posting) in raw.into_iter().enumerate() {
        let Some(date) = posting.date.as_deref().and_then(parse_posting_date) else {
            tracing::debug!(row = index, date = ?posting.date, "dropping row with unparsable date");
            cleaned.dropped += 1;
            continue;
        };

        cleaned.jobs.push(JobPosting {
            company: posting.company.unwrap_or_default(),
            position: posting.position.unwrap_or_default(),
            tags: flatten_tags(&posting.tags),
            location: posting.location.unwrap_or_default(),
            year_month: year_month(&date),
            date,
        });
    }

    tracing::info!(
        kept = cleaned.jobs.len(),
        dropped = cleaned.dropped,
        "cleaned job postings"
    );
    cleaned
}

pub fn flatten_tags(tags: &RawTags) -> String {
    match tags {
        RawTags::List(items) => items.join(TAG_SEPARATOR),
        RawTags::Missing => String::new(),
    }
}
