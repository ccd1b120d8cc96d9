//! Aggregates behind the dashboard views.
//!
//! Top-N rankings sort by descending count; equal counts keep the order in
//! which the values first appear in the table.

use crate::cleaning::TAG_SEPARATOR;
use crate::domain::JobPosting;
use std::collections::{BTreeMap, HashMap};

/// A label and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

impl CountEntry {
    fn new(label: &str, count: usize) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_rows: usize,
    /// How many entries the top-N views were allowed to keep.
    pub limit: usize,
    pub jobs_over_time: Vec<CountEntry>,
    pub top_tags: Vec<CountEntry>,
    pub top_locations: Vec<CountEntry>,
}

impl DashboardSummary {
    pub fn from_jobs(jobs: &[JobPosting], top_n: usize) -> Self {
        Self {
            total_rows: jobs.len(),
            limit: top_n,
            jobs_over_time: jobs_over_time(jobs),
            top_tags: top_tags(jobs, top_n),
            top_locations: top_locations(jobs, top_n),
        }
    }
}

/// Row counts per `year_month`, ascending by month.
pub fn jobs_over_time(jobs: &[JobPosting]) -> Vec<CountEntry> {
    let mut months: BTreeMap<&str, usize> = BTreeMap::new();
    for job in jobs {
        *months.entry(job.year_month.as_str()).or_default() += 1;
    }
    months
        .into_iter()
        .map(|(month, count)| CountEntry::new(month, count))
        .collect()
}

/// Most frequent individual tags across all rows. Empty tags are not counted.
pub fn top_tags(jobs: &[JobPosting], limit: usize) -> Vec<CountEntry> {
    let tags = jobs
        .iter()
        .flat_map(|job| job.tags.split(TAG_SEPARATOR))
        .filter(|tag| !tag.is_empty());
    rank_by_frequency(tags, limit)
}

/// Most frequent locations. Rows without a location are not counted.
pub fn top_locations(jobs: &[JobPosting], limit: usize) -> Vec<CountEntry> {
    let locations = jobs
        .iter()
        .map(|job| job.location.as_str())
        .filter(|location| !location.is_empty());
    rank_by_frequency(locations, limit)
}

fn rank_by_frequency<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<CountEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match positions.get(value) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(label, count)| CountEntry::new(label, count))
        .collect()
}
