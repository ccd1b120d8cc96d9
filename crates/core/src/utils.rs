use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parses a posting date leniently and normalizes it to UTC
/// Supports various formats: ISO 8601 with or without offset, space-separated, date only,
/// and whatever `dateparser` understands (RFC 2822, unix timestamps, ...)
pub fn parse_posting_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    parse_known_formats(date_str)
        .or_else(|| dateparser::parse_with_timezone(date_str, &Utc).ok())
        .filter(|dt| (0..=9999).contains(&dt.year()))
}

fn parse_known_formats(date_str: &str) -> Option<DateTime<Utc>> {
    // ISO 8601 with timezone (e.g., "2025-12-16T10:30:00Z" or "2025-12-16T10:30:00+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // ISO 8601 without timezone (assume UTC)
    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive_dt.and_utc());
    }

    // Space-separated datetime (e.g., "2025-12-16 10:30:00")
    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive_dt.and_utc());
    }

    // Date only (e.g., "2025-12-16") - treat as midnight UTC
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive_dt| naive_dt.and_utc());
    }

    None
}

/// Month bucket for a date, always `YYYY-MM`
pub fn year_month(date: &DateTime<Utc>) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Checks a persisted year-month key ("2025-12", not "2025-13" or "2025-1")
pub fn is_year_month_key(value: &str) -> bool {
    let Some((year, month)) = value.split_once('-') else {
        return false;
    };
    if year.len() != 4 || month.len() != 2 {
        return false;
    }
    if !year.chars().all(|c| c.is_ascii_digit()) || !month.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u32>(), Ok(1..=12))
}

/// Textual form of a date in the persisted file: RFC 3339, UTC, `Z` suffix,
/// fractional seconds only when present
pub fn format_persisted_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Inverse of `format_persisted_date`
pub fn parse_persisted_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
