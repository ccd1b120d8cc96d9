use hiring_core::domain::{RawJobPosting, RawTags};
use serde_json::Value;

/// Drops the leading metadata element of a listing and projects every
/// remaining element onto the five pipeline columns.
///
/// Missing keys and non-object elements become empty fields rather than errors.
pub fn normalize_records(values: Vec<Value>) -> Vec<RawJobPosting> {
    values.iter().skip(1).map(project).collect()
}

fn project(record: &Value) -> RawJobPosting {
    RawJobPosting {
        company: text_field(record, "company"),
        position: text_field(record, "position"),
        tags: tags_field(record),
        location: text_field(record, "location"),
        date: text_field(record, "date"),
    }
}

fn text_field(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn tags_field(record: &Value) -> RawTags {
    match record.get("tags") {
        Some(Value::Array(items)) => RawTags::List(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => RawTags::Missing,
    }
}
