use hiring_core::analytics::{CountEntry, DashboardSummary};
use std::fmt::Write;
use std::path::Path;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #1f2933; }
h1 { margin-bottom: 0.25rem; }
.subtitle { color: #52606d; margin-top: 0; }
.chart { display: flex; align-items: flex-end; gap: 4px; height: 240px; border-bottom: 1px solid #9aa5b1; padding-top: 1rem; }
.bar { flex: 1; display: flex; flex-direction: column; justify-content: flex-end; align-items: center; height: 100%; }
.bar .fill { width: 100%; background: #3e7bfa; min-height: 1px; }
.bar .count { font-size: 0.75rem; color: #52606d; }
.axis { display: flex; gap: 4px; }
.axis span { flex: 1; font-size: 0.7rem; text-align: center; color: #52606d; overflow: hidden; }
table { border-collapse: collapse; min-width: 320px; }
th, td { text-align: left; padding: 0.3rem 0.8rem; border-bottom: 1px solid #e4e7eb; }
td.count, th.count { text-align: right; }
.empty { color: #7b8794; font-style: italic; }
.error { background: #fde8e8; border: 1px solid #f8b4b4; padding: 1rem; border-radius: 4px; }
footer { margin-top: 2rem; font-size: 0.8rem; color: #7b8794; }
"#;

/// Renders the full dashboard page for a loaded table.
pub fn render_dashboard(summary: &DashboardSummary, source: &Path) -> String {
    let mut body = String::new();

    body.push_str("<h2>Jobs Over Time</h2>\n");
    body.push_str(&render_bar_chart(&summary.jobs_over_time));

    let _ = writeln!(body, "<h2>Top {} Skills/Tags</h2>", summary.limit);
    body.push_str(&render_ranking("Tag", &summary.top_tags));

    body.push_str("<h2>Jobs by Location</h2>\n");
    body.push_str(&render_ranking("Location", &summary.top_locations));

    let _ = writeln!(
        body,
        "<footer>{} jobs loaded from <code>{}</code></footer>",
        summary.total_rows,
        escape_html(&source.display().to_string())
    );

    page(&body)
}

/// Renders the page shown when the persisted table cannot be loaded.
pub fn render_load_error(message: &str) -> String {
    let body = format!(
        "<div class=\"error\"><strong>Could not load job data.</strong><p>{}</p></div>\n",
        escape_html(message)
    );
    page(&body)
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Hiring Trends Dashboard</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Hiring Trends Dashboard</h1>\n\
         <p class=\"subtitle\">Analyzing remote job trends from RemoteOK</p>\n\
         {body}</body>\n</html>\n"
    )
}

fn render_bar_chart(entries: &[CountEntry]) -> String {
    if entries.is_empty() {
        return "<p class=\"empty\">No jobs to chart.</p>\n".to_string();
    }

    let max = entries.iter().map(|e| e.count).max().unwrap_or(1).max(1);
    let mut bars = String::new();
    let mut axis = String::new();
    for entry in entries {
        let label = escape_html(&entry.label);
        let height = entry.count * 100 / max;
        let _ = writeln!(
            bars,
            "<div class=\"bar\" title=\"{label}: {count}\"><span class=\"count\">{count}</span>\
             <div class=\"fill\" style=\"height: {height}%\"></div></div>",
            count = entry.count,
        );
        let _ = writeln!(axis, "<span>{label}</span>");
    }

    format!("<div class=\"chart\">\n{bars}</div>\n<div class=\"axis\">\n{axis}</div>\n")
}

fn render_ranking(heading: &str, entries: &[CountEntry]) -> String {
    if entries.is_empty() {
        return "<p class=\"empty\">Nothing to rank.</p>\n".to_string();
    }

    let mut table = format!(
        "<table>\n<thead><tr><th>#</th><th>{heading}</th><th class=\"count\">Jobs</th></tr></thead>\n<tbody>\n"
    );
    for (rank, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            table,
            "<tr><td>{}</td><td>{}</td><td class=\"count\">{}</td></tr>",
            rank + 1,
            escape_html(&entry.label),
            entry.count
        );
    }
    table.push_str("</tbody>\n</table>\n");
    table
}

/// Escapes text for use inside HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
