use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use jobboard_core::{AppViewModel, Field, FieldValue, JobRowView, Toggle};

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    let query = if view.query_string.is_empty() {
        "(no filters)"
    } else {
        view.query_string.as_str()
    };
    let _ = writeln!(out, "== Jobs: {query}");
    let _ = writeln!(out, "{}", toggle_bar(view));

    if let Some(warning) = &view.warning {
        let _ = writeln!(out, "! {warning}");
    }

    if view.loading {
        let _ = writeln!(out, "Loading...");
    } else if view.result_count == 0 {
        let _ = writeln!(out, "No jobs match these filters.");
    } else {
        for row in &view.jobs {
            let _ = writeln!(out, "{}", job_line(row, now));
        }
        let _ = writeln!(
            out,
            "-- {} result{}, page {}/{}",
            view.result_count,
            if view.result_count == 1 { "" } else { "s" },
            view.page,
            view.total_pages
        );
    }

    if view.sheet_open {
        out.push_str(&sheet(view));
    }

    if !view.recent_searches.is_empty() {
        let _ = writeln!(out, "Recent: {}", view.recent_searches.join(" | "));
    }
    out
}

fn toggle_bar(view: &AppViewModel) -> String {
    Toggle::ALL
        .into_iter()
        .map(|toggle| {
            let mark = if view.toggles.is_on(toggle) { "x" } else { " " };
            format!("[{mark}] {}", toggle.label())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn job_line(row: &JobRowView, now: DateTime<Utc>) -> String {
    let mut badges = Vec::new();
    if row.promoted {
        badges.push("Promoted");
    }
    if row.easy_apply {
        badges.push("Easy Apply");
    }
    if row.actively_reviewing {
        badges.push("Actively reviewing");
    }
    if row.early_applicant {
        badges.push("Early applicant");
    }
    if row.viewed {
        badges.push("Viewed");
    }

    let mut line = format!(
        "#{:<4} {} - {} ({}), {}",
        row.job_id,
        row.title,
        row.company,
        row.location,
        posted_ago(row.posted_time, now)
    );
    if !badges.is_empty() {
        let _ = write!(line, " [{}]", badges.join(", "));
    }
    line
}

fn posted_ago(posted: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(posted) = posted else {
        return "date unknown".to_string();
    };
    let age = now - posted;
    match age.num_days() {
        days if days >= 1 => format!("{days}d ago"),
        _ => match age.num_hours() {
            hours if hours >= 1 => format!("{hours}h ago"),
            _ => "just now".to_string(),
        },
    }
}

fn sheet(view: &AppViewModel) -> String {
    let mut out = String::from("-- Filters\n");
    for field in Field::ALL {
        if field == Field::Search {
            continue;
        }
        let value = match view.criteria.value(field) {
            FieldValue::Flag(flag) => if flag { "on" } else { "off" }.to_string(),
            FieldValue::Text(text) => text.into_owned(),
        };
        let _ = writeln!(out, "   {:<18} {value}", field.key());
    }
    if view.saving {
        out.push_str("   Saving...\n");
    }
    if let Some(error) = &view.save_error {
        let _ = writeln!(out, "   Save failed: {error} (`ok` to dismiss)");
    }
    out
}
