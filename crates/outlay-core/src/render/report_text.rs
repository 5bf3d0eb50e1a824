use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::ReportConfig;
use crate::model::{ReportSummary, Window};
use crate::render::table::{Align, Column, render_table};

const DIVIDER_WIDTH: usize = 50;

/// Formats with `date_display_format`, falling back to ISO when the pattern
/// is not a valid strftime string.
pub fn format_display_date(date: NaiveDate, config: &ReportConfig) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(&config.date_display_format)).is_err() {
        tracing::warn!(
            pattern = %config.date_display_format,
            "invalid date_display_format, using ISO dates"
        );
        return date.format("%Y-%m-%d").to_string();
    }
    rendered
}

pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Renders the plain-text report document.
pub fn render_report(summary: &ReportSummary, config: &ReportConfig) -> String {
    let mut lines = vec![
        format!(
            "Report Date Range: {} to {}",
            format_display_date(summary.date_range.start, config),
            format_display_date(summary.date_range.end, config)
        ),
        "=".repeat(DIVIDER_WIDTH),
        format!(
            "Total Expenditure: {}",
            format_money(summary.total_expenditure)
        ),
        format!(
            "Average Expenditure per Day: {}",
            format_money(summary.average_per_day)
        ),
        format!(
            "Number of Days (from min to max date): {}",
            summary.day_count
        ),
        String::new(),
        "Monthly Expenditure:".to_string(),
    ];

    let monthly_rows = summary
        .monthly
        .iter()
        .map(|bucket| {
            vec![
                bucket.month.to_string(),
                format_money(bucket.total),
                format_money(bucket.average),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(
        &[
            Column {
                name: "Month",
                align: Align::Left,
            },
            Column {
                name: "Total Expenditure",
                align: Align::Right,
            },
            Column {
                name: "Average Daily Expenditure",
                align: Align::Right,
            },
        ],
        &monthly_rows,
    ));

    lines.push(String::new());
    lines.push("Expenditure per Category:".to_string());
    let category_rows = summary
        .breakdown(Window::All)
        .map(|breakdown| {
            breakdown
                .buckets
                .iter()
                .map(|bucket| vec![bucket.category.clone(), format_money(bucket.total)])
                .collect::<Vec<Vec<String>>>()
        })
        .unwrap_or_default();
    lines.extend(render_table(
        &[
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Total Expenditure",
                align: Align::Right,
            },
        ],
        &category_rows,
    ));

    let mut body = lines.join("\n");
    body.push('\n');
    body
}
