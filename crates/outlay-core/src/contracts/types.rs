use serde::Serialize;

use crate::model::{CategoryBreakdown, ReportSummary, Window};

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub dry_run: bool,
    pub data_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_directory: Option<String>,
    pub chart_paths: Vec<String>,
    pub transactions: usize,
    pub summary: SummaryData,
    /// Rendered text report, always present so dry runs can print it.
    pub report_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub start_date: String,
    pub end_date: String,
    pub day_count: i64,
    pub total_expenditure: f64,
    pub average_per_day: f64,
    pub monthly: Vec<MonthlyRow>,
    pub categories: Vec<CategoryWindowData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRow {
    pub month: String,
    pub days_in_month: u32,
    pub total: f64,
    pub average_per_day: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryWindowData {
    pub window: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total: f64,
    pub rows: Vec<CategoryRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub total: f64,
}

impl From<&ReportSummary> for SummaryData {
    fn from(summary: &ReportSummary) -> Self {
        Self {
            start_date: format_iso_date(summary.date_range.start),
            end_date: format_iso_date(summary.date_range.end),
            day_count: summary.day_count,
            total_expenditure: summary.total_expenditure,
            average_per_day: summary.average_per_day,
            monthly: summary
                .monthly
                .iter()
                .map(|bucket| MonthlyRow {
                    month: bucket.month.to_string(),
                    days_in_month: bucket.month.days_in_month(),
                    total: bucket.total,
                    average_per_day: bucket.average,
                })
                .collect(),
            categories: summary.categories.iter().map(CategoryWindowData::from).collect(),
        }
    }
}

impl From<&CategoryBreakdown> for CategoryWindowData {
    fn from(breakdown: &CategoryBreakdown) -> Self {
        Self {
            window: window_key(breakdown.window),
            start_date: breakdown.span.map(|span| format_iso_date(span.start)),
            end_date: breakdown.span.map(|span| format_iso_date(span.end)),
            total: breakdown.total,
            rows: breakdown
                .buckets
                .iter()
                .map(|bucket| CategoryRow {
                    category: bucket.category.clone(),
                    total: bucket.total,
                })
                .collect(),
        }
    }
}

fn window_key(window: Window) -> String {
    match window {
        Window::All => "all".to_string(),
        Window::LastMonths(months) => format!("last_{months}_months"),
    }
}

fn format_iso_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
