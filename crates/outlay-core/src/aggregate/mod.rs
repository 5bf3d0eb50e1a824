pub mod category;
pub mod monthly;

use crate::model::{Dataset, DateRange, ReportSummary, Window};
use crate::{ReportError, ReportResult};

pub use category::{category_breakdown, window_start};
pub use monthly::monthly_summary;

/// Windows reported alongside the full range, newest last.
pub const RECENT_WINDOWS: [Window; 2] = [Window::LastMonths(3), Window::LastMonths(1)];

pub fn total_expenditure(dataset: &Dataset) -> f64 {
    dataset.iter().map(|transaction| transaction.amount).sum()
}

pub fn date_range(dataset: &Dataset) -> ReportResult<DateRange> {
    let start = dataset.iter().map(|transaction| transaction.date).min();
    let end = dataset.iter().map(|transaction| transaction.date).max();
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange { start, end }),
        _ => Err(ReportError::empty_dataset()),
    }
}

pub fn average_per_day(total: f64, range: &DateRange) -> f64 {
    total / range.day_count() as f64
}

pub fn summarize(dataset: &Dataset) -> ReportResult<ReportSummary> {
    let date_range = date_range(dataset)?;
    let total_expenditure = total_expenditure(dataset);

    let mut categories = vec![category_breakdown(dataset, Window::All)];
    categories.extend(
        RECENT_WINDOWS
            .iter()
            .map(|window| category_breakdown(dataset, *window)),
    );

    let summary = ReportSummary {
        date_range,
        total_expenditure,
        average_per_day: average_per_day(total_expenditure, &date_range),
        day_count: date_range.day_count(),
        monthly: monthly_summary(dataset),
        categories,
    };

    tracing::debug!(
        months = summary.monthly.len(),
        days = summary.day_count,
        total = summary.total_expenditure,
        "summarized dataset"
    );

    Ok(summary)
}
