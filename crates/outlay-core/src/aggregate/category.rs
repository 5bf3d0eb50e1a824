use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use crate::model::{CategoryBreakdown, CategoryBucket, Dataset, DateRange, Window};

/// First day included in `window`, relative to the dataset's latest date.
pub fn window_start(window: Window, range: &DateRange) -> NaiveDate {
    match window {
        Window::All => range.start,
        // chrono clamps to the last day of a shorter month; a window reaching
        // before the earliest representable date covers the whole range.
        Window::LastMonths(months) => range
            .end
            .checked_sub_months(Months::new(months))
            .unwrap_or(range.start),
    }
}

pub fn category_breakdown(dataset: &Dataset, window: Window) -> CategoryBreakdown {
    let Some(range) = super::date_range(dataset).ok() else {
        return CategoryBreakdown {
            window,
            span: None,
            total: 0.0,
            buckets: Vec::new(),
        };
    };
    let start = window_start(window, &range);

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for transaction in dataset.iter().filter(|row| row.date >= start) {
        *totals.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let buckets = totals
        .into_iter()
        .map(|(category, total)| CategoryBucket {
            category: category.to_string(),
            total,
        })
        .collect::<Vec<CategoryBucket>>();

    CategoryBreakdown {
        window,
        span: Some(DateRange {
            start,
            end: range.end,
        }),
        total: buckets.iter().map(|bucket| bucket.total).sum(),
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::model::{Dataset, DateRange, Transaction, Window};

    use super::{category_breakdown, window_start};

    fn txn(date: (i32, u32, u32), amount: f64, category: &str) -> Option<Transaction> {
        Some(Transaction {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
            amount,
            category: category.to_string(),
            line: 1,
        })
    }

    fn dataset(rows: Vec<Option<Transaction>>) -> Option<Dataset> {
        rows.into_iter()
            .collect::<Option<Vec<Transaction>>>()
            .map(Dataset::new)
    }

    fn range_ending(end: (i32, u32, u32)) -> Option<DateRange> {
        Some(DateRange {
            start: NaiveDate::from_ymd_opt(2000, 1, 1)?,
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2)?,
        })
    }

    #[test]
    fn one_month_back_from_march_end_lands_on_february_end() {
        let leap = range_ending((2024, 3, 31));
        let common = range_ending((2023, 3, 31));
        assert!(leap.is_some() && common.is_some());
        if let (Some(leap), Some(common)) = (leap, common) {
            assert_eq!(
                Some(window_start(Window::LastMonths(1), &leap)),
                NaiveDate::from_ymd_opt(2024, 2, 29)
            );
            assert_eq!(
                Some(window_start(Window::LastMonths(1), &common)),
                NaiveDate::from_ymd_opt(2023, 2, 28)
            );
        }
    }

    #[test]
    fn three_month_window_crosses_year_boundary() {
        let range = range_ending((2024, 2, 15));
        assert!(range.is_some());
        if let Some(range) = range {
            assert_eq!(
                Some(window_start(Window::LastMonths(3), &range)),
                NaiveDate::from_ymd_opt(2023, 11, 15)
            );
            assert_eq!(window_start(Window::All, &range), range.start);
        }
    }

    #[test]
    fn last_month_window_uses_calendar_months() {
        let data = dataset(vec![
            txn((2024, 2, 28), 1.0, "Rent"),
            txn((2024, 2, 29), 2.0, "Food"),
            txn((2024, 3, 31), 4.0, "Food"),
        ]);
        assert!(data.is_some());
        if let Some(data) = data {
            let breakdown = category_breakdown(&data, Window::LastMonths(1));
            assert_eq!(
                breakdown.span.map(|span| span.start),
                NaiveDate::from_ymd_opt(2024, 2, 29)
            );
            assert_eq!(breakdown.total, 6.0);
            assert_eq!(breakdown.buckets.len(), 1);
            assert_eq!(breakdown.buckets[0].category, "Food");
        }
    }

    #[test]
    fn categories_are_sorted_and_sum_to_window_total() {
        let data = dataset(vec![
            txn((2024, 1, 1), 3.5, "Transport"),
            txn((2024, 1, 2), 1.25, "Food"),
            txn((2024, 1, 3), 2.25, "Food"),
        ]);
        assert!(data.is_some());
        if let Some(data) = data {
            let breakdown = category_breakdown(&data, Window::All);
            let names = breakdown
                .buckets
                .iter()
                .map(|bucket| bucket.category.as_str())
                .collect::<Vec<&str>>();
            assert_eq!(names, vec!["Food", "Transport"]);
            let sum = breakdown.buckets.iter().map(|bucket| bucket.total).sum::<f64>();
            assert_eq!(sum, breakdown.total);
            assert_eq!(breakdown.total, 7.0);
        }
    }

    #[test]
    fn empty_dataset_yields_empty_breakdown() {
        let breakdown = category_breakdown(&Dataset::default(), Window::LastMonths(3));
        assert!(breakdown.span.is_none());
        assert!(breakdown.buckets.is_empty());
        assert_eq!(breakdown.total, 0.0);
    }
}
