use std::collections::BTreeMap;

use crate::model::{Dataset, MonthlyBucket, YearMonth};

/// Groups expenditure by calendar month in chronological order. The average
/// is the month total spread over every calendar day of that month.
pub fn monthly_summary(dataset: &Dataset) -> Vec<MonthlyBucket> {
    let mut totals: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for transaction in dataset.iter() {
        *totals.entry(YearMonth::of(transaction.date)).or_insert(0.0) += transaction.amount;
    }

    totals
        .into_iter()
        .map(|(month, total)| MonthlyBucket {
            month,
            total,
            average: total / f64::from(month.days_in_month()),
        })
        .collect()
}
