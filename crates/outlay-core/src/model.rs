use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Expenditure magnitude, never negative.
    pub amount: f64,
    pub category: String,
    /// 1-based line in the source file.
    pub line: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar days in this month, 28 to 31.
    pub fn days_in_month(self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = first.and_then(|day| day.checked_add_months(Months::new(1)));
        match (first, next) {
            (Some(first), Some(next)) => u32::try_from((next - first).num_days()).unwrap_or(31),
            // Only December of chrono's last representable year lands here.
            _ => 31,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Days covered, counting both endpoints.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: YearMonth,
    pub total: f64,
    /// Total divided by the calendar days in `month`.
    pub average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    All,
    LastMonths(u32),
}

impl Window {
    pub fn label(self) -> String {
        match self {
            Self::All => "Date Range".to_string(),
            Self::LastMonths(1) => "Last Month".to_string(),
            Self::LastMonths(months) => format!("Last {months} Months"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub window: Window,
    /// Window boundaries; `None` when the dataset is empty.
    pub span: Option<DateRange>,
    pub total: f64,
    pub buckets: Vec<CategoryBucket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub date_range: DateRange,
    pub total_expenditure: f64,
    pub average_per_day: f64,
    pub day_count: i64,
    pub monthly: Vec<MonthlyBucket>,
    /// Full range first, then the trailing windows.
    pub categories: Vec<CategoryBreakdown>,
}

impl ReportSummary {
    pub fn breakdown(&self, window: Window) -> Option<&CategoryBreakdown> {
        self.categories
            .iter()
            .find(|breakdown| breakdown.window == window)
    }
}
