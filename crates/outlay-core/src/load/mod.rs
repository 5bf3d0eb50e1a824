pub(crate) mod input;
pub mod normalize;
pub(crate) mod parse;

use crate::config::IncomeRows;
use crate::model::{Dataset, Transaction, UNCATEGORIZED};
use crate::{ReportConfig, ReportError, ReportResult};

use self::normalize::{normalize_amount, parse_day_first_date};

/// Reads `data_directory/data_filename` and returns the normalized
/// expenditure rows.
pub fn load_dataset(config: &ReportConfig) -> ReportResult<Dataset> {
    let path = config.data_path();
    let source = input::read_source(&path, config.header_rows_to_skip)?;
    let raw_rows = parse::parse_rows(&source, config)?;
    let rows_read = raw_rows.len();

    let mut transactions = Vec::with_capacity(rows_read);
    for raw in raw_rows {
        let raw_amount = raw.amount.unwrap_or_default();
        let amount = normalize_amount(&raw_amount, &config.currency_symbol).ok_or_else(|| {
            ReportError::malformed_amount(raw.line, &config.amount_column, &raw_amount)
        })?;
        let raw_date = raw.date.unwrap_or_default();
        let date = parse_day_first_date(&raw_date)
            .ok_or_else(|| ReportError::malformed_date(raw.line, &config.date_column, &raw_date))?;

        if config.income_rows == IncomeRows::Exclude && !amount.outgoing {
            continue;
        }

        transactions.push(Transaction {
            date,
            amount: amount.magnitude,
            category: raw.category.unwrap_or_else(|| UNCATEGORIZED.to_string()),
            line: raw.line,
        });
    }

    tracing::info!(
        path = %path.display(),
        rows_read,
        rows_kept = transactions.len(),
        "loaded transaction export"
    );

    Ok(Dataset::new(transactions))
}
