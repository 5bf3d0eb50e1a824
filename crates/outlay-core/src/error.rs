use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const REPORT_HELP_COMMAND: &str = "outlay report --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ReportError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ReportError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec![format!("Run `{REPORT_HELP_COMMAND}` for usage.")],
        )
    }

    pub fn invalid_config(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "invalid_config",
            &format!("Configuration file `{location}` is invalid: {detail}"),
            vec![
                "Fix or remove the listed key in the configuration file.".to_string(),
                "Unset `OUTLAY_CONFIG` to fall back to built-in defaults.".to_string(),
            ],
        )
        .with_data(json!({
            "config_path": location,
        }))
    }

    /// A setting that parsed but cannot be used, e.g. a non-ASCII delimiter.
    pub fn invalid_config_value(key: &str, detail: &str) -> Self {
        Self::new(
            "invalid_config",
            &format!("Configuration value `{key}` is invalid: {detail}"),
            vec![format!(
                "Change `{key}` in the configuration file, or remove it to use the default."
            )],
        )
        .with_data(json!({
            "key": key,
        }))
    }

    pub fn file_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "file_not_found",
            &format!("Transaction export `{location}` does not exist."),
            vec![
                "Check `data_directory` and `data_filename` in your configuration.".to_string(),
                "Or pass `--data-filename <name>` to pick a different export.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn unreadable_input(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "unreadable_input",
            &format!("Could not read transaction export `{location}`: {detail}"),
            vec![
                "Verify the file is readable and saved as UTF-8 text.".to_string(),
                "Re-export the statement from your bank if the file is damaged.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn schema_mismatch(
        header_rows_to_skip: usize,
        expected_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let missing = expected_headers
            .iter()
            .filter(|expected| !actual_headers.contains(expected))
            .cloned()
            .collect::<Vec<String>>();

        Self::new(
            "schema_mismatch",
            &format!(
                "Header row after skipping {header_rows_to_skip} lines is missing columns: {}.",
                missing.join(", ")
            ),
            vec![
                "Check `header_rows_to_skip` matches the preamble length of your export."
                    .to_string(),
                "Check `date_column`, `amount_column` and `category_column` match the header names exactly."
                    .to_string(),
                "Check `field_delimiter` matches the separator used by the file.".to_string(),
            ],
        )
        .with_data(json!({
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
            "missing_headers": missing,
        }))
    }

    pub fn malformed_date(line: u64, column: &str, received: &str) -> Self {
        Self::new(
            "malformed_date",
            &format!("Line {line}: `{column}` must be a day-first date; got \"{received}\"."),
            vec![
                "Dates are read as DD/MM/YYYY (separators `/`, `-` or `.`).".to_string(),
                "Fix or remove the listed row and rerun the report.".to_string(),
            ],
        )
        .with_data(json!({
            "line": line,
            "column": column,
            "received": received,
        }))
    }

    pub fn malformed_amount(line: u64, column: &str, received: &str) -> Self {
        Self::new(
            "malformed_amount",
            &format!("Line {line}: `{column}` must be a decimal amount; got \"{received}\"."),
            vec![
                "Amounts may use a decimal comma (e.g. -12,50) or a decimal point.".to_string(),
                "Fix or remove the listed row and rerun the report.".to_string(),
            ],
        )
        .with_data(json!({
            "line": line,
            "column": column,
            "received": received,
        }))
    }

    pub fn empty_dataset() -> Self {
        Self::new(
            "empty_dataset",
            "No expenditure rows were found, so there is nothing to summarize.",
            vec![
                "Check the export contains data rows below the header.".to_string(),
                "Set `income_rows = \"include\"` if your export records spending as positive amounts."
                    .to_string(),
            ],
        )
    }

    pub fn write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "write_failed",
            &format!("Could not write report output `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or pass `--report-dir` with a writable directory."
            )],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn is_output_failure(&self) -> bool {
        self.code.starts_with("internal_") || self.code == "write_failed"
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
