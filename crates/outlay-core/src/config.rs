use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ReportError, ReportResult};

pub const CONFIG_ENV_VAR: &str = "OUTLAY_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeRows {
    /// Drop rows whose raw amount is not negative.
    Exclude,
    /// Keep every row, using the absolute amount.
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFormat {
    /// Raster image, the default.
    Png,
    /// Vector image with text kept as `<text>` elements.
    Svg,
}

impl ChartFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub data_directory: PathBuf,
    pub data_filename: String,
    pub header_rows_to_skip: usize,
    pub field_delimiter: char,
    pub date_column: String,
    pub amount_column: String,
    pub category_column: String,
    pub currency_symbol: String,
    pub date_display_format: String,
    pub report_directory: PathBuf,
    pub report_filename: String,
    pub income_rows: IncomeRows,
    pub chart_format: ChartFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            data_filename: "sample_data.csv".to_string(),
            header_rows_to_skip: 6,
            field_delimiter: ';',
            date_column: "Ημ/νία συναλλαγής".to_string(),
            amount_column: "Ποσό (EUR)".to_string(),
            category_column: "Κατηγορία δαπάνης".to_string(),
            currency_symbol: "€".to_string(),
            date_display_format: "%d/%m/%Y".to_string(),
            report_directory: PathBuf::from("report"),
            report_filename: "report.txt".to_string(),
            income_rows: IncomeRows::Exclude,
            chart_format: ChartFormat::Png,
        }
    }
}

impl ReportConfig {
    pub fn data_path(&self) -> PathBuf {
        self.data_directory.join(&self.data_filename)
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_directory.join(&self.report_filename)
    }

    pub fn from_toml_str(body: &str, origin: &Path) -> ReportResult<Self> {
        let config = toml::from_str::<Self>(body)
            .map_err(|error| ReportError::invalid_config(origin, error.message()))?;
        if !config.field_delimiter.is_ascii() {
            return Err(ReportError::invalid_config(
                origin,
                &format!(
                    "`field_delimiter` must be a single ASCII character, got `{}`",
                    config.field_delimiter
                ),
            ));
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let body = fs::read_to_string(path)
            .map_err(|error| ReportError::invalid_config(path, &error.to_string()))?;
        Self::from_toml_str(&body, path)
    }

    /// Applies the command-line overrides; everything else stays as configured.
    pub fn with_overrides(
        mut self,
        data_filename: Option<String>,
        report_directory: Option<PathBuf>,
    ) -> Self {
        if let Some(value) = data_filename {
            self.data_filename = value;
        }
        if let Some(value) = report_directory {
            self.report_directory = value;
        }
        self
    }
}

/// Resolves the configuration: explicit path, then `OUTLAY_CONFIG`, then
/// `~/.outlay/config.toml` when present, then built-in defaults.
pub fn resolve_config(explicit_path: Option<&Path>) -> ReportResult<ReportConfig> {
    match config_source(explicit_path) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration file");
            ReportConfig::from_file(&path)
        }
        None => Ok(ReportConfig::default()),
    }
}

fn config_source(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    if let Some(from_env) = std::env::var_os(CONFIG_ENV_VAR)
        && !from_env.is_empty()
    {
        return Some(PathBuf::from(from_env));
    }

    let user_default = home::home_dir()?.join(".outlay").join("config.toml");
    user_default.is_file().then_some(user_default)
}
