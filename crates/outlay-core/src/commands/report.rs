use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::aggregate::summarize;
use crate::config::resolve_config;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ReportData, SummaryData};
use crate::load::load_dataset;
use crate::model::ReportSummary;
use crate::render::{chart_kinds, render_chart, render_report};
use crate::{ReportConfig, ReportError, ReportResult};

const STAGING_PREFIX: &str = ".outlay-staging-";

#[derive(Debug, Default)]
pub struct ReportRunOptions<'a> {
    pub data_filename: Option<String>,
    pub report_directory: Option<PathBuf>,
    pub config_path: Option<&'a Path>,
    pub dry_run: bool,
}

/// Runs the whole pipeline. With `dry_run` the rendered report comes back in
/// the envelope and nothing touches the filesystem.
pub fn run(options: ReportRunOptions<'_>) -> ReportResult<SuccessEnvelope> {
    let config = resolve_config(options.config_path)?
        .with_overrides(options.data_filename, options.report_directory);

    let dataset = load_dataset(&config)?;
    let summary = summarize(&dataset)?;
    let report_text = render_report(&summary, &config);

    let mut data = ReportData {
        dry_run: options.dry_run,
        data_path: config.data_path().display().to_string(),
        report_path: None,
        report_directory: None,
        chart_paths: Vec::new(),
        transactions: dataset.len(),
        summary: SummaryData::from(&summary),
        report_text,
    };

    if !options.dry_run {
        let published = publish(&summary, &data.report_text, &config)?;
        data.report_path = Some(published.report_path.display().to_string());
        data.report_directory = Some(config.report_directory.display().to_string());
        data.chart_paths = published
            .chart_paths
            .iter()
            .map(|path| path.display().to_string())
            .collect();
    }

    success("report", data)
}

#[derive(Debug)]
struct Published {
    report_path: PathBuf,
    chart_paths: Vec<PathBuf>,
}

/// Renders every artifact into a staging directory inside the report
/// directory, then renames each one into place. The staging directory is
/// removed when it goes out of scope, on success and on error alike.
fn publish(
    summary: &ReportSummary,
    report_text: &str,
    config: &ReportConfig,
) -> ReportResult<Published> {
    let report_dir = &config.report_directory;
    fs::create_dir_all(report_dir)
        .map_err(|error| ReportError::write_failed(report_dir, &error.to_string()))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(report_dir)
        .map_err(|error| ReportError::write_failed(report_dir, &error.to_string()))?;
    tracing::debug!(staging = %staging.path().display(), "staging report artifacts");

    let mut staged = Vec::new();
    staged.push(stage_report(&staging, report_text, config)?);
    for kind in chart_kinds(summary) {
        let file_name = kind.file_name(config.chart_format);
        let staged_path = staging.path().join(&file_name);
        render_chart(kind, summary, config, &staged_path)?;
        staged.push((staged_path, report_dir.join(file_name)));
    }

    let mut final_paths = Vec::with_capacity(staged.len());
    for (from, to) in staged {
        fs::rename(&from, &to)
            .map_err(|error| ReportError::write_failed(&to, &error.to_string()))?;
        final_paths.push(to);
    }

    let report_path = final_paths.remove(0);
    tracing::info!(
        report = %report_path.display(),
        charts = final_paths.len(),
        "report artifacts published"
    );

    Ok(Published {
        report_path,
        chart_paths: final_paths,
    })
}

fn stage_report(
    staging: &TempDir,
    report_text: &str,
    config: &ReportConfig,
) -> ReportResult<(PathBuf, PathBuf)> {
    let staged_path = staging.path().join(&config.report_filename);
    fs::write(&staged_path, report_text)
        .map_err(|error| ReportError::write_failed(&staged_path, &error.to_string()))?;
    Ok((staged_path, config.report_path()))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{ReportRunOptions, STAGING_PREFIX, run};

    const SAMPLE: &str = "Bank export\nAccount: 123\n\n\n\nGenerated\n\
Ημ/νία συναλλαγής;Ποσό (EUR);Κατηγορία δαπάνης\n\
10/01/2024;-10,00;Food\n\
20/01/2024;-5,00;Food\n\
01/02/2024;-20,00;Transport\n\
15/01/2024;1500,00;Salary\n";

    fn write_config(dir: &Path, data_file: &str) -> Option<std::path::PathBuf> {
        let data_dir = dir.join("data");
        fs::create_dir_all(&data_dir).ok()?;
        fs::write(data_dir.join(data_file), SAMPLE).ok()?;

        let config_path = dir.join("outlay.toml");
        let body = format!(
            "data_directory = {:?}\nreport_directory = {:?}\n",
            data_dir.display().to_string(),
            dir.join("report").display().to_string()
        );
        fs::write(&config_path, body).ok()?;
        Some(config_path)
    }

    #[test]
    fn dry_run_touches_nothing() {
        let temp = tempfile::tempdir();
        assert!(temp.is_ok());
        let Ok(temp) = temp else {
            return;
        };
        let config_path = write_config(temp.path(), "sample_data.csv");
        assert!(config_path.is_some());
        let Some(config_path) = config_path else {
            return;
        };

        let result = run(ReportRunOptions {
            config_path: Some(&config_path),
            dry_run: true,
            ..ReportRunOptions::default()
        });
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.command, "report");
            assert_eq!(envelope.data["summary"]["total_expenditure"], 35.0);
            assert!(envelope.data.get("report_path").is_none());
        }
        assert!(!temp.path().join("report").exists());
    }

    #[test]
    fn publish_leaves_no_staging_directory() {
        let temp = tempfile::tempdir();
        assert!(temp.is_ok());
        let Ok(temp) = temp else {
            return;
        };
        let Some(config_path) = write_config(temp.path(), "sample_data.csv") else {
            return;
        };

        let result = run(ReportRunOptions {
            config_path: Some(&config_path),
            ..ReportRunOptions::default()
        });
        assert!(result.is_ok());

        let entries = fs::read_dir(temp.path().join("report"));
        assert!(entries.is_ok());
        if let Ok(entries) = entries {
            let names = entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .collect::<Vec<String>>();
            assert_eq!(names.len(), 6);
            assert!(names.iter().all(|name| !name.starts_with(STAGING_PREFIX)));
        }
    }
}
