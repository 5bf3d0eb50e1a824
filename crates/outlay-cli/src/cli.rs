use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const REPORT_AFTER_HELP: &str = "\
Input:
  The export is read from `data_directory/data_filename` (default
  `data/sample_data.csv`). The first `header_rows_to_skip` lines are
  skipped, then the header row names the date, amount and category
  columns. Amounts may use a decimal comma.

Output:
  `report_directory/report_filename` plus five charts in the same
  directory. Use --dry-run to print the report without writing files.

Configuration:
  --config <path>, then $OUTLAY_CONFIG, then ~/.outlay/config.toml,
  then built-in defaults. Set OUTLAY_LOG=debug for diagnostics on stderr.
";

#[derive(Debug, Parser)]
#[command(
    name = "outlay",
    version,
    about = "Expenditure reports and charts from bank exports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize the export into a text report and charts
    #[command(after_help = REPORT_AFTER_HELP)]
    Report {
        /// Input file name inside the configured data directory
        #[arg(long, value_name = "NAME")]
        data_filename: Option<String>,
        /// Directory receiving the report and charts
        #[arg(long = "report-dir", value_name = "DIR")]
        report_dir: Option<PathBuf>,
        /// Configuration file to use instead of the default lookup
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Print the report without writing any files
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_report_with_all_flags() {
        let parsed = parse_from([
            "outlay",
            "report",
            "--data-filename",
            "march.csv",
            "--report-dir",
            "out",
            "--config",
            "outlay.toml",
            "--dry-run",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let Commands::Report {
                data_filename,
                report_dir,
                config,
                dry_run,
                json,
            } = cli.command;
            assert_eq!(data_filename.as_deref(), Some("march.csv"));
            assert_eq!(report_dir, Some(PathBuf::from("out")));
            assert_eq!(config, Some(PathBuf::from("outlay.toml")));
            assert!(dry_run);
            assert!(json);
        }
    }

    #[test]
    fn parse_report_defaults() {
        let parsed = parse_from(["outlay", "report"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Report {
                    data_filename: None,
                    report_dir: None,
                    config: None,
                    dry_run: false,
                    json: false,
                }
            ));
        }
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let parsed = parse_from(["outlay", "report", "--bogus"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::UnknownArgument);
        }
    }

    #[test]
    fn report_dir_requires_a_value() {
        let parsed = parse_from(["outlay", "report", "--report-dir"]);
        assert!(parsed.is_err());
    }
}
