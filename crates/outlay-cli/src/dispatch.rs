use outlay_core::commands::report::{self, ReportRunOptions};
use outlay_core::{ReportResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ReportResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Report {
            data_filename,
            report_dir,
            config,
            dry_run,
            json: _,
        } => report::run(ReportRunOptions {
            data_filename: data_filename.clone(),
            report_directory: report_dir.clone(),
            config_path: config.as_deref(),
            dry_run: *dry_run,
        }),
    }
}
