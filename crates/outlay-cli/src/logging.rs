use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "OUTLAY_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. Stdout stays reserved for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
