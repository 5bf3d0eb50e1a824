pub mod aggregate;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod load;
pub mod model;
pub mod render;

pub use config::ReportConfig;
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ReportError, ReportResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
