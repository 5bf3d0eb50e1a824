use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ReportError, ReportResult};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

/// Error payload printed by `--json` runs: `{"error": {...}}`, no `ok` flag.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    /// Row or path details, when the error carries them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

pub fn success<T>(command: &str, data: T) -> ReportResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| ReportError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data: json_data,
    })
}

pub fn failure_from_error(error: &ReportError) -> FailureEnvelope {
    FailureEnvelope {
        error: ErrorBody {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
            data: error.data.clone(),
        },
    }
}
