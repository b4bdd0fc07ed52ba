use crate::config::ConfigError;
use crate::roster::RosterError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Failures that stop a command or an HTTP request.
///
/// Data problems inside a roster are not among them; those travel as
/// notices next to the results.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Roster(RosterError),
}

impl AppError {
    /// Unreadable uploads are the caller's fault, everything else is ours.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Roster(RosterError::Csv(_)) => StatusCode::BAD_REQUEST,
            AppError::Roster(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "invalid configuration: {err}"),
            AppError::Telemetry(err) => write!(f, "logging setup failed: {err}"),
            AppError::Io(err) => write!(f, "file access failed: {err}"),
            AppError::Roster(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Roster(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<TelemetryError> for AppError {
    fn from(err: TelemetryError) -> Self {
        Self::Telemetry(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}
