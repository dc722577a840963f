use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::audit::{AuditRequestError, FetchError};
use crate::workflows::enrichment::GenerationError;
use crate::workflows::leads::{LeadRequestError, VerificationError};
use crate::workflows::reports::{RepositoryError, ReportServiceError};
use crate::workflows::usage::UsageLimitError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Audit(AuditRequestError),
    Leads(LeadRequestError),
    Usage(UsageLimitError),
    NotFound(String),
    Repository(RepositoryError),
    Client(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Audit(err) => write!(f, "invalid audit request: {}", err),
            AppError::Leads(err) => write!(f, "invalid lead request: {}", err),
            AppError::Usage(err) => write!(f, "{}", err),
            AppError::NotFound(what) => write!(f, "{} not found", what),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
            AppError::Client(err) => write!(f, "http client error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Audit(err) => Some(err),
            AppError::Leads(err) => Some(err),
            AppError::Usage(err) => Some(err),
            AppError::NotFound(_) => None,
            AppError::Repository(err) => Some(err),
            AppError::Client(err) => Some(&**err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Audit(_) | AppError::Leads(_) => StatusCode::BAD_REQUEST,
            AppError::Usage(UsageLimitError::UnknownPlan(_)) => StatusCode::BAD_REQUEST,
            AppError::Usage(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Repository(_)
            | AppError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AuditRequestError> for AppError {
    fn from(value: AuditRequestError) -> Self {
        Self::Audit(value)
    }
}

impl From<LeadRequestError> for AppError {
    fn from(value: LeadRequestError) -> Self {
        Self::Leads(value)
    }
}

impl From<UsageLimitError> for AppError {
    fn from(value: UsageLimitError) -> Self {
        Self::Usage(value)
    }
}

impl From<ReportServiceError> for AppError {
    fn from(value: ReportServiceError) -> Self {
        match value {
            ReportServiceError::Audit(err) => Self::Audit(err),
            ReportServiceError::Leads(err) => Self::Leads(err),
            ReportServiceError::Usage(err) => Self::Usage(err),
            ReportServiceError::NotFound(id) => Self::NotFound(format!("audit {id}")),
            ReportServiceError::Repository(err) => Self::Repository(err),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        Self::Client(Box::new(value))
    }
}

impl From<GenerationError> for AppError {
    fn from(value: GenerationError) -> Self {
        Self::Client(Box::new(value))
    }
}

impl From<VerificationError> for AppError {
    fn from(value: VerificationError) -> Self {
        Self::Client(Box::new(value))
    }
}
