//! Structured error code system for rental platform servers.
//!
//! Error codes follow the pattern: `RENTAL_{SERVICE}_{ERROR}`
//!
//! Examples:
//! - `RENTAL_AUTH_EMAIL_CONFLICT`
//! - `RENTAL_PROPERTY_NOT_FOUND`
//! - `RENTAL_LEASING_VALIDATION_FAILED`
//!
//! Each error includes a machine-readable code, human-readable message,
//! a unique request ID for tracing, and optional structured details.

use serde::Serialize;

/// ErrorCode represents a structured error code.
///
/// Error codes follow the `RENTAL_{SERVICE}_{ERROR}` naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode(String);

impl ErrorCode {
    /// Create a new error code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create a standard "not found" error code for a service.
    pub fn not_found(service: &str) -> Self {
        Self(format!("RENTAL_{}_NOT_FOUND", service.to_uppercase()))
    }

    /// Create a standard "validation failed" error code for a service.
    pub fn validation(service: &str) -> Self {
        Self(format!("RENTAL_{}_VALIDATION_FAILED", service.to_uppercase()))
    }

    pub fn internal(service: &str) -> Self {
        Self(format!("RENTAL_{}_INTERNAL_ERROR", service.to_uppercase()))
    }

    pub fn conflict(service: &str) -> Self {
        Self(format!("RENTAL_{}_CONFLICT", service.to_uppercase()))
    }

    /// Create a standard "store unavailable" error code for a service.
    pub fn store_unavailable(service: &str) -> Self {
        Self(format!("RENTAL_{}_STORE_UNAVAILABLE", service.to_uppercase()))
    }

    /// Return the error code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ErrorCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// ErrorDetail provides additional context for an error field.
///
/// `{ "field": "monthly_rent", "reason": "range", "message": "..." }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub field: String,
    pub reason: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(
        field: impl Into<String>,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// validator のフィールドエラーを ErrorDetail の一覧に変換する。
    #[cfg(feature = "validation")]
    pub fn from_validation(errors: &validator::ValidationErrors) -> Vec<Self> {
        let mut details: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{} is invalid", field), ToString::to_string);
                    Self::new(field.to_string(), e.code.to_string(), message)
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        details
    }
}

/// ErrorBody is the structured error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// ErrorResponse wraps ErrorBody in an `{ "error": ... }` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Create a new error response with code and message.
    pub fn new(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self::with_details(code, message, vec![])
    }

    /// Create a new error response with code, message, and details.
    pub fn with_details(
        code: impl Into<ErrorCode>,
        message: impl Into<String>,
        details: Vec<ErrorDetail>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                request_id: uuid::Uuid::new_v4().to_string(),
                details,
            },
        }
    }
}

/// ServiceError is a high-level error type that maps to HTTP status codes.
///
/// 401 / 403 are produced by the rental-auth middleware, not by this type.
/// When the `axum` feature is enabled, ServiceError implements `IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// 404 Not Found
    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    /// 400 Bad Request
    #[error("{message}")]
    BadRequest {
        code: ErrorCode,
        message: String,
        details: Vec<ErrorDetail>,
    },

    /// 409 Conflict
    #[error("{message}")]
    Conflict { code: ErrorCode, message: String },

    /// 500 Internal Server Error
    #[error("{message}")]
    Internal { code: ErrorCode, message: String },

    /// 503 Service Unavailable
    #[error("{message}")]
    ServiceUnavailable { code: ErrorCode, message: String },
}

impl ServiceError {
    pub fn not_found(service: &str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: ErrorCode::not_found(service),
            message: message.into(),
        }
    }

    pub fn bad_request(service: &str, message: impl Into<String>) -> Self {
        Self::bad_request_with_details(service, message, vec![])
    }

    /// Create a BadRequest error with field-level details.
    pub fn bad_request_with_details(
        service: &str,
        message: impl Into<String>,
        details: Vec<ErrorDetail>,
    ) -> Self {
        Self::BadRequest {
            code: ErrorCode::validation(service),
            message: message.into(),
            details,
        }
    }

    /// validator の検証結果から BadRequest を生成する。
    #[cfg(feature = "validation")]
    pub fn from_validation(service: &str, errors: &validator::ValidationErrors) -> Self {
        Self::bad_request_with_details(
            service,
            "validation failed",
            ErrorDetail::from_validation(errors),
        )
    }

    pub fn conflict(service: &str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: ErrorCode::conflict(service),
            message: message.into(),
        }
    }

    pub fn internal(service: &str, message: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::internal(service),
            message: message.into(),
        }
    }

    /// Create a ServiceUnavailable error for an unreachable backing store.
    pub fn store_unavailable(service: &str, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            code: ErrorCode::store_unavailable(service),
            message: message.into(),
        }
    }

    /// 既定コードを差し替える。
    #[must_use]
    pub fn with_code(mut self, new_code: ErrorCode) -> Self {
        match &mut self {
            ServiceError::NotFound { code, .. }
            | ServiceError::BadRequest { code, .. }
            | ServiceError::Conflict { code, .. }
            | ServiceError::Internal { code, .. }
            | ServiceError::ServiceUnavailable { code, .. } => *code = new_code,
        }
        self
    }

    /// Return the error code.
    pub fn code(&self) -> &ErrorCode {
        match self {
            ServiceError::NotFound { code, .. }
            | ServiceError::BadRequest { code, .. }
            | ServiceError::Conflict { code, .. }
            | ServiceError::Internal { code, .. }
            | ServiceError::ServiceUnavailable { code, .. } => code,
        }
    }

    /// Convert to an ErrorResponse.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ServiceError::NotFound { code, message }
            | ServiceError::Conflict { code, message }
            | ServiceError::Internal { code, message }
            | ServiceError::ServiceUnavailable { code, message } => {
                ErrorResponse::new(code.clone(), message.clone())
            }
            ServiceError::BadRequest {
                code,
                message,
                details,
            } => ErrorResponse::with_details(code.clone(), message.clone(), details.clone()),
        }
    }
}

// --- axum integration ---

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ServiceError::NotFound { .. } => axum::http::StatusCode::NOT_FOUND,
            ServiceError::BadRequest { .. } => axum::http::StatusCode::BAD_REQUEST,
            ServiceError::Conflict { .. } => axum::http::StatusCode::CONFLICT,
            ServiceError::Internal { .. } => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ServiceUnavailable { .. } => {
                axum::http::StatusCode::SERVICE_UNAVAILABLE
            }
        };

        if status.is_server_error() {
            tracing::error!(code = %self.code(), error = %self, "request failed");
        }

        let body = self.to_error_response();
        (status, axum::Json(body)).into_response()
    }
}

// --- Well-known error codes for rental services ---

/// Well-known error codes for the Auth service.
pub mod auth {
    use super::ErrorCode;

    pub fn email_conflict() -> ErrorCode {
        ErrorCode::new("RENTAL_AUTH_EMAIL_CONFLICT")
    }

    pub fn invalid_credentials() -> ErrorCode {
        ErrorCode::new("RENTAL_AUTH_INVALID_CREDENTIALS")
    }

    pub fn role_not_allowed() -> ErrorCode {
        ErrorCode::new("RENTAL_AUTH_ROLE_NOT_ALLOWED")
    }

    pub fn user_not_found() -> ErrorCode {
        ErrorCode::new("RENTAL_AUTH_USER_NOT_FOUND")
    }
}

/// Well-known error codes for the Property service.
pub mod property {
    use super::ErrorCode;

    pub fn property_not_found() -> ErrorCode {
        ErrorCode::new("RENTAL_PROPERTY_NOT_FOUND")
    }

    pub fn unit_not_found() -> ErrorCode {
        ErrorCode::new("RENTAL_PROPERTY_UNIT_NOT_FOUND")
    }
}

/// Well-known error codes for the Leasing service.
pub mod leasing {
    use super::ErrorCode;

    pub fn lease_not_found() -> ErrorCode {
        ErrorCode::new("RENTAL_LEASING_LEASE_NOT_FOUND")
    }

    pub fn payment_not_found() -> ErrorCode {
        ErrorCode::new("RENTAL_LEASING_PAYMENT_NOT_FOUND")
    }

    pub fn invalid_period() -> ErrorCode {
        ErrorCode::new("RENTAL_LEASING_INVALID_PERIOD")
    }
}
