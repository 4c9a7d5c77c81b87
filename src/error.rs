use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum FlatshareError {
    #[error("Please log in first")]
    AuthRequired,

    #[error("Occupied flat name")]
    DuplicateFlatName,

    #[error("Existing member name")]
    DuplicateMemberName,

    #[error("Unknown flat name")]
    UnknownFlat,

    #[error("Unmatched password")]
    InvalidCredentials,

    #[error("Please input a number in amount")]
    InvalidAmount,

    #[error("Unrecognized country code: {0}")]
    UnrecognizedCountryCode(String),

    #[error("Unknown member for this flat")]
    UnknownMember,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Figment error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl FlatshareError {
    /// User-facing text for failures that are rendered inline on the page
    /// instead of aborting the request. `None` for infrastructure errors.
    pub fn advisory(&self) -> Option<String> {
        match self {
            FlatshareError::AuthRequired
            | FlatshareError::DuplicateFlatName
            | FlatshareError::DuplicateMemberName
            | FlatshareError::UnknownFlat
            | FlatshareError::InvalidCredentials
            | FlatshareError::InvalidAmount
            | FlatshareError::UnrecognizedCountryCode(_)
            | FlatshareError::UnknownMember => Some(self.to_string()),
            _ => None,
        }
    }
}

impl From<figment::Error> for FlatshareError {
    fn from(e: figment::Error) -> Self {
        FlatshareError::Figment(Box::new(e))
    }
}

impl IntoResponse for FlatshareError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            FlatshareError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Please log in first".to_string(),
                },
            ),
            FlatshareError::DuplicateFlatName | FlatshareError::DuplicateMemberName => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".to_string(),
                    message: self.to_string(),
                },
            ),
            FlatshareError::UnknownFlat | FlatshareError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message: self.to_string(),
                },
            ),
            FlatshareError::InvalidAmount
            | FlatshareError::UnrecognizedCountryCode(_)
            | FlatshareError::UnknownMember => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: self.to_string(),
                },
            ),
            FlatshareError::DatabaseError(_)
            | FlatshareError::JsonError(_)
            | FlatshareError::PasswordHash(_)
            | FlatshareError::ConfigError(_)
            | FlatshareError::Figment(_)
            | FlatshareError::Io(_)
            | FlatshareError::TaskJoin(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_carry_an_advisory() {
        assert_eq!(
            FlatshareError::AuthRequired.advisory().as_deref(),
            Some("Please log in first")
        );
        assert_eq!(
            FlatshareError::UnrecognizedCountryCode("fr".into())
                .advisory()
                .as_deref(),
            Some("Unrecognized country code: fr")
        );
    }

    #[test]
    fn infrastructure_errors_have_no_advisory() {
        assert!(FlatshareError::PasswordHash("boom".into()).advisory().is_none());
        assert!(
            FlatshareError::DatabaseError(SqlxError::RowNotFound)
                .advisory()
                .is_none()
        );
    }

    #[test]
    fn auth_required_maps_to_401() {
        let resp = FlatshareError::AuthRequired.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
