use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

/// A domain error on its way out to the client, optionally with the text the
/// client should see in place of the error's own message.
#[derive(Debug)]
pub struct Error {
    error: DomainError,
    detail: Option<String>,
}

impl Error {
    /// Replaces the client facing message with `prefix: <error message>` for
    /// errors that become a 500.
    pub(crate) fn with_detail_prefix(mut self, prefix: &str) -> Self {
        self.detail = Some(format!("{prefix}: {}", self.error));
        self
    }

    fn status_code(&self) -> StatusCode {
        match &self.error.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
                    EntityErrorKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
                    EntityErrorKind::DbTransaction | EntityErrorKind::Other(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                },
                InternalErrorKind::Config | InternalErrorKind::Other(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Network => StatusCode::BAD_GATEWAY,
                ExternalErrorKind::RateLimited
                | ExternalErrorKind::InvalidResponse(_)
                | ExternalErrorKind::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        match &self.detail {
            Some(detail) => write!(fmt, "{detail}"),
            None => write!(fmt, "{}", self.error),
        }
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let detail = match (&self.detail, status_code) {
            (Some(detail), _) => detail.clone(),
            (None, StatusCode::NOT_FOUND) => self.error.to_string(),
            (None, status_code) => status_code
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };

        if status_code.is_server_error() {
            error!("{status_code}: {:?}", self.error);
        } else {
            debug!("{status_code}: {detail}");
        }

        (status_code, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            detail: None,
        }
    }
}
