//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field holds the original error that caused
/// the domain error. `web` depends on `domain` but never directly on `entity_api`,
/// so every error crossing into this layer is translated here and `web` maps the
/// resulting kinds to HTTP status codes.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Config,
    Other(String),
}

/// Errors bubbling up from `entity_api`, reduced to the kinds the callers of
/// `domain` care about.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound(String),
    Invalid,
    DbTransaction,
    Other(String),
}

/// Errors raised while talking to a service outside the process, i.e. the LLM API.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    RateLimited,
    InvalidResponse(String),
    Other(String),
}

impl Error {
    pub(crate) fn config(message: &str) -> Self {
        Error {
            source: Some(message.into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }

    pub(crate) fn external(error_kind: ExternalErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(error_kind),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.error_kind == DomainErrorKind::External(ExternalErrorKind::RateLimited)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound(
                message,
            ))) => write!(f, "{message}"),
            DomainErrorKind::Internal(InternalErrorKind::Other(message))
            | DomainErrorKind::External(ExternalErrorKind::Other(message))
            | DomainErrorKind::External(ExternalErrorKind::InvalidResponse(message)) => {
                write!(f, "{message}")
            }
            _ => match &self.source {
                Some(source) => write!(f, "{source}"),
                None => write!(f, "Domain Error: {:?}", self.error_kind),
            },
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match &err.error_kind {
            EntityApiErrorKind::RecordNotFound(message) => {
                EntityErrorKind::NotFound(message.clone())
            }
            EntityApiErrorKind::InvalidQueryTerm(_) => EntityErrorKind::Invalid,
            EntityApiErrorKind::SystemError => EntityErrorKind::DbTransaction,
            EntityApiErrorKind::RecordNotUpdated => EntityErrorKind::Other(err.to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // A body that arrived but could not be decoded is the remote side's fault,
        // not the network's.
        } else if err.is_decode() {
            let message = err.to_string();
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::InvalidResponse(message)),
            }
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::InvalidResponse(message)),
        }
    }
}
