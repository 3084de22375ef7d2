//! Error types for entity API
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use sea_orm::error::DbErr;

/// Errors while executing operations related to entities.
/// The intent is to categorize errors into two major types:
///  * Errors related to data. Ex DbError::RecordNotFound
///  * Errors related to interactions with the database itself. Ex DbError::Conn
#[derive(Debug, PartialEq)]
pub struct Error {
    // Underlying error emitted from seaORM internals
    pub source: Option<DbErr>,
    // Enum representing which category of error
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // Filter on something that is not a column, naming the offending term
    InvalidQueryTerm(String),
    // Record not found, with a message naming what was missing
    RecordNotFound(String),
    // Record not updated
    RecordNotUpdated,
    // Errors related to interactions with the database itself. Ex DbError::Conn
    SystemError,
}

impl Error {
    pub(crate) fn record_not_found(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound(message.into()),
        }
    }

    pub(crate) fn invalid_query_term(term: &str) -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::InvalidQueryTerm(term.to_string()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.error_kind, &self.source) {
            (EntityApiErrorKind::RecordNotFound(message), _) => write!(f, "{message}"),
            (EntityApiErrorKind::InvalidQueryTerm(term), _) => {
                write!(f, "Cannot filter on unknown field \"{term}\"")
            }
            (_, Some(source)) => write!(f, "{source}"),
            (kind, None) => write!(f, "Entity API Error: {kind:?}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        let error_kind = match &err {
            DbErr::RecordNotFound(message) => EntityApiErrorKind::RecordNotFound(message.clone()),
            DbErr::RecordNotUpdated => EntityApiErrorKind::RecordNotUpdated,
            // Connection, execution and query failures all originate in the database itself
            _ => EntityApiErrorKind::SystemError,
        };

        Error {
            source: Some(err),
            error_kind,
        }
    }
}
