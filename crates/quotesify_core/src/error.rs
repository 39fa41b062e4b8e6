//! Command error taxonomy.
//!
//! Every variant is recoverable at the command boundary: the shell reports it
//! and reads the next line.

use crate::list::{ListError, ListKind};
use crate::registry::RegistryError;
use thiserror::Error;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no {kind} found: {key}")]
    NotFound { kind: ListKind, key: String },

    #[error("no {kind} `{key}` tagged as [{category}]")]
    NotTagged {
        kind: ListKind,
        key: String,
        category: String,
    },

    #[error("book `{0}` has already been rated")]
    DuplicateRating(String),

    #[error("book `{0}` already exists")]
    DuplicateBook(String),

    #[error("rating score {0} is outside 1..=5")]
    InvalidScore(i64),

    #[error("`{0}` is not a valid number")]
    InvalidNumberFormat(String),

    #[error("{kind} number {index} does not exist")]
    InvalidIndex { kind: ListKind, index: i64 },

    #[error("quote number {0} does not exist")]
    InvalidQuoteIndex(i64),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("category [{0}] already exists")]
    CategoryNameCollision(String),

    #[error("category name `{0}` must be a single word")]
    InvalidCategoryName(String),

    #[error("unknown entity type `{0}`")]
    UnknownEntityType(String),

    #[error("`{verb}` is not supported for {kind}")]
    UnsupportedOperation { verb: &'static str, kind: ListKind },

    #[error("configuration error: {0}")]
    Configuration(#[from] RegistryError),
}

impl CommandError {
    pub fn not_found(kind: ListKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Stable snake_case code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::NotTagged { .. } => "not_tagged",
            Self::DuplicateRating(_) => "duplicate_rating",
            Self::DuplicateBook(_) => "duplicate_book",
            Self::InvalidScore(_) => "invalid_score",
            Self::InvalidNumberFormat(_) => "invalid_number_format",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::InvalidQuoteIndex(_) => "invalid_quote_index",
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::CategoryNameCollision(_) => "category_name_collision",
            Self::InvalidCategoryName(_) => "invalid_category_name",
            Self::UnknownEntityType(_) => "unknown_entity_type",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::Configuration(_) => "configuration",
        }
    }
}

impl From<ListError> for CommandError {
    fn from(value: ListError) -> Self {
        match value {
            ListError::OutOfRange { kind, index, .. } => Self::InvalidIndex {
                kind,
                index: i64::try_from(index).map_or(i64::MAX, |index| index + 1),
            },
        }
    }
}
