//! Domain error types.

use std::fmt;

/// A single rejected request field, addressed the way the request spells it
/// (`filter[1].operator`, `sort[0].property`, `pageSize`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field-level failure found while validating one search request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Failure to turn a raw comparison string into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueParseError {
    #[error("value must not be empty")]
    Empty,

    #[error("null is not allowed here")]
    NullNotAllowed,

    #[error("'{raw}' is not a valid {expected}")]
    Invalid { expected: &'static str, raw: String },
}

/// Failures raised while composing a predicate or ordering from clauses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no filter registered for {property} {operator}")]
    UnregisteredFilter { property: String, operator: String },

    #[error("unknown sort property '{property}'")]
    UnknownSortProperty { property: String },

    #[error(transparent)]
    Value(#[from] ValueParseError),
}

/// Top-level error type for tradejournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid search request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("internal error: {reason}")]
    Internal { reason: String },

    #[error("trade import error at record {record}: {reason}")]
    TradeImport { record: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<QueryError> for JournalError {
    fn from(err: QueryError) -> Self {
        JournalError::Internal {
            reason: err.to_string(),
        }
    }
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. }
            | JournalError::ConfigMissing { .. }
            | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Database { .. } | JournalError::DatabaseQuery { .. } => 3,
            JournalError::Validation(_) => 4,
            JournalError::TradeImport { .. } => 5,
            JournalError::Internal { .. } => 70,
        };
        std::process::ExitCode::from(code)
    }
}
