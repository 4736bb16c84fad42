use crate::builder::FormField;

/// A locally detected problem with an entry draft.
///
/// These block submission and are shown inline on the entry form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(FormField),
    #[error("{field} is invalid: {reason}")]
    Invalid { field: FormField, reason: String },
}

impl ValidationError {
    /// The form field the error is attached to.
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::Invalid { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("invalid entry: {0}")]
    Validation(#[from] ValidationError),
    /// A kind tag outside the closed set of entry kinds. Only reachable from untyped input.
    #[error("unknown entry type: {0}")]
    UnknownKind(String),
}

pub type EntryResult<T> = std::result::Result<T, EntryError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidSeconds { var: &'static str, value: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
