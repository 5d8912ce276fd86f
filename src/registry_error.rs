use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use sled::Error as SledError;

/// A single violated field constraint, keyed by the document field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryError {
    /// One or more field constraints failed. Always carries the complete
    /// set of violations, never just the first one.
    Validation(Vec<FieldError>),
    /// A write would break a registry-wide invariant. `existing_id` names
    /// the record that already holds the contested position.
    Conflict { code: String, existing_id: String },
    Store(String),
    Serialization(String),
    NotFound(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            RegistryError::Conflict { code, existing_id } => {
                write!(f, "Conflict ({}): existing record {}", code, existing_id)
            }
            RegistryError::Store(msg) => write!(f, "Store error: {}", msg),
            RegistryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            RegistryError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<SledError> for RegistryError {
    fn from(err: SledError) -> Self {
        match err {
            SledError::Io(io_err) => RegistryError::Store(format!("IO error: {}", io_err)),
            SledError::Corruption { .. } => {
                RegistryError::Store("database is corrupted".to_string())
            }
            other => RegistryError::Store(format!("database error: {}", other)),
        }
    }
}

impl From<SerdeError> for RegistryError {
    fn from(err: SerdeError) -> Self {
        RegistryError::Serialization(format!("JSON serialization error: {}", err))
    }
}

impl RegistryError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        RegistryError::Validation(errors)
    }

    /// True when the error is the per-field kind a form can render inline.
    pub fn is_validation(&self) -> bool {
        matches!(self, RegistryError::Validation(_))
    }
}
