//! Application error types.

use thiserror::Error;

use crate::models::{DeclarationKind, TypeRefError};

/// Errors raised while generating components.
#[derive(Error, Debug)]
pub enum AppError {
    // Declaration errors
    #[error("SharpComponent annotation applies only to classes! Cannot be used with '{name}' ({kind})")]
    InvalidTarget { name: String, kind: DeclarationKind },

    #[error("Invalid scope on '{name}': {reason}")]
    MalformedScope { name: String, reason: String },

    #[error("Cannot resolve type '{reference}': {reason}")]
    UnresolvedType { reference: String, reason: String },

    // Output errors
    #[error("Could not write '{name}': {source}")]
    Persistence {
        name: String,
        #[source]
        source: std::io::Error,
    },

    // Run setup errors
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Invalid declaration manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Errors that stop the whole batch rather than a single declaration.
    pub fn aborts_batch(&self) -> bool {
        matches!(
            self,
            AppError::InvalidTarget { .. } | AppError::Initialization(_)
        )
    }
}

impl From<TypeRefError> for AppError {
    fn from(err: TypeRefError) -> Self {
        let reference = match &err {
            TypeRefError::InvalidSyntax { literal, .. } => literal.clone(),
            TypeRefError::Empty(literal) => literal.clone(),
            TypeRefError::OutsidePackage { literal, .. } => literal.clone(),
        };
        AppError::UnresolvedType {
            reference,
            reason: err.to_string(),
        }
    }
}
