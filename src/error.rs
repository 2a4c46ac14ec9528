use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnuaireError {
    #[error("{resource} non trouvée avec l'ID : {id}")]
    NotFound { resource: &'static str, id: i64 },
    #[error("{0}")]
    Validation(String),
    #[error("Validation Failed")]
    Schema(HashMap<String, String>),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, AnnuaireError>;

impl AnnuaireError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { resource: "Personne", id }
    }

    /// Classification consumed by error-reporting layers (REST today, a
    /// GraphQL resolver tomorrow): NOT_FOUND, BAD_REQUEST or INTERNAL.
    pub fn classification(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) | Self::Schema(_) => "BAD_REQUEST",
            _ => "INTERNAL",
        }
    }
}

// Helper conversions
impl From<rusqlite::Error> for AnnuaireError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
