//!
//! Common Errors.
//!
use std::fmt;

use crate::types::DbType;

pub type Result<T> = std::result::Result<T, HuskyError>;

#[derive(Debug, Clone, PartialEq)]
pub enum HuskyError {
    /// The dialect has no rendering for the requested operation.
    UnsupportedSyntax {
        dialect: String,
        operation: String,
    },
    /// A convert/column request named a DbType outside the dialect's table.
    UnknownDbType {
        operation: String,
        db_type: DbType,
    },
    /// No driver candidate could be resolved for the provider.
    MissingDriver(String),
    InvalidConfig(String),
    SchemaError(String),
    DataError(String),
}

impl HuskyError {
    pub fn unsupported<D: Into<String>, O: Into<String>>(dialect: D, operation: O) -> Self {
        let dialect = dialect.into();
        let operation = operation.into();
        Self::UnsupportedSyntax { dialect, operation }
    }

    pub fn unknown_db_type<O: Into<String>>(operation: O, db_type: DbType) -> Self {
        let operation = operation.into();
        Self::UnknownDbType { operation, db_type }
    }

    pub fn missing_driver<P: Into<String>>(provider: P) -> Self {
        Self::MissingDriver(provider.into())
    }

    pub fn invalid_config<M: Into<String>>(message: M) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn schema_error<M: Into<String>>(message: M) -> Self {
        Self::SchemaError(message.into())
    }

    pub fn data_error<M: Into<String>>(message: M) -> Self {
        Self::DataError(message.into())
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, HuskyError::UnsupportedSyntax { .. })
    }
}

impl fmt::Display for HuskyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HuskyError::UnsupportedSyntax { dialect, operation } => {
                write!(f, "Syntax Not Supported: `{}` on dialect `{}`", operation, dialect)
            }
            HuskyError::UnknownDbType { operation, db_type } => {
                write!(f, "Unknown DbType: `{}` passed to `{}`", db_type, operation)
            }
            HuskyError::MissingDriver(provider) => {
                write!(f, "Missing Driver: no factory candidate resolved for provider `{}`", provider)
            }
            HuskyError::InvalidConfig(err) => write!(f, "Invalid Config: {}", err),
            HuskyError::SchemaError(err) => write!(f, "Schema Error: {}", err),
            HuskyError::DataError(err) => write!(f, "Data Error: {}", err),
        }
    }
}

impl std::error::Error for HuskyError {}

impl From<serde_json::Error> for HuskyError {
    fn from(err: serde_json::Error) -> Self {
        HuskyError::InvalidConfig(err.to_string())
    }
}
