//! Error types for catalog orchestration

use metasync_catalog::{CatalogError, CatalogId};
use std::fmt;
use thiserror::Error;

/// A single failed step of a batch operation
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The catalog could not be resolved
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("catalog {catalog}: failed to list tables of {database}: {source}")]
    List {
        catalog: CatalogId,
        database: String,
        source: CatalogError,
    },

    #[error("catalog {catalog}: failed to read {database}.{table}: {source}")]
    Fetch {
        catalog: CatalogId,
        database: String,
        table: String,
        source: CatalogError,
    },

    #[error("catalog {catalog}: failed to create {database}.{table}: {source}")]
    Create {
        catalog: CatalogId,
        database: String,
        table: String,
        source: CatalogError,
    },

    #[error("catalog {catalog}: failed to drop {database}.{table}: {source}")]
    Drop {
        catalog: CatalogId,
        database: String,
        table: String,
        source: CatalogError,
    },
}

impl ManagerError {
    /// The underlying catalog error
    pub fn catalog_error(&self) -> &CatalogError {
        match self {
            ManagerError::Catalog(source)
            | ManagerError::List { source, .. }
            | ManagerError::Fetch { source, .. }
            | ManagerError::Create { source, .. }
            | ManagerError::Drop { source, .. } => source,
        }
    }
}

/// Ordered collection of the failures of one batch operation
#[derive(Debug, Default)]
pub struct BatchError {
    errors: Vec<ManagerError>,
}

impl BatchError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: impl Into<ManagerError>) {
        self.errors.push(err.into());
    }

    /// Failures in the order they occurred
    pub fn errors(&self) -> &[ManagerError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ManagerError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing was recorded
    pub fn into_result(self) -> Result<(), BatchError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ManagerError> for BatchError {
    fn from(err: ManagerError) -> Self {
        Self { errors: vec![err] }
    }
}

impl From<CatalogError> for BatchError {
    fn from(err: CatalogError) -> Self {
        ManagerError::from(err).into()
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [single] => write!(f, "1 error occurred:\n\t* {}", single),
            errors => {
                write!(f, "{} errors occurred:", errors.len())?;
                for err in errors {
                    write!(f, "\n\t* {}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BatchError {}
