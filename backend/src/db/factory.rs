//! Repository factory for dependency injection.
//!
//! Selects a repository backend from configuration and hands it out as an
//! `Arc<dyn FullRepository>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{LocalRepository, DEFAULT_MAX_SESSIONS};
use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    /// In-memory local repository
    #[default]
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryType::Local => f.write_str("local"),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use celestial_watch::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, 10_000)?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `max_sessions` bounds how many session records the backend keeps.
    pub fn create(
        repo_type: RepositoryType,
        max_sessions: usize,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        if max_sessions == 0 {
            return Err(RepositoryError::configuration_with_context(
                "max_sessions must be at least 1",
                ErrorContext::new("create_repository")
                    .with_details(format!("type={}, max_sessions=0", repo_type)),
            ));
        }
        match repo_type {
            RepositoryType::Local => Ok(Arc::new(LocalRepository::with_max_sessions(max_sessions))),
        }
    }

    /// Create an in-memory local repository with the default session cap.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::with_max_sessions(DEFAULT_MAX_SESSIONS))
    }
}
