//! Injected state store for the service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / services::visits                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │  Arc<dyn FullRepository>
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/) - abstract interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! Repositories are created by [`RepositoryFactory`] and passed down
//! explicitly; there is no process-wide instance.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{LocalRepository, DEFAULT_MAX_SESSIONS};
pub use repository::{
    ErrorContext, FullRepository, RepositoryError, RepositoryResult, VisitRepository,
};
