//! Repository traits for injected application state.
//!
//! The celestial computations are pure; the only mutable state the service
//! owns is visit tracking, kept behind these traits so callers never touch
//! ambient storage directly.

pub mod error;
pub mod visits;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use visits::VisitRepository;

use async_trait::async_trait;

/// Every repository capability the HTTP layer needs.
///
/// Implementations must be `Send + Sync` so they can sit in an `Arc` shared
/// across handlers.
#[async_trait]
pub trait FullRepository: VisitRepository + Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Short backend name for diagnostics, e.g. `"local"`.
    fn backend_name(&self) -> &'static str;
}
