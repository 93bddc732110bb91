//! Visit repository trait.
//!
//! Stores one [`VisitRecord`] per browser session. Session rollover policy is
//! decided by the caller (`services::visits`); the repository only reads and
//! increments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::VisitRecord;

#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Fetch the record for a session.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - The session exists
    /// * `Ok(None)` - Unknown session id
    async fn get_visit(&self, session_id: &str) -> RepositoryResult<Option<VisitRecord>>;

    /// Record a page view in an existing session: bump `last_visit` and add
    /// the page if unseen.
    ///
    /// # Errors
    /// `NotFound` if the session does not exist.
    async fn touch_visit(
        &self,
        session_id: &str,
        page: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<VisitRecord>;

    /// Open a new session with `total_visits = previous_total + 1`.
    ///
    /// # Returns
    /// The stored record, with its allocated id.
    async fn start_session(
        &self,
        session_id: &str,
        previous_total: u64,
        page: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<VisitRecord>;

    /// Number of sessions ever started.
    async fn total_visits(&self) -> RepositoryResult<u64>;

    /// Most recently active sessions first.
    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<VisitRecord>>;
}
