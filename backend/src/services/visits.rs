//! Visit and session tracking.
//!
//! A visitor identifies itself with the session id it was last given. When
//! that session has been idle for more than 30 minutes, or is unknown, a new
//! session is opened with a fresh id and the visit counter is incremented.

use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::VisitRecord;

/// Page recorded when the caller does not name one.
pub const DEFAULT_PAGE: &str = "/";

const MAX_PAGE_LEN: usize = 256;

/// Session bookkeeping on top of an injected repository.
#[derive(Clone)]
pub struct VisitTracker {
    repository: Arc<dyn FullRepository>,
}

impl VisitTracker {
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self { repository }
    }

    /// Record a page view at the current time.
    pub async fn track_visit(
        &self,
        session_id: Option<&str>,
        page: Option<&str>,
    ) -> RepositoryResult<VisitRecord> {
        self.track_visit_at(session_id, page, Utc::now()).await
    }

    /// Record a page view at `now`.
    ///
    /// Continues `session_id` when it exists and is still fresh, otherwise
    /// starts a new session carrying the previous visit count forward.
    pub async fn track_visit_at(
        &self,
        session_id: Option<&str>,
        page: Option<&str>,
        now: DateTime<Utc>,
    ) -> RepositoryResult<VisitRecord> {
        let page = normalize_page(page)?;

        let existing = match session_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => self.repository.get_visit(id).await?,
            None => None,
        };

        match existing {
            Some(record) if !record.is_expired(now) => {
                debug!("continuing session {} on {}", record.session_id, page);
                self.repository
                    .touch_visit(&record.session_id, &page, now)
                    .await
            }
            previous => {
                let previous_total = previous.as_ref().map(|r| r.total_visits).unwrap_or(0);
                let new_id = new_session_id();
                debug!(
                    "starting session {} (previous total {}) on {}",
                    new_id, previous_total, page
                );
                self.repository
                    .start_session(&new_id, previous_total, &page, now)
                    .await
            }
        }
    }

    /// Look up a session, failing with `NotFound` when unknown.
    pub async fn get_visit(&self, session_id: &str) -> RepositoryResult<VisitRecord> {
        self.repository.get_visit(session_id).await?.ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("session {} not found", session_id),
                ErrorContext::new("get_visit")
                    .with_entity("visit")
                    .with_entity_id(session_id),
            )
        })
    }

    /// Seconds since the session started, measured at `now`.
    pub async fn session_duration(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<i64> {
        Ok(self.get_visit(session_id).await?.session_duration_secs(now))
    }

    pub async fn recent_visits(&self, limit: usize) -> RepositoryResult<Vec<VisitRecord>> {
        self.repository.list_recent(limit).await
    }

    pub async fn total_visits(&self) -> RepositoryResult<u64> {
        self.repository.total_visits().await
    }
}

fn new_session_id() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}

fn normalize_page(page: Option<&str>) -> RepositoryResult<String> {
    let page = page.map(str::trim).filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PAGE);
    if page.len() > MAX_PAGE_LEN {
        return Err(RepositoryError::validation_with_context(
            format!("page path longer than {} bytes", MAX_PAGE_LEN),
            ErrorContext::new("track_visit").with_entity("visit"),
        ));
    }
    Ok(page.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use chrono::Duration;

    fn tracker() -> VisitTracker {
        VisitTracker::new(Arc::new(LocalRepository::new()))
    }

    fn t0() -> DateTime<Utc> {
        "2025-08-12T22:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn test_first_visit_starts_session() {
        let tracker = tracker();
        let rec = tracker.track_visit_at(None, None, t0()).await.unwrap();
        assert_eq!(rec.total_visits, 1);
        assert_eq!(rec.pages_viewed, vec!["/".to_string()]);
        assert!(rec.session_id.starts_with("session_"));
        assert_eq!(rec.session_start, t0());
    }

    #[tokio::test]
    async fn test_visit_within_timeout_continues_session() {
        let tracker = tracker();
        let first = tracker.track_visit_at(None, None, t0()).await.unwrap();
        let second = tracker
            .track_visit_at(
                Some(&first.session_id),
                Some("/forecast"),
                t0() + Duration::minutes(29),
            )
            .await
            .unwrap();

        assert_eq!(second.session_id, first.session_id);
        assert_eq!(second.total_visits, 1);
        assert_eq!(second.session_start, t0());
        assert_eq!(second.pages_viewed.len(), 2);
    }

    #[tokio::test]
    async fn test_visit_after_timeout_rolls_session() {
        let tracker = tracker();
        let first = tracker.track_visit_at(None, None, t0()).await.unwrap();
        let later = t0() + Duration::minutes(31);
        let second = tracker
            .track_visit_at(Some(&first.session_id), Some("/moon"), later)
            .await
            .unwrap();

        assert_ne!(second.session_id, first.session_id);
        assert_eq!(second.total_visits, 2);
        assert_eq!(second.session_start, later);
        assert_eq!(second.pages_viewed, vec!["/moon".to_string()]);
        assert_eq!(tracker.total_visits().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_session_starts_fresh() {
        let tracker = tracker();
        let rec = tracker
            .track_visit_at(Some("session_forgotten"), None, t0())
            .await
            .unwrap();
        assert_ne!(rec.session_id, "session_forgotten");
        assert_eq!(rec.total_visits, 1);
    }

    #[tokio::test]
    async fn test_get_visit_not_found() {
        let err = tracker().get_visit("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_session_duration() {
        let tracker = tracker();
        let rec = tracker.track_visit_at(None, None, t0()).await.unwrap();
        let secs = tracker
            .session_duration(&rec.session_id, t0() + Duration::seconds(125))
            .await
            .unwrap();
        assert_eq!(secs, 125);
    }

    #[tokio::test]
    async fn test_overlong_page_rejected() {
        let long = "/".repeat(MAX_PAGE_LEN + 1);
        let err = tracker()
            .track_visit_at(None, Some(&long), t0())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
