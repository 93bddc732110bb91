//! In-memory repository for development and tests.
//!
//! State lives in a `HashMap` keyed by session id behind a `parking_lot`
//! lock; nothing survives a restart. The map holds at most `max_sessions`
//! records; starting a session beyond that evicts the least recently visited.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::repository::{
    ErrorContext, FullRepository, RepositoryError, RepositoryResult, VisitRepository,
};
use crate::models::{VisitId, VisitRecord};

/// Session records kept by [`LocalRepository::new`].
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Default)]
struct LocalState {
    visits: HashMap<String, VisitRecord>,
    next_id: Option<VisitId>,
    sessions_started: u64,
}

impl LocalState {
    fn allocate_id(&mut self) -> VisitId {
        let id = self.next_id.unwrap_or(VisitId::FIRST);
        self.next_id = Some(id.next());
        id
    }

    fn evict_least_recent(&mut self) -> Option<VisitRecord> {
        let key = self
            .visits
            .values()
            .min_by(|a, b| a.last_visit.cmp(&b.last_visit).then(a.id.cmp(&b.id)))?
            .session_id
            .clone();
        self.visits.remove(&key)
    }
}

/// In-memory [`FullRepository`].
#[derive(Clone)]
pub struct LocalRepository {
    state: Arc<RwLock<LocalState>>,
    max_sessions: usize,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::with_max_sessions(DEFAULT_MAX_SESSIONS)
    }

    /// Repository holding at most `max_sessions` records (at least one).
    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(LocalState::default())),
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Number of stored session records.
    pub fn len(&self) -> usize {
        self.state.read().visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all stored records.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.visits.clear();
        state.next_id = None;
        state.sessions_started = 0;
    }
}

fn validate_key(session_id: &str, operation: &str) -> RepositoryResult<()> {
    if session_id.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            "session id must not be empty",
            ErrorContext::new(operation).with_entity("visit"),
        ));
    }
    Ok(())
}

#[async_trait]
impl VisitRepository for LocalRepository {
    async fn get_visit(&self, session_id: &str) -> RepositoryResult<Option<VisitRecord>> {
        Ok(self.state.read().visits.get(session_id).cloned())
    }

    async fn touch_visit(
        &self,
        session_id: &str,
        page: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<VisitRecord> {
        validate_key(session_id, "touch_visit")?;

        let mut state = self.state.write();
        let record = state.visits.get_mut(session_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("session {} not found", session_id),
                ErrorContext::new("touch_visit")
                    .with_entity("visit")
                    .with_entity_id(session_id),
            )
        })?;

        if at > record.last_visit {
            record.last_visit = at;
        }
        record.add_page(page);
        Ok(record.clone())
    }

    async fn start_session(
        &self,
        session_id: &str,
        previous_total: u64,
        page: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<VisitRecord> {
        validate_key(session_id, "start_session")?;

        let mut state = self.state.write();
        if state.visits.contains_key(session_id) {
            return Err(RepositoryError::validation_with_context(
                format!("session {} already exists", session_id),
                ErrorContext::new("start_session")
                    .with_entity("visit")
                    .with_entity_id(session_id),
            ));
        }

        while state.visits.len() >= self.max_sessions {
            match state.evict_least_recent() {
                Some(evicted) => debug!("evicted idle session {}", evicted.session_id),
                None => break,
            }
        }

        let record = VisitRecord {
            id: state.allocate_id(),
            session_id: session_id.to_string(),
            total_visits: previous_total.saturating_add(1),
            session_start: at,
            last_visit: at,
            pages_viewed: vec![page.to_string()],
        };
        state.visits.insert(session_id.to_string(), record.clone());
        state.sessions_started += 1;
        Ok(record)
    }

    async fn total_visits(&self) -> RepositoryResult<u64> {
        Ok(self.state.read().sessions_started)
    }

    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<VisitRecord>> {
        let state = self.state.read();
        let mut records: Vec<VisitRecord> = state.visits.values().cloned().collect();
        records.sort_by(|a, b| b.last_visit.cmp(&a.last_visit).then(b.id.cmp(&a.id)));
        records.truncate(limit);
        Ok(records)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        "2025-06-01T21:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn test_start_and_get_session() {
        let repo = LocalRepository::new();
        assert!(repo.is_empty());

        let rec = repo.start_session("s1", 0, "/", t0()).await.unwrap();
        assert_eq!(rec.id, VisitId::FIRST);
        assert_eq!(rec.total_visits, 1);

        let fetched = repo.get_visit("s1").await.unwrap().unwrap();
        assert_eq!(fetched, rec);
        assert!(repo.get_visit("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = LocalRepository::new();
        let a = repo.start_session("a", 0, "/", t0()).await.unwrap();
        let b = repo.start_session("b", 3, "/", t0()).await.unwrap();
        assert_eq!(b.id, a.id.next());
        assert_eq!(b.total_visits, 4);
    }

    #[tokio::test]
    async fn test_duplicate_session_rejected() {
        let repo = LocalRepository::new();
        repo.start_session("dup", 0, "/", t0()).await.unwrap();
        let err = repo.start_session("dup", 0, "/", t0()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_touch_updates_last_visit_and_pages() {
        let repo = LocalRepository::new();
        repo.start_session("s", 0, "/", t0()).await.unwrap();

        let later = t0() + Duration::minutes(5);
        let rec = repo.touch_visit("s", "/moon", later).await.unwrap();
        assert_eq!(rec.last_visit, later);
        assert_eq!(rec.pages_viewed, vec!["/".to_string(), "/moon".to_string()]);

        // Out-of-order touch does not move last_visit backwards.
        let rec = repo.touch_visit("s", "/", t0()).await.unwrap();
        assert_eq!(rec.last_visit, later);
        assert_eq!(rec.pages_viewed.len(), 2);
    }

    #[tokio::test]
    async fn test_touch_unknown_session_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo.touch_visit("ghost", "/", t0()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id.as_deref(), Some("ghost"));
    }

    #[tokio::test]
    async fn test_empty_session_id_rejected() {
        let repo = LocalRepository::new();
        assert!(repo.start_session("  ", 0, "/", t0()).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_list_recent_orders_and_limits() {
        let repo = LocalRepository::new();
        repo.start_session("old", 0, "/", t0()).await.unwrap();
        repo.start_session("mid", 0, "/", t0() + Duration::hours(1)).await.unwrap();
        repo.start_session("new", 0, "/", t0() + Duration::hours(2)).await.unwrap();

        let recent = repo.list_recent(2).await.unwrap();
        let ids: Vec<&str> = recent.iter().map(|r| r.session_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
        assert_eq!(repo.total_visits().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_clear_resets_ids() {
        let repo = LocalRepository::new();
        repo.start_session("a", 0, "/", t0()).await.unwrap();
        repo.clear();
        assert!(repo.is_empty());
        let rec = repo.start_session("b", 0, "/", t0()).await.unwrap();
        assert_eq!(rec.id, VisitId::FIRST);
    }

    #[tokio::test]
    async fn test_cap_evicts_least_recently_visited() {
        let repo = LocalRepository::with_max_sessions(2);
        repo.start_session("a", 0, "/", t0()).await.unwrap();
        repo.start_session("b", 0, "/", t0() + Duration::minutes(1)).await.unwrap();
        // `a` is now the most recently visited.
        repo.touch_visit("a", "/moon", t0() + Duration::minutes(2)).await.unwrap();

        repo.start_session("c", 0, "/", t0() + Duration::minutes(3)).await.unwrap();

        assert_eq!(repo.len(), 2);
        assert!(repo.get_visit("b").await.unwrap().is_none());
        assert!(repo.get_visit("a").await.unwrap().is_some());
        assert!(repo.get_visit("c").await.unwrap().is_some());
        assert_eq!(repo.total_visits().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_anonymous_sessions_stay_bounded() {
        let repo = LocalRepository::with_max_sessions(50);
        for i in 0..1_000 {
            let id = format!("s{}", i);
            repo.start_session(&id, 0, "/", t0() + Duration::seconds(i)).await.unwrap();
        }
        assert_eq!(repo.len(), 50);
        assert_eq!(repo.total_visits().await.unwrap(), 1_000);

        let newest = repo.list_recent(1).await.unwrap();
        assert_eq!(newest[0].session_id, "s999");
        assert!(repo.get_visit("s949").await.unwrap().is_none());
        assert!(repo.get_visit("s950").await.unwrap().is_some());
    }

    #[test]
    fn test_zero_cap_holds_one_session() {
        assert_eq!(LocalRepository::with_max_sessions(0).max_sessions(), 1);
        assert_eq!(LocalRepository::new().max_sessions(), DEFAULT_MAX_SESSIONS);
    }

    #[tokio::test]
    async fn test_health_and_name() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());
        assert_eq!(repo.backend_name(), "local");
    }
}
