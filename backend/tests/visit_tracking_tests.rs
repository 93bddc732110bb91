//! Visit tracking over the repository layer.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use celestial_watch::db::{
    FullRepository, LocalRepository, RepositoryFactory, RepositoryType, VisitRepository,
};
use celestial_watch::services::VisitTracker;

fn evening() -> DateTime<Utc> {
    "2025-03-29T20:30:00Z".parse().unwrap()
}

#[test]
fn test_factory_builds_local_repository() {
    let repo = RepositoryFactory::create(RepositoryType::Local, 10).unwrap();
    assert_eq!(repo.backend_name(), "local");

    let repo_type: RepositoryType = "in-memory".parse().unwrap();
    let repo = RepositoryFactory::create(repo_type, 10).unwrap();
    assert_eq!(repo.backend_name(), "local");
}

#[test]
fn test_factory_rejects_zero_session_cap() {
    let err = RepositoryFactory::create(RepositoryType::Local, 0).err().unwrap();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("max_sessions=0"));
    assert!("postgres".parse::<RepositoryType>().is_err());
}

#[tokio::test]
async fn test_health_check() {
    let repo = RepositoryFactory::create_local();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_returning_visitor_across_sessions() {
    let tracker = VisitTracker::new(RepositoryFactory::create_local());

    let first = tracker.track_visit_at(None, Some("/"), evening()).await.unwrap();
    let browsing = tracker
        .track_visit_at(
            Some(&first.session_id),
            Some("/forecast"),
            evening() + Duration::minutes(10),
        )
        .await
        .unwrap();
    assert_eq!(browsing.session_id, first.session_id);

    // Idle timer runs from the last visit, not the session start.
    let still_same = tracker
        .track_visit_at(
            Some(&first.session_id),
            Some("/moon"),
            evening() + Duration::minutes(35),
        )
        .await
        .unwrap();
    assert_eq!(still_same.session_id, first.session_id);
    assert_eq!(still_same.pages_viewed, vec!["/", "/forecast", "/moon"]);

    let next_day = evening() + Duration::days(1);
    let second = tracker
        .track_visit_at(Some(&first.session_id), None, next_day)
        .await
        .unwrap();
    assert_ne!(second.session_id, first.session_id);
    assert_eq!(second.total_visits, 2);

    let third = tracker
        .track_visit_at(Some(&second.session_id), None, next_day + Duration::hours(2))
        .await
        .unwrap();
    assert_eq!(third.total_visits, 3);
    assert_eq!(tracker.total_visits().await.unwrap(), 3);
}

#[tokio::test]
async fn test_repeated_page_is_recorded_once() {
    let tracker = VisitTracker::new(RepositoryFactory::create_local());
    let first = tracker.track_visit_at(None, Some("/moon"), evening()).await.unwrap();
    let again = tracker
        .track_visit_at(Some(&first.session_id), Some("/moon"), evening() + Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(again.pages_viewed, vec!["/moon"]);
    assert_eq!(again.last_visit, evening() + Duration::minutes(1));
}

#[tokio::test]
async fn test_recent_visits_most_recent_first() {
    let repo = Arc::new(LocalRepository::new());
    let tracker = VisitTracker::new(repo.clone());

    let a = tracker.track_visit_at(None, None, evening()).await.unwrap();
    let b = tracker
        .track_visit_at(None, None, evening() + Duration::minutes(5))
        .await
        .unwrap();
    let c = tracker
        .track_visit_at(None, None, evening() + Duration::minutes(2))
        .await
        .unwrap();

    let recent = tracker.recent_visits(2).await.unwrap();
    let ids: Vec<&str> = recent.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, vec![b.session_id.as_str(), c.session_id.as_str()]);
    assert_eq!(repo.len(), 3);
    assert!(repo.get_visit(&a.session_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_anonymous_visits_do_not_grow_store_past_cap() {
    let repo = Arc::new(LocalRepository::with_max_sessions(100));
    let tracker = VisitTracker::new(repo.clone());

    let mut last = None;
    for i in 0..2_000 {
        let rec = tracker
            .track_visit_at(None, None, evening() + Duration::seconds(i))
            .await
            .unwrap();
        last = Some(rec.session_id);
    }

    assert_eq!(repo.len(), 100);
    assert_eq!(tracker.total_visits().await.unwrap(), 2_000);
    let latest = last.unwrap();
    assert!(tracker.get_visit(&latest).await.is_ok());
}

#[tokio::test]
async fn test_evicted_session_starts_over() {
    let repo = Arc::new(LocalRepository::with_max_sessions(1));
    let tracker = VisitTracker::new(repo.clone());

    let first = tracker.track_visit_at(None, None, evening()).await.unwrap();
    tracker
        .track_visit_at(None, None, evening() + Duration::minutes(1))
        .await
        .unwrap();

    // `first` was evicted, so its visitor begins a new count.
    let back = tracker
        .track_visit_at(Some(&first.session_id), None, evening() + Duration::minutes(2))
        .await
        .unwrap();
    assert_ne!(back.session_id, first.session_id);
    assert_eq!(back.total_visits, 1);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_concurrent_visitors_get_distinct_sessions() {
    let repo: Arc<dyn FullRepository> = RepositoryFactory::create_local();
    let tracker = VisitTracker::new(repo.clone());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let tracker = tracker.clone();
            tokio::spawn(async move {
                tracker
                    .track_visit_at(None, Some("/"), evening() + Duration::seconds(i))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().session_id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    assert_eq!(repo.total_visits().await.unwrap(), 16);
}
