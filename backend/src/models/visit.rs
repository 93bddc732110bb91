use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::define_record_id;

define_record_id!(VisitId, "Visit record identifier, allocated by the repository.");

/// Gap after which a returning visitor starts a new session.
pub const SESSION_TIMEOUT_MINUTES: i64 = 30;

pub fn session_timeout() -> Duration {
    Duration::minutes(SESSION_TIMEOUT_MINUTES)
}

/// Visit counters for one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: VisitId,
    pub session_id: String,
    /// Number of sessions this visitor has started.
    pub total_visits: u64,
    pub session_start: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,
    /// Distinct pages in first-seen order.
    pub pages_viewed: Vec<String>,
}

impl VisitRecord {
    /// Whole seconds elapsed since the session started, never negative.
    pub fn session_duration_secs(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.session_start)
            .num_seconds()
            .max(0)
    }

    /// A visit at `now` belongs to a new session.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_visit) > session_timeout()
    }

    /// Remember `page` unless it was already seen.
    pub fn add_page(&mut self, page: &str) {
        if !self.pages_viewed.iter().any(|p| p == page) {
            self.pages_viewed.push(page.to_string());
        }
    }
}
