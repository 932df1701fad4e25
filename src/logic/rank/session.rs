//! Session Context - Per-session state for the rank tracker
//!
//! One `SessionContext` per interactive session, owned by the host and passed
//! by `&mut` into [`SessionContext::record_and_rank`]. Hosts that may run two
//! interactions of the same session concurrently share it through
//! [`SharedSession`], whose lock covers the whole append-then-rank step.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use super::history::{ProbabilityHistory, RankStats};

#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Uuid,
    started_at: DateTime<Utc>,
    history: ProbabilityHistory,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Session with a host-supplied identity
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            history: ProbabilityHistory::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn history(&self) -> &ProbabilityHistory {
        &self.history
    }

    /// Append `probability`, then rank it against the whole history
    /// (itself included in the denominator). Not idempotent.
    pub fn record_and_rank(&mut self, probability: f64) -> f64 {
        debug_assert!(probability.is_finite());

        self.history.push(probability);
        let rank = self.history.percentile_rank(probability);

        log::debug!(
            "Session {}: p={:.4} rank={:.4} (n={})",
            self.id,
            probability,
            rank,
            self.history.len()
        );
        rank
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            started_at: self.started_at,
            stats: self.history.stats(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of a session for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub stats: RankStats,
}

/// Session handle safe to clone across threads
#[derive(Debug, Clone, Default)]
pub struct SharedSession(Arc<Mutex<SessionContext>>);

impl SharedSession {
    pub fn new(context: SessionContext) -> Self {
        Self(Arc::new(Mutex::new(context)))
    }

    pub fn record_and_rank(&self, probability: f64) -> f64 {
        self.0.lock().record_and_rank(probability)
    }

    /// Run `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        let mut guard = self.0.lock();
        f(&mut guard)
    }
}
