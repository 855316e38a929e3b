use std::collections::HashMap;
use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use dermascan_scoring::session::ScanSession;
use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub bucket: String,
    /// Live scan sessions. Each handler applies one transition under the lock.
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(s3: S3Client, bucket: impl Into<String>) -> Self {
        Self::with_session_ttl(s3, bucket, crate::config::DEFAULT_SESSION_TTL)
    }

    pub fn with_session_ttl(s3: S3Client, bucket: impl Into<String>, ttl: SignedDuration) -> Self {
        Self {
            s3,
            bucket: bucket.into(),
            sessions: Arc::new(Mutex::new(SessionStore::new(ttl))),
        }
    }
}

struct Entry {
    session: ScanSession,
    touched: Timestamp,
}

/// In-memory sessions keyed by id. A session untouched for longer than the
/// TTL is gone: lookups miss it and `evict_idle` drops it.
pub struct SessionStore {
    entries: HashMap<Uuid, Entry>,
    ttl: SignedDuration,
}

impl SessionStore {
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_live(&self, entry: &Entry, now: Timestamp) -> bool {
        now.duration_since(entry.touched) <= self.ttl
    }

    pub fn insert(&mut self, id: Uuid, session: ScanSession, now: Timestamp) {
        self.entries.insert(
            id,
            Entry {
                session,
                touched: now,
            },
        );
    }

    /// Look up a live session and mark it used at `now`.
    pub fn get(&mut self, id: Uuid, now: Timestamp) -> Option<&ScanSession> {
        self.get_mut(id, now).map(|session| &*session)
    }

    /// Look up a live session for a transition and mark it used at `now`.
    pub fn get_mut(&mut self, id: Uuid, now: Timestamp) -> Option<&mut ScanSession> {
        let live = self
            .entries
            .get(&id)
            .is_some_and(|entry| self.is_live(entry, now));
        if !live {
            if self.entries.remove(&id).is_some() {
                tracing::info!(session = %id, "session expired");
            }
            return None;
        }

        let entry = self.entries.get_mut(&id)?;
        entry.touched = now;
        Some(&mut entry.session)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<ScanSession> {
        self.entries.remove(&id).map(|entry| entry.session)
    }

    /// Drop every session idle past the TTL. Returns how many were dropped.
    pub fn evict_idle(&mut self, now: Timestamp) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.duration_since(entry.touched) <= ttl);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.entries.len(), "evicted idle sessions");
        }
        evicted
    }
}
