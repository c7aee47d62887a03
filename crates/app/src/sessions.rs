use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::auth::Session;
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Entry {
    session: Session,
    expires_at: Instant,
}

/// Logged-in sessions keyed by an opaque bearer token. Lost on restart.
#[derive(Debug, Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session and return its token.
    pub fn issue(&self, session: Session) -> String {
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let mut entries = self.entries.write();
        entries.retain(|_, e| e.expires_at > Instant::now());
        entries.insert(
            token.clone(),
            Entry {
                session,
                expires_at: Instant::now() + self.ttl,
            },
        );
        token
    }

    /// The live session for `token`. Expired entries are dropped on sight.
    pub fn get(&self, token: &str) -> Option<Session> {
        {
            let entries = self.entries.read();
            match entries.get(token) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.session.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }
        self.entries.write().remove(token);
        None
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.entries.write().remove(token).is_some()
    }

    /// End every session of `username`. Returns how many were ended.
    pub fn revoke_user(&self, username: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.session.username != username);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use common::model::Role;

    use super::*;

    #[test]
    fn test_issue_and_get() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.issue(Session::new("alice", Role::Member));
        assert_eq!(token.len(), 64);
        assert_eq!(store.get(&token).unwrap().username, "alice");
        assert!(store.get("bogus").is_none());
    }

    #[test]
    fn test_expired_sessions_are_dropped() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.issue(Session::new("alice", Role::Member));
        assert!(store.get(&token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_revoke_user_ends_all_their_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a1 = store.issue(Session::new("alice", Role::Member));
        let a2 = store.issue(Session::new("alice", Role::Member));
        let b = store.issue(Session::new("bob", Role::Member));

        assert_eq!(store.revoke_user("alice"), 2);
        assert!(store.get(&a1).is_none());
        assert!(store.get(&a2).is_none());
        assert!(store.get(&b).is_some());
        assert!(store.revoke(&b));
        assert!(!store.revoke(&b));
    }
}
