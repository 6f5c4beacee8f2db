//! In-Memory Editing Sessions
//!
//! Keeps one record per connected operator: who they are, the tree they last
//! loaded and the plan they last computed. The boundary layer reads the cached
//! tree back when validating or committing, so a plan is always checked against
//! the snapshot the operator was actually looking at.
//!
//! # Expiry
//!
//! Sessions expire a fixed time after creation (30 minutes by default). Access
//! does not extend the lifetime. An expired session is dropped the first time
//! it is touched and reported as [`RestructureError::SessionExpired`];
//! [`SessionStore::purge_expired`] sweeps the rest.

use crate::config::EngineConfig;
use crate::models::{MoveOperation, PageNode};
use crate::services::error::RestructureError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Identity of the operator owning a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub account_id: String,
    pub display_name: String,
}

/// Per-operator editing state
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: String,
    pub user: SessionUser,
    pub created_at: Instant,

    /// Baseline tree from the operator's most recent load
    pub last_loaded_tree: Option<PageNode>,

    /// Plan from the operator's most recent plan computation
    pub last_plan: Vec<MoveOperation>,
}

impl SessionState {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Shared session map with creation-based expiry
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store with the default 30 minute lifetime.
    pub fn new() -> Self {
        Self::with_ttl(EngineConfig::default().session_ttl())
    }

    /// Create a store with a custom lifetime (primarily for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_ttl(config.session_ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a new session for `user` under a fresh random id.
    pub async fn create(&self, user: SessionUser) -> SessionState {
        let state = SessionState {
            id: uuid::Uuid::new_v4().to_string(),
            user,
            created_at: Instant::now(),
            last_loaded_tree: None,
            last_plan: Vec::new(),
        };

        self.sessions
            .write()
            .await
            .insert(state.id.clone(), state.clone());

        tracing::info!(
            "Created session {} for account '{}'",
            state.id,
            state.user.account_id
        );
        state
    }

    /// Fetch a live session.
    pub async fn get(&self, session_id: &str) -> Result<SessionState, RestructureError> {
        let mut sessions = self.sessions.write().await;
        live_session(&mut sessions, session_id, self.ttl).map(|state| state.clone())
    }

    /// Record the tree the operator just loaded.
    pub async fn touch_tree(&self, session_id: &str, tree: PageNode) -> Result<(), RestructureError> {
        let mut sessions = self.sessions.write().await;
        let state = live_session(&mut sessions, session_id, self.ttl)?;
        state.last_loaded_tree = Some(tree);
        Ok(())
    }

    /// Record the plan the operator just computed.
    pub async fn touch_plan(
        &self,
        session_id: &str,
        plan: Vec<MoveOperation>,
    ) -> Result<(), RestructureError> {
        let mut sessions = self.sessions.write().await;
        let state = live_session(&mut sessions, session_id, self.ttl)?;
        state.last_plan = plan;
        Ok(())
    }

    /// Close a session; returns false if it did not exist.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, state| !state.is_expired(self.ttl));
        let purged = before - sessions.len();

        if purged > 0 {
            tracing::debug!("Purged {} expired session(s)", purged);
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a session, evicting it if expired.
fn live_session<'a>(
    sessions: &'a mut HashMap<String, SessionState>,
    session_id: &str,
    ttl: Duration,
) -> Result<&'a mut SessionState, RestructureError> {
    let expired = match sessions.get(session_id) {
        Some(state) => state.is_expired(ttl),
        None => return Err(RestructureError::session_not_found(session_id)),
    };

    if expired {
        sessions.remove(session_id);
        tracing::debug!("Session {} expired", session_id);
        return Err(RestructureError::session_expired(session_id));
    }

    sessions
        .get_mut(session_id)
        .ok_or_else(|| RestructureError::session_not_found(session_id))
}
