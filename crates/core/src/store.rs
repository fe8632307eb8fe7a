//! In-memory workspace store: user profile, followed companies, history
//! and the agent catalog.
//!
//! The store is shared (`Arc<Workspace>`) between the transcript controller
//! and the outer UI. All methods take `&self`; locks are held only for the
//! duration of a single call.

use crate::catalog::{AgentApp, default_agents};
use crate::types::{CompanyUpdate, FollowedCompany, HistoryCategory, HistoryItem, UpdateKind, UserProfile};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Maximum number of companies a user can follow at once
pub const FOLLOW_LIMIT: usize = 10;

/// Result of a follow request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowOutcome {
    /// Company added; carries the new id
    Added(String),
    /// A company with the same name is already followed
    AlreadyFollowed,
    /// The watchlist is full
    LimitReached,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    user: UserProfile,
    followed: Vec<FollowedCompany>,
    history: Vec<HistoryItem>,
    agents: Vec<AgentApp>,
}

#[derive(Debug, Default)]
pub struct Workspace {
    state: RwLock<WorkspaceState>,
}

impl Workspace {
    pub fn new(user: UserProfile) -> Self {
        Self::with_agents(user, default_agents())
    }

    pub fn with_agents(user: UserProfile, agents: Vec<AgentApp>) -> Self {
        Self { state: RwLock::new(WorkspaceState { user, agents, ..Default::default() }) }
    }

    fn read(&self) -> RwLockReadGuard<'_, WorkspaceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WorkspaceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn user(&self) -> UserProfile {
        self.read().user.clone()
    }

    pub fn update_user(&self, update: impl FnOnce(&mut UserProfile)) {
        update(&mut self.write().user);
    }

    /// Follow a company by name (names are unique within the watchlist)
    pub fn follow(&self, name: &str, industry: Option<String>) -> FollowOutcome {
        let mut state = self.write();
        if state.followed.iter().any(|c| c.name == name) {
            return FollowOutcome::AlreadyFollowed;
        }
        if state.followed.len() >= FOLLOW_LIMIT {
            tracing::debug!(company = name, "watchlist full");
            return FollowOutcome::LimitReached;
        }

        let id = uuid::Uuid::new_v4().to_string();
        state.followed.insert(
            0,
            FollowedCompany {
                id: id.clone(),
                name: name.to_string(),
                date_added: today(),
                industry,
                recent_updates: Vec::new(),
            },
        );
        tracing::info!(company = name, "company followed");
        FollowOutcome::Added(id)
    }

    pub fn unfollow(&self, id: &str) -> bool {
        let mut state = self.write();
        let before = state.followed.len();
        state.followed.retain(|c| c.id != id);
        before != state.followed.len()
    }

    pub fn is_followed(&self, name: &str) -> bool {
        self.read().followed.iter().any(|c| c.name == name)
    }

    /// Followed companies, most recently added first
    pub fn followed(&self) -> Vec<FollowedCompany> {
        self.read().followed.clone()
    }

    /// Mark every update of a company as read
    pub fn mark_as_read(&self, id: &str) -> bool {
        let mut state = self.write();
        match state.followed.iter_mut().find(|c| c.id == id) {
            Some(company) => {
                company.recent_updates.iter_mut().for_each(|u| u.is_read = true);
                true
            }
            None => false,
        }
    }

    /// Push a monitoring update to a followed company (newest first)
    pub fn push_update(&self, company_id: &str, text: impl Into<String>, kind: UpdateKind) -> bool {
        let mut state = self.write();
        let Some(company) = state.followed.iter_mut().find(|c| c.id == company_id) else {
            return false;
        };
        company.recent_updates.insert(
            0,
            CompanyUpdate { id: uuid::Uuid::new_v4().to_string(), text: text.into(), date: today(), is_read: false, kind },
        );
        true
    }

    /// Record a finished conversation (newest first)
    pub fn add_history(&self, item: HistoryItem) {
        self.write().history.insert(0, item);
    }

    pub fn history(&self) -> Vec<HistoryItem> {
        self.read().history.clone()
    }

    /// History filtered by category; `None` returns everything
    pub fn history_in(&self, category: Option<HistoryCategory>) -> Vec<HistoryItem> {
        self.read()
            .history
            .iter()
            .filter(|item| category.is_none_or(|c| item.category == c))
            .cloned()
            .collect()
    }

    pub fn history_item(&self, id: &str) -> Option<HistoryItem> {
        self.read().history.iter().find(|item| item.id == id).cloned()
    }

    pub fn agents(&self) -> Vec<AgentApp> {
        self.read().agents.clone()
    }

    pub fn toggle_agent_pin(&self, id: &str) -> bool {
        let mut state = self.write();
        match state.agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                agent.pinned = !agent.pinned;
                true
            }
            None => false,
        }
    }
}

/// Local calendar date used for history and watchlist entries
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Fresh id for history entries
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
