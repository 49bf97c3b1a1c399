use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::text::normalize;
use crate::types::{
    new_id, Channel, DirectoryEntry, NewMembership, QueueMembership, User, CHANNEL_ID_PREFIX,
    MEMBERSHIP_ID_PREFIX, USER_ID_PREFIX,
};

#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// All entries in ascending id order.
    async fn list_rooms(&self) -> Result<Vec<DirectoryEntry>, StoreError>;

    /// Entry whose normalized room name equals `key`.
    async fn find_room(&self, key: &str) -> Result<Option<DirectoryEntry>, StoreError>;
}

#[async_trait]
pub trait QueueStore: Send + Sync {
    async fn find_channel(&self, id: &str) -> Result<Option<Channel>, StoreError>;

    /// Returns the channel with this Slack id, creating it if needed.
    async fn upsert_channel(&self, slack_channel_id: &str, name: &str)
        -> Result<Channel, StoreError>;

    /// Returns the user with this Slack id, creating it if needed.
    async fn upsert_user(
        &self,
        slack_user_id: &str,
        display_name: &str,
        rank: i32,
    ) -> Result<User, StoreError>;

    /// Inserts a membership. Must fail with `UniquenessViolation` when the
    /// (channel, user) pair already exists, atomically with the insert.
    async fn create_membership(&self, new: NewMembership) -> Result<QueueMembership, StoreError>;

    async fn find_membership(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<Option<QueueMembership>, StoreError>;

    /// Memberships created at or after `since`, oldest first.
    async fn active_memberships(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<QueueMembership>, StoreError>;
}

#[derive(Default)]
struct MemoryState {
    rooms: Vec<DirectoryEntry>,
    channels: HashMap<String, Channel>,
    users: HashMap<String, User>,
    memberships: Vec<QueueMembership>,
}

/// Process-local store used by tests and when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rooms(mut rooms: Vec<DirectoryEntry>) -> Self {
        rooms.sort_by_key(|room| room.id);
        Self {
            state: RwLock::new(MemoryState {
                rooms,
                ..MemoryState::default()
            }),
        }
    }
}

#[async_trait]
impl RoomDirectory for MemoryStore {
    async fn list_rooms(&self) -> Result<Vec<DirectoryEntry>, StoreError> {
        Ok(self.state.read().await.rooms.clone())
    }

    async fn find_room(&self, key: &str) -> Result<Option<DirectoryEntry>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .rooms
            .iter()
            .find(|room| normalize(&room.room_name) == key)
            .cloned())
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn find_channel(&self, id: &str) -> Result<Option<Channel>, StoreError> {
        Ok(self.state.read().await.channels.get(id).cloned())
    }

    async fn upsert_channel(
        &self,
        slack_channel_id: &str,
        name: &str,
    ) -> Result<Channel, StoreError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .channels
            .values()
            .find(|c| c.slack_channel_id == slack_channel_id)
        {
            return Ok(existing.clone());
        }
        let channel = Channel {
            id: new_id(CHANNEL_ID_PREFIX),
            slack_channel_id: slack_channel_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        state.channels.insert(channel.id.clone(), channel.clone());
        Ok(channel)
    }

    async fn upsert_user(
        &self,
        slack_user_id: &str,
        display_name: &str,
        rank: i32,
    ) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .users
            .values()
            .find(|u| u.slack_user_id == slack_user_id)
        {
            return Ok(existing.clone());
        }
        let user = User {
            id: new_id(USER_ID_PREFIX),
            slack_user_id: slack_user_id.to_string(),
            display_name: display_name.to_string(),
            rank,
            created_at: Utc::now(),
        };
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn create_membership(&self, new: NewMembership) -> Result<QueueMembership, StoreError> {
        new.validate()?;

        // Checks and insert happen under one write guard.
        let mut state = self.state.write().await;
        if !state.channels.contains_key(&new.channel_id) {
            return Err(StoreError::Validation(format!(
                "channel {} does not exist",
                new.channel_id
            )));
        }
        if !state.users.contains_key(&new.user_id) {
            return Err(StoreError::Validation(format!(
                "user {} does not exist",
                new.user_id
            )));
        }
        if state
            .memberships
            .iter()
            .any(|m| m.channel_id == new.channel_id && m.user_id == new.user_id)
        {
            return Err(StoreError::UniquenessViolation {
                channel_id: new.channel_id,
                user_id: new.user_id,
            });
        }

        let membership = QueueMembership {
            id: new_id(MEMBERSHIP_ID_PREFIX),
            channel_id: new.channel_id,
            user_id: new.user_id,
            created_at: new.created_at,
        };
        state.memberships.push(membership.clone());
        Ok(membership)
    }

    async fn find_membership(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<Option<QueueMembership>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .memberships
            .iter()
            .find(|m| m.channel_id == channel_id && m.user_id == user_id)
            .cloned())
    }

    async fn active_memberships(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<QueueMembership>, StoreError> {
        let state = self.state.read().await;
        let mut active: Vec<QueueMembership> = state
            .memberships
            .iter()
            .filter(|m| m.created_at >= since)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        active.sort_by_key(|m| m.created_at);
        Ok(active)
    }
}
