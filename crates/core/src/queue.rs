use std::sync::Arc;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::schedule::{Clock, DailyReset};
use crate::store::QueueStore;
use crate::types::{Channel, NewMembership, QueueMembership, User};

/// Rank assigned to users first seen through a queue join.
pub const DEFAULT_RANK: i32 = 1500;

#[derive(Clone)]
pub struct QueueService {
    store: Arc<dyn QueueStore>,
    clock: Arc<dyn Clock>,
    reset: DailyReset,
}

impl QueueService {
    pub fn new(store: Arc<dyn QueueStore>, clock: Arc<dyn Clock>, reset: DailyReset) -> Self {
        Self {
            store,
            clock,
            reset,
        }
    }

    pub fn reset(&self) -> DailyReset {
        self.reset
    }

    pub async fn register_channel(
        &self,
        slack_channel_id: &str,
        name: &str,
    ) -> Result<Channel, StoreError> {
        if slack_channel_id.trim().is_empty() {
            return Err(StoreError::Validation("channel id must be present".to_string()));
        }
        self.store.upsert_channel(slack_channel_id, name).await
    }

    pub async fn register_user(
        &self,
        slack_user_id: &str,
        display_name: &str,
        rank: i32,
    ) -> Result<User, StoreError> {
        if slack_user_id.trim().is_empty() {
            return Err(StoreError::Validation("user id must be present".to_string()));
        }
        self.store
            .upsert_user(slack_user_id, display_name, rank)
            .await
    }

    pub async fn join(&self, channel_id: &str, user_id: &str) -> Result<QueueMembership, StoreError> {
        let new = NewMembership {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            created_at: self.clock.now(),
        };

        match self.store.create_membership(new).await {
            Ok(membership) => {
                info!(
                    membership_id = %membership.id,
                    %channel_id,
                    %user_id,
                    "joined queue"
                );
                Ok(membership)
            }
            Err(err @ StoreError::UniquenessViolation { .. }) => {
                warn!(%channel_id, %user_id, "already queued");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Whether the existing membership for this pair still counts as active.
    pub async fn is_active_member(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<bool, StoreError> {
        let now = self.clock.now();
        Ok(self
            .store
            .find_membership(channel_id, user_id)
            .await?
            .map_or(false, |m| self.reset.is_active(m.created_at, now)))
    }

    pub async fn active(&self) -> Result<Vec<QueueMembership>, StoreError> {
        let since = self.reset.most_recent(self.clock.now());
        self.store.active_memberships(since).await
    }

    /// Active memberships of one channel, in queue order.
    pub async fn active_for_channel(
        &self,
        channel_id: &str,
    ) -> Result<Vec<QueueMembership>, StoreError> {
        if self.store.find_channel(channel_id).await?.is_none() {
            return Err(StoreError::NotFound(format!("channel {}", channel_id)));
        }
        let mut active = self.active().await?;
        active.retain(|m| m.channel_id == channel_id);
        Ok(active)
    }
}
