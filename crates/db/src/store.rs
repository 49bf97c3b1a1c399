use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roombot_core::error::StoreError;
use roombot_core::store::{QueueStore, RoomDirectory};
use roombot_core::types::{
    new_id, Channel, DirectoryEntry, NewMembership, QueueMembership, User, CHANNEL_ID_PREFIX,
    MEMBERSHIP_ID_PREFIX, USER_ID_PREFIX,
};
use sqlx::PgPool;

use crate::queries;

/// Postgres-backed store. Membership uniqueness comes from the
/// `(channel_id, user_id)` unique constraint.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn membership_error(err: sqlx::Error, new: &NewMembership) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return StoreError::UniquenessViolation {
                channel_id: new.channel_id.clone(),
                user_id: new.user_id.clone(),
            };
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::Validation(format!(
                "channel {} or user {} does not exist",
                new.channel_id, new.user_id
            ));
        }
    }
    backend(err)
}

#[async_trait]
impl RoomDirectory for PgStore {
    async fn list_rooms(&self) -> Result<Vec<DirectoryEntry>, StoreError> {
        let rows = queries::rooms::list(&self.pool).await.map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_room(&self, key: &str) -> Result<Option<DirectoryEntry>, StoreError> {
        let row = queries::rooms::get_by_key(&self.pool, key)
            .await
            .map_err(backend)?;
        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl QueueStore for PgStore {
    async fn find_channel(&self, id: &str) -> Result<Option<Channel>, StoreError> {
        let row = queries::channels::get_by_id(&self.pool, id)
            .await
            .map_err(backend)?;
        Ok(row.map(Into::into))
    }

    async fn upsert_channel(
        &self,
        slack_channel_id: &str,
        name: &str,
    ) -> Result<Channel, StoreError> {
        let id = new_id(CHANNEL_ID_PREFIX);
        let row = queries::channels::upsert(&self.pool, &id, slack_channel_id, name)
            .await
            .map_err(backend)?;
        Ok(row.into())
    }

    async fn upsert_user(
        &self,
        slack_user_id: &str,
        display_name: &str,
        rank: i32,
    ) -> Result<User, StoreError> {
        let id = new_id(USER_ID_PREFIX);
        let row = queries::users::upsert(&self.pool, &id, slack_user_id, display_name, rank)
            .await
            .map_err(backend)?;
        Ok(row.into())
    }

    async fn create_membership(&self, new: NewMembership) -> Result<QueueMembership, StoreError> {
        new.validate()?;

        let id = new_id(MEMBERSHIP_ID_PREFIX);
        let row = queries::memberships::create(
            &self.pool,
            &id,
            &new.channel_id,
            &new.user_id,
            new.created_at,
        )
        .await
        .map_err(|err| membership_error(err, &new))?;
        Ok(row.into())
    }

    async fn find_membership(
        &self,
        channel_id: &str,
        user_id: &str,
    ) -> Result<Option<QueueMembership>, StoreError> {
        let row = queries::memberships::get_by_pair(&self.pool, channel_id, user_id)
            .await
            .map_err(backend)?;
        Ok(row.map(Into::into))
    }

    async fn active_memberships(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<QueueMembership>, StoreError> {
        let rows = queries::memberships::list_created_since(&self.pool, since)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
