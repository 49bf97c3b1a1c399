use crate::models::ChannelQueueMembership;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    id: &str,
    channel_id: &str,
    user_id: &str,
    created_at: DateTime<Utc>,
) -> Result<ChannelQueueMembership, sqlx::Error> {
    sqlx::query_as::<_, ChannelQueueMembership>(
        r#"
        INSERT INTO channel_queue_memberships (id, channel_id, user_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, channel_id, user_id, created_at
        "#,
    )
    .bind(id)
    .bind(channel_id)
    .bind(user_id)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_by_pair(
    pool: &PgPool,
    channel_id: &str,
    user_id: &str,
) -> Result<Option<ChannelQueueMembership>, sqlx::Error> {
    sqlx::query_as::<_, ChannelQueueMembership>(
        r#"
        SELECT id, channel_id, user_id, created_at
        FROM channel_queue_memberships
        WHERE channel_id = $1 AND user_id = $2
        "#,
    )
    .bind(channel_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_created_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> Result<Vec<ChannelQueueMembership>, sqlx::Error> {
    sqlx::query_as::<_, ChannelQueueMembership>(
        r#"
        SELECT id, channel_id, user_id, created_at
        FROM channel_queue_memberships
        WHERE created_at >= $1
        ORDER BY created_at ASC, seq ASC
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await
}
