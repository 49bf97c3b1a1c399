use crate::models::Channel;
use sqlx::PgPool;

pub async fn get_by_id(pool: &PgPool, id: &str) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, slack_channel_id, name, created_at, updated_at
        FROM channels
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Inserts the channel or returns the row already holding `slack_channel_id`.
pub async fn upsert(
    pool: &PgPool,
    id: &str,
    slack_channel_id: &str,
    name: &str,
) -> Result<Channel, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        INSERT INTO channels (id, slack_channel_id, name)
        VALUES ($1, $2, $3)
        ON CONFLICT (slack_channel_id)
            DO UPDATE SET slack_channel_id = EXCLUDED.slack_channel_id
        RETURNING id, slack_channel_id, name, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(slack_channel_id)
    .bind(name)
    .fetch_one(pool)
    .await
}
