use crate::models::User;
use sqlx::PgPool;

pub async fn get_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, slack_user_id, display_name, rank, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Inserts the user or returns the row already holding `slack_user_id`.
pub async fn upsert(
    pool: &PgPool,
    id: &str,
    slack_user_id: &str,
    display_name: &str,
    rank: i32,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, slack_user_id, display_name, rank)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (slack_user_id)
            DO UPDATE SET slack_user_id = EXCLUDED.slack_user_id
        RETURNING id, slack_user_id, display_name, rank, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(slack_user_id)
    .bind(display_name)
    .bind(rank)
    .fetch_one(pool)
    .await
}
