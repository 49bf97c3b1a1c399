use crate::models::RoomDirection;
use sqlx::PgPool;

pub async fn list(pool: &PgPool) -> Result<Vec<RoomDirection>, sqlx::Error> {
    sqlx::query_as::<_, RoomDirection>(
        r#"
        SELECT id, room_name, direction, notes, image, created_at, updated_at
        FROM room_directions
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// `key` must already be normalized; the column is normalized the same way.
pub async fn get_by_key(pool: &PgPool, key: &str) -> Result<Option<RoomDirection>, sqlx::Error> {
    sqlx::query_as::<_, RoomDirection>(
        r#"
        SELECT id, room_name, direction, notes, image, created_at, updated_at
        FROM room_directions
        WHERE lower(regexp_replace(room_name, '\s', '', 'g')) = $1
        LIMIT 1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}
