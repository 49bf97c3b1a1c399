use chrono::{DateTime, Utc};
use roombot_core::types;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomDirection {
    pub id: i64,
    pub room_name: String,
    pub direction: String,
    pub notes: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: String,
    pub slack_channel_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub slack_user_id: String,
    pub display_name: String,
    pub rank: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChannelQueueMembership {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<RoomDirection> for types::DirectoryEntry {
    fn from(row: RoomDirection) -> Self {
        Self {
            id: row.id,
            room_name: row.room_name,
            direction: row.direction,
            notes: row.notes,
            image: row.image,
        }
    }
}

impl From<Channel> for types::Channel {
    fn from(row: Channel) -> Self {
        Self {
            id: row.id,
            slack_channel_id: row.slack_channel_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<User> for types::User {
    fn from(row: User) -> Self {
        Self {
            id: row.id,
            slack_user_id: row.slack_user_id,
            display_name: row.display_name,
            rank: row.rank,
            created_at: row.created_at,
        }
    }
}

impl From<ChannelQueueMembership> for types::QueueMembership {
    fn from(row: ChannelQueueMembership) -> Self {
        Self {
            id: row.id,
            channel_id: row.channel_id,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}
