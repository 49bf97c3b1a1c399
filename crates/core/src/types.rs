use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const CHANNEL_ID_PREFIX: &str = "chn_";
pub const USER_ID_PREFIX: &str = "usr_";
pub const MEMBERSHIP_ID_PREFIX: &str = "cqm_";

pub fn new_id(prefix: &str) -> String {
    format!("{}{}", prefix, nanoid::nanoid!(12))
}

/// A meeting room and how to get there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub id: i64,
    pub room_name: String,
    pub direction: String,
    pub notes: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub slack_channel_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub slack_user_id: String,
    pub display_name: String,
    pub rank: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueMembership {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub channel_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl NewMembership {
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.channel_id.trim().is_empty() {
            return Err(StoreError::Validation("channel must be present".to_string()));
        }
        if self.user_id.trim().is_empty() {
            return Err(StoreError::Validation("user must be present".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub title: String,
    pub image_url: String,
}

/// Transport-neutral reply produced by the responder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(channel_id: &str, user_id: &str) -> NewMembership {
        NewMembership {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_requires_channel() {
        let err = membership("", "usr_1").validate().unwrap_err();
        assert!(matches!(err, StoreError::Validation(msg) if msg.contains("channel")));
    }

    #[test]
    fn test_validate_requires_user() {
        let err = membership("chn_1", "  ").validate().unwrap_err();
        assert!(matches!(err, StoreError::Validation(msg) if msg.contains("user")));
    }

    #[test]
    fn test_validate_ok() {
        assert!(membership("chn_1", "usr_1").validate().is_ok());
    }

    #[test]
    fn test_new_id_prefix() {
        let id = new_id(MEMBERSHIP_ID_PREFIX);
        assert!(id.starts_with("cqm_"));
        assert_eq!(id.len(), 16);
        assert_ne!(id, new_id(MEMBERSHIP_ID_PREFIX));
    }
}
