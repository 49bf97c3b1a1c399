use axum::{body::to_bytes, response::Response};
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::America::Los_Angeles;
use roombot_core::{types::DirectoryEntry, DailyReset, FixedClock, MemoryStore, QueueService, Responder};
use std::sync::Arc;

use crate::state::AppState;

pub fn today_boundary() -> DateTime<Utc> {
    Los_Angeles
        .with_ymd_and_hms(2024, 5, 20, 7, 0, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

fn rooms() -> Vec<DirectoryEntry> {
    vec![
        DirectoryEntry {
            id: 1,
            room_name: "Camino".to_string(),
            direction: "Second floor, past the kitchen".to_string(),
            notes: Some("Badge required".to_string()),
            image: Some("https://img.example/camino.png".to_string()),
        },
        DirectoryEntry {
            id: 2,
            room_name: "Big Sur".to_string(),
            direction: "Ground floor, next to reception".to_string(),
            notes: None,
            image: None,
        },
    ]
}

pub fn state() -> AppState {
    state_at(today_boundary() + Duration::hours(1), None).0
}

/// State whose clock is frozen at `now`, optionally sharing an existing store.
pub fn state_at(
    now: DateTime<Utc>,
    store: Option<Arc<MemoryStore>>,
) -> (AppState, Arc<MemoryStore>) {
    let store = store.unwrap_or_else(|| Arc::new(MemoryStore::with_rooms(rooms())));
    let state = AppState {
        directory: store.clone(),
        queues: QueueService::new(
            store.clone(),
            Arc::new(FixedClock(now)),
            DailyReset::new(Los_Angeles, 7).unwrap(),
        ),
        responder: Responder::default(),
        roombot_env: "test".to_string(),
    };
    (state, store)
}

pub async fn body_text(response: Response) -> String {
    let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
