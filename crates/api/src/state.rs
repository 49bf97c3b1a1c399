use roombot_core::{QueueService, Responder, RoomDirectory};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn RoomDirectory>,
    pub queues: QueueService,
    pub responder: Responder,
    pub roombot_env: String,
}

#[derive(Debug, Clone)]
pub struct RequestId(pub String);
