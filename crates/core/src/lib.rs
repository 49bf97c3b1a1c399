pub mod config;
pub mod error;
pub mod queue;
pub mod responder;
pub mod schedule;
pub mod store;
pub mod text;
pub mod types;

pub use error::{ConfigError, StoreError};
pub use queue::QueueService;
pub use responder::Responder;
pub use schedule::{Clock, DailyReset, FixedClock, SystemClock};
pub use store::{MemoryStore, QueueStore, RoomDirectory};
