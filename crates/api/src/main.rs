use roombot_core::{config::Settings, QueueService, Responder, SystemClock};
use roombot_db::PgStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod error;
mod middleware;
mod render;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let settings = Settings::from_env()?;
    let reset = settings.daily_reset()?;

    let pool = roombot_db::connect(&settings.database_url, settings.db_max_connections).await?;
    let store = Arc::new(PgStore::new(pool));

    let state = AppState {
        directory: store.clone(),
        queues: QueueService::new(store, Arc::new(SystemClock), reset),
        responder: Responder::new(settings.floor_map_url.clone()),
        roombot_env: settings.roombot_env.clone(),
    };

    let addr: SocketAddr = settings.api_bind.parse()?;

    info!(
        %addr,
        env = %settings.roombot_env,
        queue_timezone = %settings.queue_timezone,
        queue_reset_hour = settings.queue_reset_hour,
        "starting api"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, routes::app(state)).await?;

    Ok(())
}
