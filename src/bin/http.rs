use std::net::SocketAddr;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use yoga_log::{CourseLog, FileCourseStore, http_api};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "yoga_log=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("YOGA_LOG_HTTP_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    let slot = std::env::var("YOGA_LOG_PATH").unwrap_or_else(|_| "yoga_log.json".to_string());

    let store = FileCourseStore::new(&slot);
    let log = CourseLog::open(Box::new(store));
    http_api::serve(addr, log).await?;
    Ok(())
}
