//! Keep-alive monitor binary

use std::sync::Arc;
use tracing::{error, info, warn};
use wakeweb::server::AppState;
use wakeweb::{BootClock, Config, Journal, Scheduler, VirtualClock, WebDriverSession, server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    initialize_tracing();

    info!("Starting wakeweb v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let boot = match BootClock::load_or_init(&config.boot_time_path).await {
        Ok(boot) => boot,
        Err(e) => {
            error!("Failed to load boot record: {}", e);
            std::process::exit(1);
        }
    };

    let clock = match VirtualClock::from_boot(boot) {
        Ok(clock) => clock,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // Nothing can run without the browser session; launch failure is fatal
    // and the process never reaches scheduling.
    let session = match WebDriverSession::launch(&config.webdriver_url, config.driver_timeout).await
    {
        Ok(session) => Arc::new(session),
        Err(e) => {
            error!("Failed to launch browser session: {}", e);
            std::process::exit(1);
        }
    };

    let journal = Journal::new(config.log_path.clone());
    let port = config.port;

    let scheduler = Scheduler::new(config, session.clone(), journal.clone());
    tokio::spawn(async move { scheduler.run().await });

    let result = server::serve(AppState { clock, journal }, port).await;

    if let Err(e) = session.quit().await {
        warn!("Failed to end browser session: {}", e);
    }

    result
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
