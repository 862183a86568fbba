use std::path::Path;
use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub fn init() {

    // RUST_LOG wins, otherwise info for everything
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // a second init (tests, embedding) keeps the first subscriber
    let _ = fmt().with_env_filter(filter).try_init();

}

pub fn format_entry(service: &str, route: &str, outcome: &str, detail: &str) -> String {

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} | {:13} | {:28} | {:10} | {}\n",
        timestamp, service, route, outcome, detail
    )

}

pub async fn log_request(
    ledger: Option<&Path>,
    service: &str,
    route: &str,
    outcome: &str,
    detail: &str,
) {

    info!(service, route, outcome, detail, "request handled");

    // the ledger file is opt-in through REQUEST_LOG_PATH
    let Some(log_path) = ledger else {
        return;
    };

    let log_entry = format_entry(service, route, outcome, detail);

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .await
    {
        Ok(mut file) => {
            // tokio finishes writes in the background, flush before the file drops
            let written = match file.write_all(log_entry.as_bytes()).await {
                Ok(()) => file.flush().await,
                Err(e) => Err(e)
            };
            if let Err(e) = written {
                warn!("Failed to write to log file {}: {}", log_path.display(), e);
            }
        }
        Err(e) => warn!("Failed to open log file {}: {}", log_path.display(), e)
    }

}
