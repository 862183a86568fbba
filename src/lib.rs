//! Two small HTTP demo services sharing one library.
//!
//! - **Brew Master** (`coffee-shop` binary): a fixed coffee menu with lookup
//!   by id and a tip calculator.
//! - **Recipe Master** (`recipe-master` binary): recipe submissions checked
//!   against field constraints and a cross-field total-time rule.
//!
//! # Configuration
//!
//! Read from the environment (and a `.env` file when present):
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` coffee shop, `8001` recipe master |
//! | `INDEX_HTML_PATH` | `static/coffee_shop.html`, `static/recipe_master.html` |
//! | `REQUEST_LOG_PATH` | unset, no request ledger |
//! | `RUST_LOG` | `info` |
//!
//! ```sh
//! cargo run --bin coffee-shop
//! cargo run --bin recipe-master
//! ```

use std::{io, sync::Arc};

use axum::{Router, routing::{get, post}};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod menu;
pub mod metrics;
pub mod models;
pub mod validation;

use config::{Config, Defaults};
use error::StartupError;
use metrics::Metrics;

pub const COFFEE_SHOP: &str = "coffee-shop";
pub const RECIPE_MASTER: &str = "recipe-master";

// shared by every handler of one service, nothing in here is mutated
// except the atomic counters
#[derive(Clone)]
pub struct AppState {
    pub service: &'static str,
    pub config: Arc<Config>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(service: &'static str, config: Config) -> Self {

        Self {
            service,
            config: Arc::new(config),
            metrics: Arc::new(Metrics::new()),
        }

    }
}

pub fn coffee_shop_router(state: AppState) -> Router {

    Router::new()
        .route("/", get(handlers::index))
        .route("/welcome", get(handlers::coffee_welcome))
        .route("/menu/coffee/:coffee_id", get(handlers::coffee_by_id))
        .route("/calculate/total/:coffee_price", get(handlers::calculate_total))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)

}

pub fn recipe_router(state: AppState) -> Router {

    Router::new()
        .route("/", get(handlers::index))
        .route("/welcome", get(handlers::recipe_welcome))
        .route("/recipes", post(handlers::create_recipe))
        .route("/recipes/", post(handlers::create_recipe))
        .route("/recipes/validate-advanced", post(handlers::validate_advanced_recipe))
        .route("/recipes/validate-advanced/", post(handlers::validate_advanced_recipe))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)

}

/// Load the environment, build the service's router and serve it.
pub async fn run(
    service: &'static str,
    defaults: Defaults,
    router: fn(AppState) -> Router
) -> Result<(), StartupError> {

    let config = Config::load(defaults)?;
    let app = router(AppState::new(service, config.clone()));

    serve(app, &config).await

}

/// Resolve `HOST` (an IP or a name like `localhost`) and bind to `PORT`.
pub async fn bind(config: &Config) -> io::Result<TcpListener> {

    info!("Binding to {}:{}", config.host, config.port);
    TcpListener::bind((config.host.as_str(), config.port)).await

}

/// Bind the configured address and serve `app` until Ctrl+C or SIGTERM.
pub async fn serve(app: Router, config: &Config) -> Result<(), StartupError> {

    let listener = bind(config).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())

}

async fn shutdown_signal() {

    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

}

#[cfg(test)]
mod tests {

    use std::path::PathBuf;

    use super::*;

    fn config_for(host: &str) -> Config {

        Config {
            host: host.to_string(),
            port: 0,
            index_html_path: PathBuf::from("static/coffee_shop.html"),
            request_log_path: None,
        }

    }

    #[tokio::test]
    async fn test_bind_resolves_host_names() {

        let listener = bind(&config_for("localhost")).await.expect("localhost should bind");

        assert!(listener.local_addr().unwrap().ip().is_loopback());

    }

    #[tokio::test]
    async fn test_bind_accepts_ip_literals() {

        let listener = bind(&config_for("127.0.0.1")).await.unwrap();

        assert_ne!(listener.local_addr().unwrap().port(), 0);

    }

    #[tokio::test]
    async fn test_unresolvable_host_fails_to_bind() {

        assert!(bind(&config_for("not a host")).await.is_err());

    }

}
