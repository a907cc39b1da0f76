use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::signal;
use tracing::info;

use crate::{
    config::Config,
    error::{Error, Result},
    merger::{valid_urls, Aggregator, Fetcher, Numbers},
};

pub struct Server {
    config: Config,
    app: Router,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let aggregator = Aggregator::new(Fetcher::new(config.fetch_timeout()));

        Self {
            app: router(aggregator),
            config,
        }
    }

    pub async fn serve(self) -> Result<()> {
        let listener =
            tokio::net::TcpListener::bind(format!("{}:{}", &self.config.host, &self.config.port))
                .await?;

        info!("Started listening on {}:{}", &self.config.host, &self.config.port);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Error::IO)
    }
}

pub fn router(aggregator: Aggregator) -> Router {
    Router::new()
        .route("/numbers", get(numbers_handler))
        .with_state(aggregator)
}

async fn numbers_handler(
    State(aggregator): State<Aggregator>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let candidates = params
        .into_iter()
        .filter(|(key, _)| key == "url")
        .map(|(_, value)| value)
        .collect::<Vec<String>>();

    if candidates.is_empty() {
        return Err(Error::MissingUrlParameter);
    }

    let urls = valid_urls(candidates);
    let url_count = urls.len();

    let started = Instant::now();
    let numbers = aggregator.aggregate(urls).await;
    let elapsed = started.elapsed();

    info!(urls = url_count, merged = numbers.len(), ?elapsed, "aggregated numbers");

    let body = serde_json::to_vec(&Numbers { numbers })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
}
