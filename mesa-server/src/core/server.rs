//! HTTP server startup and shutdown.

use crate::api;
use crate::core::{Config, ServerState};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<(), BoxError> {
        let state = ServerState::initialize(&self.config).await?;
        let app = api::create_router(state);

        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!(
            "mesa-server listening on {addr} (env: {}, tz: {})",
            self.config.environment,
            self.config.timezone
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}
