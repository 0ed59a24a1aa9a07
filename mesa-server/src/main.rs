use mesa_server::core::{Config, Server};
use mesa_server::utils::logger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    let log_level = std::env::var("LOG_LEVEL").ok();
    logger::init_logger(log_level.as_deref(), None);

    tracing::info!("Starting mesa-server (env: {})", config.environment);

    Server::new(config).run().await
}
