use chrono::Local;
use habit_coach::{build_client, router, AppState, Config, SessionState};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let http = build_client(config.http_timeout)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    if config.openai_api_key.is_none() {
        info!("OPENAI_API_KEY not set; coach reports will show a setup hint");
    }
    if config.weather_api_key.is_none() {
        info!("OPENWEATHERMAP_API_KEY not set; weather will be unavailable");
    }

    let state = AppState::new(config, http, SessionState::new(Local::now().date_naive()));
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
