use tracing_subscriber::EnvFilter;

use solace_lambda::config::ServiceConfig;
use solace_lambda::middleware::auth::AuthMode;
use solace_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env()?;
    let store = config.build_store().await;
    let auth = if config.lambda_runtime {
        AuthMode::Gateway
    } else {
        AuthMode::Local
    };
    let app = solace_lambda::app(AppState::new(store, auth));

    if config.lambda_runtime {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, store = %config.store, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
