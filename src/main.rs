use std::sync::Arc;

use tracing::info;

use stock_console::{
    build_router, config::Config, service::StockService, view::StockView, AppState, VIEW_PATH,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,stock_console=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!(api = %config.api_base_url, "Using inventory service");

    let service = Arc::new(StockService::new(config.api_base_url.clone()));
    let view = Arc::new(StockView::new(service, config.message_ttl));

    // Failures here only leave an error message on the page.
    view.init().await;

    let app = build_router(AppState { view });

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}{}", addr, VIEW_PATH);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
