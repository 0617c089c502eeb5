use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use triage_recommender::config;
use triage_recommender::utils::{logger, validation::Validate};
use triage_recommender::{
    build_router, AppConfig, AppState, CliConfig, DepartmentCatalog, GeminiClient, Recommender,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 必須在 clap 讀取環境變數之前載入
    let dotenv = config::load_env_file(None);
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.json_logs);

    tracing::info!("🚀 Starting triage-recommender");
    match dotenv {
        Ok(Some(path)) => tracing::info!("📄 Loaded environment from {}", path.display()),
        Ok(None) => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("⚠️ {}", e),
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = AppConfig::resolve(&cli).context("failed to load configuration")?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e).context("invalid configuration");
    }

    if config.gemini.api_key.is_empty() {
        tracing::warn!("⚠️ GOOGLE_API_KEY is not set; completion requests will fail upstream");
    }
    if config.strict_catalog {
        tracing::info!("🔒 Strict catalog validation enabled");
    }

    let completion = GeminiClient::new(config.gemini.clone())?;
    let recommender = Recommender::new(Arc::new(completion), DepartmentCatalog::standard())
        .with_strict_catalog(config.strict_catalog);
    let app = build_router(AppState::new(recommender));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!(
        model = %config.gemini.model,
        "📡 Listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
