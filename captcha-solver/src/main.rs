use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use captcha_solver::api::{create_router, AppState};
use captcha_solver::config::Config;
use captcha_solver::ocr::OcrProvider;
use captcha_solver::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "captcha_solver=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!(
        "Initializing OCR provider: tesseract ({})...",
        config.ocr.languages
    );
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - /solve will answer 503 until Tesseract is installed");
    }
    if config.ocr.preprocess {
        tracing::info!(
            max_dimension = config.ocr.max_image_dimension,
            "Image preprocessing enabled"
        );
    }

    let state = AppState::new(config.clone(), ocr);
    let app = create_router(state);

    let listener = server::bind(&config.server).await?;

    let addr = config.listen_addr();
    tracing::info!("Captcha solver server started at {}", config.server.port);
    tracing::info!("  Solve:        POST http://{}/solve", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);

    server::serve(listener, app, server::shutdown_signal()).await?;

    tracing::info!("Goodbye!");
    Ok(())
}
