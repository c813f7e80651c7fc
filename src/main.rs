use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use portfolio_contact::{
    background_task::start_prune_task,
    cors::build_cors,
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::{AppConfig, LogFormat},
    telemetry::init_tracing,
    AppState
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => {
            init_tracing(cfg.log_format);
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            init_tracing(LogFormat::Pretty);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(
        AppState::new(&config).context("Failed to build application state")?
    );

    if !app_state.contact_handler.notifier.is_configured() {
        tracing::warn!("Telegram credentials missing; contact submissions will fail with 500");
    }

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {} (rate limit backend: {})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        app_state.contact_handler.guard.backend()
    );

    let guard = app_state.contact_handler.guard.clone();
    let cors_origins = config.cors_origins();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run();

    tokio::spawn(start_prune_task(guard, config.prune_interval()));

    tokio::select! {
        res = server => res.context("Server error"),
        _ = shutdown_signal() => Ok(()),
    }
}
