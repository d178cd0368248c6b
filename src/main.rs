//! Crescendo Server — release-notification engine
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{fmt, EnvFilter};

use crescendo_core::config::AppConfig;
use crescendo_core::error::AppError;
use crescendo_core::traits::{
    ChannelBindingRepository, ChatTransport, FollowRepository, MailTransport,
    NotificationConfigRepository, ReleaseSource, UserRepository,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("CRESCENDO_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Crescendo v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = crescendo_database::connection::DatabasePool::connect(&config.database).await?;
    crescendo_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo: Arc<dyn UserRepository> = Arc::new(
        crescendo_database::repositories::PgUserRepository::new(db.pool().clone()),
    );
    let follow_repo: Arc<dyn FollowRepository> = Arc::new(
        crescendo_database::repositories::PgFollowRepository::new(db.pool().clone()),
    );
    let config_repo: Arc<dyn NotificationConfigRepository> = Arc::new(
        crescendo_database::repositories::PgNotificationConfigRepository::new(db.pool().clone()),
    );
    let binding_repo: Arc<dyn ChannelBindingRepository> = Arc::new(
        crescendo_database::repositories::PgChannelBindingRepository::new(db.pool().clone()),
    );

    // ── Step 3: External collaborators ───────────────────────────
    let release_source: Arc<dyn ReleaseSource> =
        Arc::new(crescendo_index::IndexClient::new(&config.index)?);
    let mail_transport: Arc<dyn MailTransport> =
        Arc::new(crescendo_notify::SmtpMailTransport::new(&config.mail)?);
    let chat_transport: Arc<dyn ChatTransport> =
        Arc::new(crescendo_notify::TelegramApiTransport::new(&config.telegram)?);

    // ── Step 4: Services ─────────────────────────────────────────
    let collector = Arc::new(crescendo_service::release::ReleaseCollector::new(
        Arc::clone(&release_source),
        Arc::clone(&follow_repo),
    ));

    let email_sender = Arc::new(crescendo_service::notification::EmailNotificationSender::new(
        Arc::clone(&mail_transport),
    ));
    let telegram_sender = Arc::new(
        crescendo_service::notification::TelegramNotificationSender::new(
            Arc::clone(&chat_transport),
            Arc::clone(&config_repo),
            Arc::clone(&binding_repo),
        ),
    );
    let dispatcher = Arc::new(crescendo_service::notification::ChannelDispatcher::new(
        email_sender,
        telegram_sender,
    ));

    let settings_service = Arc::new(
        crescendo_service::notification::NotificationSettingsService::new(
            Arc::clone(&config_repo),
            Arc::clone(&binding_repo),
        ),
    );
    let binding_service = Arc::new(crescendo_service::notification::ChannelBindingService::new(
        Arc::clone(&config_repo),
        Arc::clone(&binding_repo),
        Arc::clone(&chat_transport),
    ));

    // ── Step 5: Trigger scheduler ────────────────────────────────
    // Held until shutdown; dropping it would stop the triggers.
    let scheduler = if config.worker.enabled {
        let scheduler = crescendo_worker::scheduler::CronScheduler::new().await?;

        scheduler
            .register(
                &config.worker.frequency_cron,
                Arc::new(crescendo_worker::jobs::FrequencyTriggerJob::new(
                    Arc::clone(&config_repo),
                    Arc::clone(&user_repo),
                    Arc::clone(&collector),
                    Arc::clone(&dispatcher),
                )),
            )
            .await?;
        scheduler
            .register(
                &config.worker.release_date_cron,
                Arc::new(crescendo_worker::jobs::ReleaseDateTriggerJob::new(
                    Arc::clone(&config_repo),
                    Arc::clone(&user_repo),
                    Arc::clone(&collector),
                    Arc::clone(&dispatcher),
                )),
            )
            .await?;
        scheduler
            .register(
                &config.worker.announcement_date_cron,
                Arc::new(crescendo_worker::jobs::AnnouncementDateTriggerJob::new(
                    Arc::clone(&config_repo),
                    Arc::clone(&user_repo),
                    Arc::clone(&collector),
                    Arc::clone(&dispatcher),
                )),
            )
            .await?;

        scheduler.start().await?;
        tracing::info!("Notification triggers scheduled");
        Some(scheduler)
    } else {
        tracing::info!("Trigger scheduler disabled");
        None
    };

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = crescendo_api::state::AppState {
        config: Arc::new(config.clone()),
        settings: settings_service,
        bindings: binding_service,
    };
    let app = crescendo_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Crescendo server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    tracing::info!("Crescendo server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
