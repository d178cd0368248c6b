//! Cron scheduler for the notification triggers.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use crescendo_core::error::AppError;

use crate::trigger::TriggerJob;

/// Cron-based scheduler running [`TriggerJob`]s.
///
/// Each registered job gets its own overlap guard: a firing that arrives
/// while the previous body of the same job is still running is skipped, so
/// one trigger's runs never overlap while different triggers stay
/// independent.
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler })
    }

    /// Register a trigger job under a cron expression.
    pub async fn register(&self, cron: &str, job: Arc<dyn TriggerJob>) -> Result<(), AppError> {
        let name = job.name();
        let guard = Arc::new(tokio::sync::Mutex::new(()));

        let cron_job = CronJob::new_async(cron, move |_uuid, _lock| {
            let job = Arc::clone(&job);
            let guard = Arc::clone(&guard);
            Box::pin(async move {
                let Ok(_running) = guard.try_lock() else {
                    tracing::warn!(job = job.name(), "Previous run still active, skipping firing");
                    return;
                };

                tracing::debug!(job = job.name(), "Trigger fired");
                match job.run().await {
                    Ok(outcome) => tracing::info!(
                        job = job.name(),
                        processed = outcome.processed,
                        sent = outcome.sent,
                        failed = outcome.failed,
                        "Trigger run complete"
                    ),
                    Err(e) => tracing::error!(job = job.name(), "Trigger run failed: {}", e),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create schedule for '{name}': {e}")))?;

        self.scheduler
            .add(cron_job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add schedule for '{name}': {e}")))?;

        tracing::info!(job = name, cron, "Registered trigger");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
