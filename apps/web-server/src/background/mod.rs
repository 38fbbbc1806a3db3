//! Periodic sweep of expired sessions out of the cache.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use sample_core::ports::Cache;

use crate::state::AppState;

/// Every ten minutes, on the minute.
pub const DEFAULT_SWEEP_SCHEDULE: &str = "0 */10 * * * *";

#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// When false the sweeper is built but never started.
    pub enabled: bool,
    /// Six-field cron expression, seconds first.
    pub schedule: String,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            schedule: DEFAULT_SWEEP_SCHEDULE.to_string(),
        }
    }
}

impl SweeperConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("SESSION_SWEEP_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            schedule: std::env::var("SESSION_SWEEP_SCHEDULE").unwrap_or(defaults.schedule),
        }
    }
}

/// Owns the cron scheduler running the session sweep.
pub struct SessionSweeper {
    scheduler: JobScheduler,
    running: bool,
}

impl SessionSweeper {
    pub async fn new(cache: Arc<dyn Cache>, config: &SweeperConfig) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;

        let job = Job::new_async(config.schedule.as_str(), move |_id, _lock| {
            let cache = cache.clone();
            Box::pin(async move {
                sweep(cache.as_ref()).await;
            })
        })?;
        let job_id = scheduler.add(job).await?;
        tracing::debug!(schedule = %config.schedule, %job_id, "Session sweep registered");

        let mut sweeper = Self {
            scheduler,
            running: false,
        };
        if config.enabled {
            sweeper.scheduler.start().await?;
            sweeper.running = true;
            tracing::info!("Session sweeper started");
        } else {
            tracing::info!("Session sweeper disabled");
        }
        Ok(sweeper)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn shutdown(&mut self) -> Result<(), JobSchedulerError> {
        if self.running {
            self.scheduler.shutdown().await?;
            self.running = false;
            tracing::info!("Session sweeper stopped");
        }
        Ok(())
    }
}

/// Drop expired sessions once, returning how many went.
pub async fn sweep(cache: &dyn Cache) -> usize {
    let purged = cache.purge_expired().await;
    if purged > 0 {
        tracing::info!(purged, "Expired sessions purged");
    } else {
        tracing::debug!("No expired sessions");
    }
    purged
}

/// Start sweeping the sessions held by `state`.
pub async fn start(state: &AppState, config: SweeperConfig) -> Result<SessionSweeper, JobSchedulerError> {
    SessionSweeper::new(state.cache.clone(), &config).await
}
