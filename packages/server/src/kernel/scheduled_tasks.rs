//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The only periodic task is the expiry sweep: any donation still `pending`
//! past its expiry time moves to `expired`. The sweep uses the same
//! conditional-update discipline as the user-facing transitions, so it can
//! never clobber a concurrent accept.

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::donations::Donation;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Expiry sweep - runs every minute
    let sweep_pool = pool.clone();
    let sweep_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let pool = sweep_pool.clone();
        Box::pin(async move {
            if let Err(e) = run_expiry_sweep(&pool).await {
                tracing::error!("Expiry sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (expiry sweep every minute)");
    Ok(scheduler)
}

/// Expire pending donations whose expiry time has passed
async fn run_expiry_sweep(pool: &PgPool) -> Result<()> {
    let expired = Donation::expire_due(pool).await?;

    if expired > 0 {
        tracing::info!("Expiry sweep complete: {} donations expired", expired);
    }

    Ok(())
}
