use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    model::change::{ChangeAction, ChangeTable},
    server::{error::AppError, service::change_feed::ChangeFeed, service::poll::PollService},
};

/// Starts the poll closing scheduler
///
/// Runs at the start of every minute and closes polls whose `closes_at` has passed,
/// publishing a poll update for each so open clients refresh the results.
///
/// # Arguments
/// - `db`: Database connection
/// - `changes`: Change feed the closed polls are announced on
pub async fn start_scheduler(db: DatabaseConnection, changes: ChangeFeed) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let changes = changes.clone();

        Box::pin(async move {
            if let Err(e) = close_expired_polls(&db, &changes).await {
                tracing::error!("Error closing expired polls: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Poll closing scheduler started");

    Ok(())
}

async fn close_expired_polls(db: &DatabaseConnection, changes: &ChangeFeed) -> Result<(), AppError> {
    let closed = PollService::new(db).close_expired(Utc::now()).await?;

    for (poll_id, community_id) in &closed {
        changes.publish_in_community(ChangeTable::Poll, ChangeAction::Update, *poll_id, *community_id);
    }

    if !closed.is_empty() {
        tracing::info!("Closed {} expired polls", closed.len());
    }

    Ok(())
}
