use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{stream, Stream};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, change::ChangeEventDto},
    server::{error::AppError, middleware::auth::AuthGuard, state::AppState},
};

pub static CHANGES_TAG: &str = "changes";

/// Streams change notifications as Server-Sent Events.
///
/// Each event carries a `ChangeEventDto` as JSON data. A subscriber that falls behind the
/// broadcast buffer skips the missed events and continues with the next one.
#[utoipa::path(
    get,
    path = "/api/changes",
    tag = CHANGES_TAG,
    responses(
        (status = 200, description = "Event stream of data changes", content_type = "text/event-stream", body = ChangeEventDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn stream_changes(
    State(state): State<AppState>,
    session: Session,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    tracing::debug!("User {} subscribed to changes", user.id);

    let events = stream::unfold(state.changes.subscribe(), |mut receiver| async move {
        let event = next_event(&mut receiver).await?;
        Some((Ok(event), receiver))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Waits for the next change that serializes; `None` once the feed is closed.
async fn next_event(receiver: &mut Receiver<ChangeEventDto>) -> Option<Event> {
    loop {
        match receiver.recv().await {
            Ok(change) => match Event::default().json_data(&change) {
                Ok(event) => return Some(event),
                Err(e) => tracing::error!("Failed to serialize change event: {}", e),
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Change subscriber lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}
