//! In-process broadcast of data changes for realtime subscribers.

use tokio::sync::broadcast;

use crate::model::change::{ChangeAction, ChangeEventDto, ChangeTable};

/// Number of events a slow subscriber may fall behind before it starts skipping.
const CHANNEL_CAPACITY: usize = 256;

/// Broadcast channel of `ChangeEventDto`s.
///
/// Controllers publish after a mutation succeeded; every `/api/changes` stream holds a
/// receiver. Publishing with no subscribers is not an error.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEventDto>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEventDto> {
        self.sender.subscribe()
    }

    /// Publishes a change of a row that does not belong to a group.
    pub fn publish(&self, table: ChangeTable, action: ChangeAction, id: i32) {
        self.send(ChangeEventDto {
            table,
            action,
            id,
            community_id: None,
        });
    }

    /// Publishes a change of a row scoped to a group, so clients can filter by group.
    pub fn publish_in_community(
        &self,
        table: ChangeTable,
        action: ChangeAction,
        id: i32,
        community_id: i32,
    ) {
        self.send(ChangeEventDto {
            table,
            action,
            id,
            community_id: Some(community_id),
        });
    }

    fn send(&self, event: ChangeEventDto) {
        // Err only means nobody is listening
        let receivers = self.sender.send(event.clone()).unwrap_or(0);
        tracing::trace!(
            "Published {:?} {:?} {} to {} subscribers",
            event.action,
            event.table,
            event.id,
            receivers
        );
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
