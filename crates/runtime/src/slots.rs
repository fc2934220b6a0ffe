//! Save/load slot selection as request/response messages.
//!
//! The runtime never blocks on the player: a request is published on the
//! `Persistence` topic and whoever owns the prompt answers through
//! [`SlotRequests::respond`]. The requester awaits the returned
//! [`PendingSlot`] only if it needs the answer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, PersistenceEvent, SlotPurpose, SlotRequestId};

type Pending = HashMap<SlotRequestId, oneshot::Sender<Option<u8>>>;

#[derive(Debug, Clone)]
pub struct SlotRequests {
    bus: EventBus,
    pending: Arc<Mutex<Pending>>,
    next_id: Arc<AtomicU64>,
}

impl SlotRequests {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            pending: Arc::default(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publishes a slot prompt and returns a handle to its answer.
    ///
    /// Requests whose [`PendingSlot`] was dropped are forgotten here.
    pub fn request(&self, purpose: SlotPurpose) -> PendingSlot {
        let request = SlotRequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = oneshot::channel();
        let mut pending = self.lock();
        prune_abandoned(&mut pending);
        pending.insert(request, tx);
        drop(pending);

        tracing::debug!(%request, %purpose, "slot requested");
        self.bus
            .publish(Event::Persistence(PersistenceEvent::SlotRequested {
                request,
                purpose,
            }));

        PendingSlot {
            request,
            purpose,
            rx,
        }
    }

    /// Answers a pending request. `None` means the player cancelled.
    pub fn respond(&self, request: SlotRequestId, slot: Option<u8>) -> Result<()> {
        let tx = self
            .lock()
            .remove(&request)
            .ok_or(RuntimeError::UnknownSlotRequest(request))?;

        tx.send(slot)
            .map_err(|_| RuntimeError::SlotRequestDropped(request))?;

        self.bus
            .publish(Event::Persistence(PersistenceEvent::SlotResolved {
                request,
                slot,
            }));
        Ok(())
    }

    /// Requests still awaiting an answer. Abandoned ones are not counted.
    pub fn pending(&self) -> usize {
        let mut pending = self.lock();
        prune_abandoned(&mut pending);
        pending.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn prune_abandoned(pending: &mut Pending) {
    pending.retain(|request, tx| {
        let abandoned = tx.is_closed();
        if abandoned {
            tracing::debug!(%request, "slot request abandoned");
        }
        !abandoned
    });
}

/// Answer to one slot request, resolved by [`SlotRequests::respond`].
#[derive(Debug)]
pub struct PendingSlot {
    request: SlotRequestId,
    purpose: SlotPurpose,
    rx: oneshot::Receiver<Option<u8>>,
}

impl PendingSlot {
    pub fn id(&self) -> SlotRequestId {
        self.request
    }

    pub fn purpose(&self) -> SlotPurpose {
        self.purpose
    }

    /// Waits for the answer.
    pub async fn wait(self) -> Result<Option<u8>> {
        self.rx.await.map_err(RuntimeError::SlotChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;

    #[tokio::test]
    async fn respond_resolves_the_waiting_request() {
        let bus = EventBus::new();
        let mut persistence = bus.subscribe(Topic::Persistence);
        let slots = SlotRequests::new(bus);

        let pending = slots.request(SlotPurpose::Save);
        let id = pending.id();
        slots.respond(id, Some(3)).unwrap();

        assert_eq!(pending.wait().await.unwrap(), Some(3));
        assert_eq!(
            persistence.recv().await.unwrap(),
            Event::Persistence(PersistenceEvent::SlotRequested {
                request: id,
                purpose: SlotPurpose::Save,
            })
        );
        assert_eq!(
            persistence.recv().await.unwrap(),
            Event::Persistence(PersistenceEvent::SlotResolved {
                request: id,
                slot: Some(3),
            })
        );
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn answering_twice_is_rejected() {
        let slots = SlotRequests::new(EventBus::new());
        let pending = slots.request(SlotPurpose::Load);
        let id = pending.id();

        slots.respond(id, None).unwrap();

        assert!(matches!(
            slots.respond(id, None),
            Err(RuntimeError::UnknownSlotRequest(request)) if request == id
        ));
    }

    #[test]
    fn dropped_requester_is_reported() {
        let slots = SlotRequests::new(EventBus::new());
        let id = slots.request(SlotPurpose::Save).id();

        assert!(matches!(
            slots.respond(id, Some(1)),
            Err(RuntimeError::SlotRequestDropped(request)) if request == id
        ));
    }

    #[test]
    fn abandoned_requests_are_forgotten() {
        let slots = SlotRequests::new(EventBus::new());
        let abandoned = slots.request(SlotPurpose::Save).id();
        let kept = slots.request(SlotPurpose::Load);

        assert_eq!(slots.pending(), 1);
        assert!(matches!(
            slots.respond(abandoned, Some(2)),
            Err(RuntimeError::UnknownSlotRequest(request)) if request == abandoned
        ));

        drop(kept);
        assert_eq!(slots.pending(), 0);
    }
}
