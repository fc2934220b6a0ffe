//! Fire-and-forget presentation of domain events.
//!
//! The dispatcher sits behind the core's [`EventSink`] and forwards events to
//! registered [`Presenter`]s. Each cue runs on its own tokio task bounded by a
//! timeout, so a slow or failing presenter can only produce a log line.

use std::sync::Arc;
use std::time::Duration;

use hexbound_core::{EventSink, GameEvent};
use tokio::runtime::Handle;

use crate::api::{Presenter, RuntimeError};
use crate::events::EventBus;

#[derive(Clone)]
pub struct PresentationDispatcher {
    presenters: Vec<Arc<dyn Presenter>>,
    timeout: Duration,
}

impl PresentationDispatcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

    pub fn new(timeout: Duration) -> Self {
        Self {
            presenters: Vec::new(),
            timeout,
        }
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenters.push(Arc::new(presenter));
        self
    }

    pub fn register(&mut self, presenter: Arc<dyn Presenter>) {
        self.presenters.push(presenter);
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_empty(&self) -> bool {
        self.presenters.is_empty()
    }

    /// Spawns one job per interested presenter. Returns how many were spawned.
    pub fn dispatch(&self, event: &GameEvent) -> usize {
        let Ok(handle) = Handle::try_current() else {
            tracing::trace!(event = event.name(), "no tokio runtime, presentation cue dropped");
            return 0;
        };

        let mut spawned = 0;
        for presenter in self.presenters.iter().filter(|p| p.wants(event)) {
            let presenter = Arc::clone(presenter);
            let event = event.clone();
            let timeout = self.timeout;
            handle.spawn(async move {
                let outcome = match tokio::time::timeout(timeout, presenter.present(&event)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(RuntimeError::PresentationTimeout(timeout)),
                };
                if let Err(error) = outcome {
                    tracing::warn!(event = event.name(), %error, "presentation job failed");
                }
            });
            spawned += 1;
        }
        spawned
    }
}

impl Default for PresentationDispatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl std::fmt::Debug for PresentationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationDispatcher")
            .field("presenters", &self.presenters.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EventSink for PresentationDispatcher {
    fn emit(&self, event: GameEvent) {
        self.dispatch(&event);
    }
}

/// Sink handed to the core: publishes on the bus, then fans out to
/// presentation.
#[derive(Debug, Clone)]
pub(crate) struct RuntimeSink {
    pub(crate) bus: EventBus,
    pub(crate) presentation: Option<PresentationDispatcher>,
}

impl EventSink for RuntimeSink {
    fn emit(&self, event: GameEvent) {
        if let Some(presentation) = &self.presentation {
            presentation.dispatch(&event);
        }
        self.bus.emit(event);
    }
}
