//! Async event loop for a [`CarouselHost`]
//!
//! Waits on whichever comes first: the next inbound [`HostEvent`] or the
//! host's earliest timer deadline. The loop ends, unmounting the host, when
//! the sender side of the channel is dropped or a shutdown is requested.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::clock::Clock;
use crate::host::{CarouselHost, HostEvent};
use crate::sink::RenderSink;

/// Cloneable handle for feeding a running driver.
#[derive(Debug, Clone)]
pub struct HostHandle {
    events: mpsc::Sender<HostEvent>,
    shutdown: watch::Sender<bool>,
}

impl HostHandle {
    pub async fn send(
        &self,
        event: impl Into<HostEvent>,
    ) -> Result<(), mpsc::error::SendError<HostEvent>> {
        self.events.send(event.into()).await
    }

    /// Ask the driver to unmount and stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

/// Channel capacity for host events.
const EVENT_BUFFER: usize = 256;

/// Create the channels for [`run`].
pub fn channel() -> (HostHandle, HostInbox) {
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    (
        HostHandle {
            events: events_tx,
            shutdown: shutdown_tx,
        },
        HostInbox {
            events: events_rx,
            shutdown: shutdown_rx,
        },
    )
}

#[derive(Debug)]
pub struct HostInbox {
    events: mpsc::Receiver<HostEvent>,
    shutdown: watch::Receiver<bool>,
}

/// Mount `host` and run it until the inbox closes. Returns the unmounted
/// host so callers can inspect its final state.
pub async fn run<S, C>(
    mut host: CarouselHost<S, C>,
    mut inbox: HostInbox,
) -> CarouselHost<S, C>
where
    S: RenderSink,
    C: Clock,
{
    host.mount();

    loop {
        host.advance();

        let wait = host
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(host.now_ms()));

        tokio::select! {
            biased;
            changed = inbox.shutdown.changed() => {
                if changed.is_err() || *inbox.shutdown.borrow() {
                    log::debug!("Carousel driver shutting down");
                    break;
                }
            }
            event = inbox.events.recv() => match event {
                Some(event) => {
                    host.dispatch(event);
                }
                None => {
                    log::debug!("Carousel event channel closed");
                    break;
                }
            },
            _ = sleep_for(wait), if wait.is_some() => {}
        }
    }

    host.unmount();
    host
}

async fn sleep_for(wait_ms: Option<u64>) {
    if let Some(ms) = wait_ms {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
