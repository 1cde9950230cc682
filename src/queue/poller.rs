//! Long-polling consumer loop
//!
//! [`spawn`] starts a repeating task that long-polls the queue and publishes
//! each non-empty batch (or transport failure) onto an event channel. The
//! returned [`PollSubscription`] fully owns the task: cancellation is
//! deterministic, idempotent and also happens on drop, so no timer handle can
//! outlive its subscription.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::queue::error::QueueError;
use crate::queue::types::ReceivedMessage;
use crate::queue::QueueClient;

/// Floor applied to the polling interval, guards against long-poll rate limits
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(20);

/// Messages requested per poll tick
const POLL_BATCH_SIZE: i32 = 10;

/// Event published by the polling loop
#[derive(Debug)]
pub enum PollEvent {
    /// A non-empty batch of received messages
    Messages(Vec<ReceivedMessage>),
    /// A receive call failed; the loop keeps running
    Error(QueueError),
}

/// Handle to a running polling loop
///
/// Owns the event receiver, the poll task and its cancellation token. Events
/// are fire-and-forget: if the subscription is never consumed the task still
/// polls and results are discarded.
pub struct PollSubscription {
    events: mpsc::UnboundedReceiver<PollEvent>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl PollSubscription {
    /// Waits for the next poll event
    ///
    /// Returns `None` once the loop has stopped and all pending events were
    /// consumed.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }

    /// The effective (clamped) polling interval
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Signals the polling loop to stop
    ///
    /// Idempotent. An in-progress tick completes before the task exits; no
    /// further tick starts afterwards.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Stops the polling loop and waits for the task to finish
    pub async fn stopped(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollSubscription {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Clamps a requested polling interval to the supported floor
pub(crate) fn clamp_interval(interval: Duration) -> Duration {
    interval.max(MIN_POLL_INTERVAL)
}

/// Spawns the polling loop for `client`
pub(crate) fn spawn(client: QueueClient, interval: Duration) -> PollSubscription {
    let interval = clamp_interval(interval);
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();

    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                () = token.cancelled() => break,
                () = tokio::time::sleep(interval) => {
                    match client.receive(POLL_BATCH_SIZE).await {
                        Ok(messages) => {
                            if !messages.is_empty() {
                                // Receiver may be gone; keep polling anyway.
                                let _ = events_tx.send(PollEvent::Messages(messages));
                            }
                        }
                        Err(err) => {
                            tracing::error!("Poll tick failed: {err}");
                            let _ = events_tx.send(PollEvent::Error(err));
                        }
                    }
                }
            }
        }
    });

    PollSubscription {
        events: events_rx,
        shutdown,
        task: Some(task),
        interval,
    }
}
