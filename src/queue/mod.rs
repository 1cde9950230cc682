//! Queue operations against a single named SQS queue
//!
//! The client binds one derived queue URL at construction and exposes send,
//! receive (long-poll), delete, combined dequeue and purge operations, plus a
//! cancellable polling loop in [`poller`].

/// Error types for queue operations
pub mod error;
/// Long-polling consumer loop
pub mod poller;
/// Queue configuration and message types
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_sqs::types::MessageSystemAttributeName;
use aws_sdk_sqs::Client as SqsClient;
use serde::Serialize;

pub use error::{QueueError, QueueResult};
pub use poller::{PollEvent, PollSubscription};
pub use types::{QueueSettings, ReceivedMessage};

/// Server-side wait applied to every receive call, in seconds
const RECEIVE_WAIT_TIME_SECONDS: i32 = 10;

/// Client for one SQS queue
///
/// Cheap to clone; clones share the underlying SQS client and target the same
/// queue URL.
#[derive(Clone, Debug)]
pub struct QueueClient {
    sqs_client: Arc<SqsClient>,
    queue_url: String,
}

impl QueueClient {
    /// Creates a queue client bound to the queue derived from `settings`
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `settings` - Naming identifiers and account mapping
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Config` if any naming identifier is empty.
    pub fn new(sqs_client: Arc<SqsClient>, settings: &QueueSettings) -> QueueResult<Self> {
        let queue_url = settings.queue_url()?;
        Ok(Self {
            sqs_client,
            queue_url,
        })
    }

    /// The fully addressed queue URL this client operates on
    #[must_use]
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// Sends a message to the queue
    ///
    /// The message is serialized to JSON text for transport.
    ///
    /// # Returns
    ///
    /// The message id assigned by the queue service; an empty string when
    /// the acknowledgment omits one.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if serialization or the send operation fails.
    pub async fn send<T: Serialize>(&self, message: &T) -> QueueResult<String> {
        let body = serde_json::to_string(message)?;

        let result = self
            .sqs_client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await?;

        Ok(result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default())
    }

    /// Receives up to `max_count` messages via long polling
    ///
    /// Waits server-side up to 10 seconds and requests all message
    /// attributes. Messages are not removed from the queue. An empty batch is
    /// a normal outcome when the queue stays empty for the wait window.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the receive operation fails.
    pub async fn receive(&self, max_count: i32) -> QueueResult<Vec<ReceivedMessage>> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_count)
            .wait_time_seconds(RECEIVE_WAIT_TIME_SECONDS)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .message_attribute_names("All")
            .send()
            .await?;

        let messages: Vec<ReceivedMessage> = result
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(ReceivedMessage::from)
            .collect();

        if !messages.is_empty() {
            tracing::debug!("Received {} messages from queue", messages.len());
        }

        Ok(messages)
    }

    /// Deletes a received message from the queue
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MissingReceiptHandle` before any network call if
    /// the message carries no receipt handle; otherwise `QueueError` if the
    /// delete operation fails.
    pub async fn delete_message(&self, message: &ReceivedMessage) -> QueueResult<()> {
        let receipt_handle = message
            .receipt_handle
            .as_deref()
            .ok_or(QueueError::MissingReceiptHandle)?;

        self.sqs_client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await?;

        Ok(())
    }

    /// Receives one message and deletes it from the queue
    ///
    /// The delete is issued for exactly the message the receive returned.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::MissingReceiptHandle` when the receive yields no
    /// message; otherwise `QueueError` if either operation fails.
    pub async fn dequeue(&self) -> QueueResult<ReceivedMessage> {
        let mut messages = self.receive(1).await?;
        let Some(message) = messages.pop() else {
            return Err(QueueError::MissingReceiptHandle);
        };

        self.delete_message(&message).await?;
        Ok(message)
    }

    /// Purges all messages from the queue
    ///
    /// Irreversible. SQS enforces a cooldown of at least 60 seconds between
    /// purges on its side.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the purge operation fails.
    pub async fn purge(&self) -> QueueResult<()> {
        self.sqs_client
            .purge_queue()
            .queue_url(&self.queue_url)
            .send()
            .await?;

        Ok(())
    }

    /// Starts a long-polling loop publishing received batches as events
    ///
    /// See [`poller::PollSubscription`]. The interval is clamped to a floor
    /// of 20 seconds.
    #[must_use]
    pub fn start_polling(&self, interval: Duration) -> PollSubscription {
        poller::spawn(self.clone(), interval)
    }
}
