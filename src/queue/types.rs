use std::collections::HashMap;

use aws_sdk_sqs::types::{Message, MessageSystemAttributeName};

use crate::environment::EnvironmentMap;
use crate::queue::error::{QueueError, QueueResult};

/// Configuration for a queue client
///
/// The queue URL is derived from the four naming identifiers plus the
/// account resolved for `environment`, as
/// `https://sqs.{region}.amazonaws.com/{account_id}/{app_name}-{slice}-{queue_name}`.
#[derive(Debug, Clone)]
pub struct QueueSettings {
    /// Application name, first segment of the queue name
    pub app_name: String,
    /// Deployment slice, second segment of the queue name
    pub slice: String,
    /// Environment tag resolved against `accounts`
    pub environment: String,
    /// Queue name, last segment of the queue name
    pub queue_name: String,
    /// Environment-to-account mapping used to resolve `environment`
    pub accounts: EnvironmentMap,
}

impl QueueSettings {
    /// Derives the fully addressed queue URL
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Config` if any naming identifier is empty.
    pub fn queue_url(&self) -> QueueResult<String> {
        for (name, value) in [
            ("app_name", &self.app_name),
            ("slice", &self.slice),
            ("environment", &self.environment),
            ("queue_name", &self.queue_name),
        ] {
            if value.is_empty() {
                return Err(QueueError::Config(format!("{name} must not be empty")));
            }
        }

        let account = self.accounts.resolve(&self.environment);
        Ok(format!(
            "https://sqs.{}.amazonaws.com/{}/{}-{}-{}",
            account.region, account.account_id, self.app_name, self.slice, self.queue_name
        ))
    }
}

/// A message received from the queue
///
/// The body is kept as raw JSON text; callers deserialize it themselves. The
/// receipt handle is the opaque token required to delete this specific
/// delivery and may be absent on malformed transport responses.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Message id assigned by the queue service
    pub message_id: String,
    /// Raw message body text
    pub body: String,
    /// Receipt handle for deleting this delivery
    pub receipt_handle: Option<String>,
    /// System attributes returned with the message
    pub attributes: HashMap<MessageSystemAttributeName, String>,
}

impl From<Message> for ReceivedMessage {
    fn from(message: Message) -> Self {
        Self {
            message_id: message.message_id.unwrap_or_default(),
            body: message.body.unwrap_or_default(),
            receipt_handle: message.receipt_handle,
            attributes: message.attributes.unwrap_or_default(),
        }
    }
}
