use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::delete_message::DeleteMessageError;
use aws_sdk_sqs::operation::purge_queue::PurgeQueueError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use thiserror::Error;

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error types for queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    /// Missing or empty required construction parameter
    #[error("Queue client configuration error: {0}")]
    Config(String),

    /// Delete requested for a message without a receipt handle
    ///
    /// Raised before any network call is made.
    #[error("Message has no receipt handle")]
    MissingReceiptHandle,

    /// Error sending message to SQS
    #[error("Failed to send message to SQS: {0}")]
    SendMessage(#[from] SdkError<SendMessageError>),

    /// Error receiving messages from SQS
    #[error("Failed to receive messages from SQS: {0}")]
    ReceiveMessage(#[from] SdkError<ReceiveMessageError>),

    /// Error deleting message from SQS
    #[error("Failed to delete message from SQS: {0}")]
    DeleteMessage(#[from] SdkError<DeleteMessageError>),

    /// Error purging the queue
    #[error("Failed to purge SQS queue: {0}")]
    PurgeQueue(#[from] SdkError<PurgeQueueError>),

    /// Error serializing message to JSON
    #[error("Failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),
}
