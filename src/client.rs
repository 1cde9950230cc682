//! Composition root wiring one queue client to one attachment store

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;

use crate::attachment::AttachmentStore;
use crate::queue::{QueueClient, QueueResult, QueueSettings};

/// One queue client and one attachment store behind a single handle
///
/// Pure wiring: both clients stay independently usable and share no state.
pub struct RelayClient {
    queue: QueueClient,
    attachments: AttachmentStore,
}

impl RelayClient {
    /// Creates both clients
    ///
    /// # Arguments
    ///
    /// * `sqs_client` - Pre-configured SQS client
    /// * `s3_client` - Pre-configured S3 client
    /// * `settings` - Queue naming identifiers and account mapping
    /// * `bucket_name` - S3 bucket attachments are written to
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Config` if any queue naming identifier is empty.
    pub fn new(
        sqs_client: Arc<SqsClient>,
        s3_client: Arc<S3Client>,
        settings: &QueueSettings,
        bucket_name: impl Into<String>,
    ) -> QueueResult<Self> {
        Ok(Self {
            queue: QueueClient::new(sqs_client, settings)?,
            attachments: AttachmentStore::new(s3_client, bucket_name),
        })
    }

    /// The queue client
    #[must_use]
    pub const fn queue(&self) -> &QueueClient {
        &self.queue
    }

    /// The attachment store
    #[must_use]
    pub const fn attachments(&self) -> &AttachmentStore {
        &self.attachments
    }
}
