//! Attachment offload into S3
//!
//! Payloads too large for direct queue transport are serialized to JSON and
//! written to a bucket under a collision-free key; the key is the caller's
//! handle for later retrieval.

/// Error types for attachment storage operations
pub mod error;

use std::future::Future;
use std::sync::Arc;

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use serde::Serialize;
use uuid::Uuid;

pub use error::{AttachmentError, AttachmentResult};

/// Candidate keys probed before key generation gives up
///
/// Collisions on time-ordered unique suffixes are astronomically unlikely;
/// the cap only exists to keep the loop finite.
const MAX_KEY_ATTEMPTS: usize = 5;

/// Attachment storage client bound to one S3 bucket
pub struct AttachmentStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl AttachmentStore {
    /// Creates an attachment store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket attachments are written to
    #[must_use]
    pub fn new(s3_client: Arc<S3Client>, bucket_name: impl Into<String>) -> Self {
        Self {
            s3_client,
            bucket_name: bucket_name.into(),
        }
    }

    /// Generates a key that does not yet exist in the bucket
    ///
    /// The candidate is `prefix` plus a time-ordered unique suffix, verified
    /// free by a metadata-only existence probe. On collision a fresh suffix
    /// is tried, up to a fixed attempt cap.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError::KeyGenerationExhausted` when every candidate
    /// collided, or the probe's own error unchanged when it fails for any
    /// reason other than "not found".
    pub async fn generate_unique_key(&self, prefix: &str) -> AttachmentResult<String> {
        find_unused_key(prefix, |key| async move { self.object_exists(&key).await }).await
    }

    /// Serializes `attachments` to JSON and stores it under a fresh key
    ///
    /// # Returns
    ///
    /// The key the payload was written under
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError` if key generation, serialization or the
    /// write fails. No cleanup is needed on write failure: the generated key
    /// is simply discarded, nothing was written under it.
    pub async fn put_attachment<T: Serialize>(
        &self,
        prefix: &str,
        attachments: &T,
    ) -> AttachmentResult<String> {
        let key = self.generate_unique_key(prefix).await.inspect_err(|err| {
            tracing::error!("Failed to generate attachment key: {err}");
        })?;

        let body = serde_json::to_string(attachments)?;

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .content_type("application/json")
            .body(ByteStream::from(body.into_bytes()))
            .send()
            .await
            .inspect_err(|err| {
                tracing::error!("Failed to write attachment under key '{key}': {err}");
            })?;

        Ok(key)
    }

    /// Checks whether an object exists in the bucket
    ///
    /// # Errors
    ///
    /// Returns the probe's error unchanged for any failure other than the
    /// service reporting "not found".
    async fn object_exists(&self, key: &str) -> AttachmentResult<bool> {
        let result = self
            .s3_client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(err) => Err(AttachmentError::from(err)),
        }
    }
}

/// Builds a candidate attachment key from a prefix and a fresh suffix
fn candidate_key(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::now_v7())
}

/// Probes candidate keys until one is free or the attempt cap is hit
async fn find_unused_key<F, Fut>(prefix: &str, mut exists: F) -> AttachmentResult<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = AttachmentResult<bool>>,
{
    for _ in 0..MAX_KEY_ATTEMPTS {
        let candidate = candidate_key(prefix);
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }

    Err(AttachmentError::KeyGenerationExhausted {
        attempts: MAX_KEY_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[tokio::test]
    async fn returns_first_candidate_that_probes_free() {
        let probed = Mutex::new(Vec::new());
        // Two collisions, then a free key.
        let results = Mutex::new(vec![true, true, false]);

        let key = find_unused_key("attachments/", |candidate| {
            probed.lock().unwrap().push(candidate);
            let next = results.lock().unwrap().remove(0);
            async move { Ok(next) }
        })
        .await
        .expect("third candidate is free");

        let probed = probed.lock().unwrap();
        assert_eq!(probed.len(), 3);
        assert_eq!(key, probed[2]);
        assert!(key.starts_with("attachments/"));
    }

    #[tokio::test]
    async fn unrelated_probe_error_surfaces_immediately() {
        let probes = Mutex::new(0_usize);

        let err = find_unused_key("attachments/", |_candidate| {
            *probes.lock().unwrap() += 1;
            async move {
                Err(AttachmentError::Serialization(
                    serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
                ))
            }
        })
        .await
        .expect_err("probe failure must not be retried");

        assert_eq!(*probes.lock().unwrap(), 1);
        assert!(matches!(err, AttachmentError::Serialization(_)));
    }

    #[tokio::test]
    async fn exhausts_after_bounded_attempts() {
        let probes = Mutex::new(0_usize);

        let err = find_unused_key("attachments/", |_candidate| {
            *probes.lock().unwrap() += 1;
            async move { Ok(true) }
        })
        .await
        .expect_err("all candidates collide");

        assert_eq!(*probes.lock().unwrap(), MAX_KEY_ATTEMPTS);
        assert!(matches!(
            err,
            AttachmentError::KeyGenerationExhausted { attempts } if attempts == MAX_KEY_ATTEMPTS
        ));
    }

    #[test]
    fn candidate_keys_are_prefixed_and_unique() {
        let a = candidate_key("jobs/");
        let b = candidate_key("jobs/");
        assert!(a.starts_with("jobs/"));
        assert!(b.starts_with("jobs/"));
        assert_ne!(a, b);
    }
}
