//! Error types for attachment storage operations

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::{head_object::HeadObjectError, put_object::PutObjectError};
use thiserror::Error;

/// Result type for attachment storage operations
pub type AttachmentResult<T> = Result<T, AttachmentError>;

/// Errors that can occur during attachment storage operations
#[derive(Error, Debug)]
pub enum AttachmentError {
    /// Existence probe failed for a reason other than "not found"
    #[error("Failed to probe S3 for key existence: {0}")]
    HeadObject(#[from] SdkError<HeadObjectError>),

    /// Write to S3 failed
    #[error("Failed to write attachment to S3: {0}")]
    PutObject(#[from] SdkError<PutObjectError>),

    /// Error serializing the attachment payload to JSON
    #[error("Failed to serialize attachment: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every generated candidate key collided with an existing object
    #[error("Gave up generating a unique key after {attempts} collisions")]
    KeyGenerationExhausted {
        /// Number of candidate keys probed before giving up
        attempts: usize,
    },
}
