//! Thin messaging layer over AWS SQS and S3
//!
//! This crate wraps two managed primitives behind small, focused clients:
//! a [`queue::QueueClient`] for sending, receiving and deleting messages on a
//! single named SQS queue (including a cancellable long-polling loop), and an
//! [`attachment::AttachmentStore`] for offloading oversized payloads into S3
//! under collision-free keys. [`client::RelayClient`] wires one of each
//! together.

#![deny(clippy::all, clippy::pedantic, missing_docs)]

/// Attachment offload into S3
pub mod attachment;
/// Composition root holding both clients
pub mod client;
/// Environment-to-account endpoint mapping
pub mod environment;
/// Queue operations against a single SQS queue
pub mod queue;

pub use attachment::{AttachmentError, AttachmentResult, AttachmentStore};
pub use client::RelayClient;
pub use environment::{AccountEndpoint, EnvironmentMap};
pub use queue::{
    PollEvent, PollSubscription, QueueClient, QueueError, QueueResult, QueueSettings,
    ReceivedMessage,
};
