//! LocalStack test setup utilities

#![allow(dead_code)]

use std::sync::Arc;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use message_relay::{AccountEndpoint, EnvironmentMap, QueueSettings};
use uuid::Uuid;

/// LocalStack's fixed default account id
pub const LOCALSTACK_ACCOUNT: &str = "000000000000";
pub const LOCALSTACK_REGION: &str = "us-east-1";

/// Test context providing SQS and S3 clients plus a unique queue and bucket
pub struct TestContext {
    pub sqs_client: Arc<SqsClient>,
    pub s3_client: Arc<S3Client>,
    pub settings: QueueSettings,
    pub bucket_name: String,
    pub queue_url: String,
}

impl TestContext {
    /// Creates a context with a fresh queue and bucket on LocalStack
    pub async fn new(test_name: &str) -> Self {
        // Hardcoded credentials for LocalStack / CI
        let credentials = Credentials::from_keys("test", "test", None);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url("http://localhost:4566")
            .region(LOCALSTACK_REGION)
            .credentials_provider(credentials)
            .load()
            .await;

        let sqs_client = Arc::new(SqsClient::new(&config));

        // Force path style for LocalStack bucket addressing
        let s3_config: aws_sdk_s3::Config = (&config).into();
        let mut builder = s3_config.to_builder();
        builder.set_force_path_style(Some(true));
        let s3_client = Arc::new(S3Client::from_conf(builder.build()));

        let settings = QueueSettings {
            app_name: "relay".to_string(),
            slice: test_name.to_string(),
            environment: "staging".to_string(),
            queue_name: format!("q{}", Uuid::now_v7().simple()),
            accounts: EnvironmentMap::new(AccountEndpoint::new(
                LOCALSTACK_ACCOUNT,
                LOCALSTACK_REGION,
            )),
        };

        let full_queue_name = format!(
            "{}-{}-{}",
            settings.app_name, settings.slice, settings.queue_name
        );
        let result = sqs_client
            .create_queue()
            .queue_name(&full_queue_name)
            .send()
            .await
            .expect("Failed to create test queue");
        let queue_url = result
            .queue_url()
            .expect("Queue URL not returned")
            .to_string();

        let bucket_name = format!("relay-{}-{}", test_name, Uuid::now_v7().simple());
        s3_client
            .create_bucket()
            .bucket(&bucket_name)
            .send()
            .await
            .expect("Failed to create test bucket");

        Self {
            sqs_client,
            s3_client,
            settings,
            bucket_name,
            queue_url,
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Clean up the queue; objects and bucket are left to LocalStack reset
        let client = self.sqs_client.clone();
        let queue_url = self.queue_url.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = client.delete_queue().queue_url(&queue_url).send().await;
            });
        }
    }
}
