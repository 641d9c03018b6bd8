use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use url::Url;

use crate::config::Settings;

/// Error type surfaced by store implementations (simple boxed error).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// The one capability consumed from the object-storage service: write the
/// contents of a local file to a key in the configured bucket.
///
/// The trait is implemented by the real S3 client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_file(&self, key: &str, path: &Path) -> Result<(), StoreError>;
}

/// aws-sdk-s3 backed store, bound to one bucket on an S3-compatible endpoint.
#[derive(Debug)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for a custom endpoint with static credentials and
    /// capture the bucket name in the handle. A malformed endpoint URL is a
    /// construction error; no network traffic happens here.
    pub fn connect(settings: &Settings) -> Result<Self> {
        let endpoint = Url::parse(&settings.endpoint)
            .with_context(|| format!("invalid endpoint URL {:?}", settings.endpoint))?;

        let credentials = Credentials::new(
            &settings.access_key_id,
            &settings.access_key_secret,
            None,
            None,
            "oss-upload",
        );

        // Path-style addressing: S3-compatible services generally do not
        // serve virtual-hosted bucket subdomains.
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint.as_str())
            .region(Region::new("auto"))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(S3Store {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket: settings.bucket_name.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_file(&self, key: &str, path: &Path) -> Result<(), StoreError> {
        let body = match ByteStream::from_path(path).await {
            Ok(body) => body,
            Err(e) => return Err(format!("failed to open {}: {e}", path.display()).into()),
        };

        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("put_object failed: {e:?}").into()),
        }
    }
}
