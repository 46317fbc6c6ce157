//! Shared S3 utilities
//!
//! Provides a reusable AWS S3 client handle, its configuration, and the
//! `ObjectStore` port used by services that read and write whole objects.

use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client;
use std::sync::Arc;
use tracing::info;

pub mod config;
pub mod error;
pub mod operations;

pub use config::S3Config;
pub use error::{Result, StorageError};
#[cfg(any(test, feature = "mock"))]
pub use operations::MockObjectStore;
pub use operations::ObjectStore;

/// Shared S3 client wrapper
///
/// Built once per process and cloned cheaply; never mutated after construction.
#[derive(Clone, Debug)]
pub struct S3Client {
    client: Arc<Client>,
}

impl S3Client {
    /// Create a client from the default AWS provider chain plus `config` overrides
    pub async fn new(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        info!(
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            endpoint = ?config.endpoint,
            path_style = config.force_path_style,
            "S3 client initialized"
        );

        Self::from_client(Client::from_conf(s3_config))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get reference to underlying AWS S3 client
    pub fn client(&self) -> &Client {
        &self.client
    }
}
