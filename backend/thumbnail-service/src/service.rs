//! Thumbnail service - coordinates the notification → fetch → transform → publish workflow
//!
//! 1. Decode the first record of the S3 event
//! 2. Download the original image from the source bucket
//! 3. Generate the JPEG thumbnail
//! 4. Upload it to the target bucket under the prefixed key
//!
//! Any failure aborts the remaining steps; nothing is written unless every
//! earlier step succeeded.

use crate::config::TargetConfig;
use crate::error::{Result, ThumbnailError};
use crate::event::{first_source_object, parse_notification, S3Event, SourceObject};
use crate::outcome::InvocationOutcome;
use crate::processor::{Thumbnail, ThumbnailConfig, ThumbnailProcessor, THUMBNAIL_CONTENT_TYPE};
use bytes::Bytes;
use s3_utils::ObjectStore;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Destination of a generated thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub bucket: String,
    pub key: String,
    pub content_type: &'static str,
}

impl PublishTarget {
    /// Derive the destination from the decoded source key; pure prefix concatenation
    pub fn derive(target: &TargetConfig, source_key: &str) -> Self {
        Self {
            bucket: target.bucket.clone(),
            key: format!("{}{}", target.key_prefix, source_key),
            content_type: THUMBNAIL_CONTENT_TYPE,
        }
    }
}

/// Summary of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedThumbnail {
    pub source: SourceObject,
    pub target: PublishTarget,
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

/// Thumbnail service for one-shot, stateless thumbnail generation
pub struct ThumbnailService<S> {
    store: Arc<S>,
    processor: Arc<ThumbnailProcessor>,
    target: TargetConfig,
}

impl<S: ObjectStore> ThumbnailService<S> {
    /// Create a new thumbnail service around a shared storage handle
    pub fn new(store: Arc<S>, thumbnail: ThumbnailConfig, target: TargetConfig) -> Self {
        info!(
            target_bucket = %target.bucket,
            key_prefix = %target.key_prefix,
            max_width = thumbnail.max_width,
            max_height = thumbnail.max_height,
            "Thumbnail service initialized"
        );

        Self {
            store,
            processor: Arc::new(ThumbnailProcessor::new(thumbnail)),
            target,
        }
    }

    /// Handle a raw Lambda payload and collapse the result into the status contract
    pub async fn handle(&self, payload: serde_json::Value) -> InvocationOutcome {
        let result = match parse_notification(payload) {
            Ok(notification) => self.process(&notification).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(published) => info!(
                target_bucket = %published.target.bucket,
                target_key = %published.target.key,
                width = published.width,
                height = published.height,
                size = published.size,
                "Thumbnail created successfully"
            ),
            Err(ThumbnailError::EmptyNotification) => {
                warn!("S3 event is empty, no records to process")
            }
            Err(e) => error!(
                error = %e,
                retryable = e.is_retryable(),
                "Failed to process image"
            ),
        }

        InvocationOutcome::from_result(&result)
    }

    /// Run the full pipeline for one notification, returning the typed result
    pub async fn process(&self, notification: &S3Event) -> Result<PublishedThumbnail> {
        let source = first_source_object(notification)?;
        info!(
            bucket = %source.bucket,
            key = %source.key,
            size = ?source.size,
            event_name = source.event_name.as_deref().unwrap_or("unknown"),
            event_source = source.event_source.as_deref().unwrap_or("unknown"),
            aws_region = source.aws_region.as_deref().unwrap_or("unknown"),
            event_time = %source.event_time,
            "S3 event received"
        );

        let original = self.fetch(&source).await?;
        let thumbnail = self.processor.clone().generate_async(original).await?;

        let target = PublishTarget::derive(&self.target, &source.key);
        self.publish(&target, &thumbnail).await?;

        Ok(PublishedThumbnail {
            source,
            target,
            width: thumbnail.width,
            height: thumbnail.height,
            size: thumbnail.data.len(),
        })
    }

    async fn fetch(&self, source: &SourceObject) -> Result<Bytes> {
        self.store
            .get_object(&source.bucket, &source.key)
            .await
            .map_err(ThumbnailError::from_read)
    }

    async fn publish(&self, target: &PublishTarget, thumbnail: &Thumbnail) -> Result<()> {
        self.store
            .put_object(
                &target.bucket,
                &target.key,
                thumbnail.data.clone(),
                target.content_type,
            )
            .await
            .map_err(ThumbnailError::from_write)
    }
}
