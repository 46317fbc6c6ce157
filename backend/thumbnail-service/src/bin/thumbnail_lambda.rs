//! Thumbnail Lambda - S3 event handler
//!
//! Invoked once per S3 "object created" notification. Returns the status
//! string `OK`, `Erro: Evento S3 vazio.` or `Erro`.
//!
//! Environment variables:
//! - THUMBNAIL_TARGET_BUCKET: destination bucket (default: "rvneto-aws-s3-thumbnails")
//! - THUMBNAIL_KEY_PREFIX: prefix for thumbnail keys (default: "thumb-")
//! - THUMBNAIL_MAX_WIDTH / THUMBNAIL_MAX_HEIGHT: bounding box (default: 150x150)
//! - THUMBNAIL_JPEG_QUALITY: JPEG quality 1-100 (default: 75)
//! - AWS_REGION, S3_ENDPOINT, S3_FORCE_PATH_STYLE: S3 client overrides
//! - RUST_LOG: tracing filter

use lambda_runtime::{service_fn, Error, LambdaEvent};
use s3_utils::S3Client;
use serde_json::Value;
use std::sync::Arc;
use thumbnail_service::telemetry::init_tracing;
use thumbnail_service::{Config, ThumbnailService};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config =
        Config::from_env().map_err(|e| Error::from(format!("invalid configuration: {e}")))?;
    info!(
        target_bucket = %config.target.bucket,
        quality = config.thumbnail.quality,
        "Configuration loaded"
    );

    // Built once and shared read-only by every invocation
    let s3_client = Arc::new(S3Client::new(&config.s3).await);
    let service = ThumbnailService::new(s3_client, config.thumbnail, config.target);
    let service_ref = &service;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        let outcome = service_ref.handle(event.payload).await;
        Ok::<String, Error>(outcome.to_string())
    }))
    .await
}
