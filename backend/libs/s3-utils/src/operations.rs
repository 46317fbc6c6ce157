//! Object read/write operations behind the `ObjectStore` port
use crate::error::{Result, StorageError};
use crate::S3Client;
use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

/// Minimal object storage port: one read, one write
///
/// Implementations must be safe to share between concurrent invocations.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the full content of `bucket/key`
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes>;

    /// Upload `body` to `bucket/key` unconditionally, overwriting any existing object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()>;
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let output = self
            .client()
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|error| {
                if is_not_found(&error) {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Read {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&error).to_string(),
                        transient: is_transient(&error),
                    }
                }
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|error| StorageError::Read {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: format!("failed to read object body: {error}"),
                transient: true,
            })?
            .into_bytes();

        debug!(bucket, key, size = body.len(), "Downloaded object");
        Ok(body)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()> {
        let size = body.len();

        self.client()
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .content_length(size as i64)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|error| StorageError::Write {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&error).to_string(),
                transient: is_transient(&error),
            })?;

        debug!(bucket, key, size, content_type, "Uploaded object");
        Ok(())
    }
}

fn is_not_found(error: &SdkError<GetObjectError, HttpResponse>) -> bool {
    error
        .as_service_error()
        .map_or(false, |service_error| service_error.is_no_such_key())
        || error
            .raw_response()
            .map_or(false, |raw| raw.status().as_u16() == 404)
}

fn is_transient<E>(error: &SdkError<E, HttpResponse>) -> bool {
    match error {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            true
        }
        SdkError::ServiceError(service_error) => service_error.raw().status().as_u16() >= 500,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_round_trip() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .withf(|bucket, key| bucket == "uploads" && key == "cat.png")
            .times(1)
            .returning(|_, _| Ok(Bytes::from_static(b"png-bytes")));
        store
            .expect_put_object()
            .withf(|bucket, key, body, content_type| {
                bucket == "thumbs"
                    && key == "thumb-cat.png"
                    && body.len() == 9
                    && content_type == "image/jpeg"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let body = store.get_object("uploads", "cat.png").await.unwrap();
        store
            .put_object("thumbs", "thumb-cat.png", body, "image/jpeg")
            .await
            .unwrap();
    }

    #[test]
    fn test_transient_classification() {
        let missing = StorageError::NotFound {
            bucket: "b".to_string(),
            key: "k".to_string(),
        };
        assert!(!missing.is_transient());

        let throttled = StorageError::Write {
            bucket: "b".to_string(),
            key: "k".to_string(),
            message: "503 Slow Down".to_string(),
            transient: true,
        };
        assert!(throttled.is_transient());
    }
}
