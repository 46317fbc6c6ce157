//! S3 "object created" event notifications
//!
//! The payload is parsed into `aws_lambda_events`' `S3Event`; only the first
//! record's bucket name and object key are required by the pipeline.

use crate::error::{Result, ThumbnailError};
use aws_lambda_events::event::s3::S3EventRecord;
use tracing::warn;

pub use aws_lambda_events::event::s3::S3Event;

/// The object a notification points at, with its key already decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    pub bucket: String,
    pub key: String,
    pub size: Option<i64>,
    pub event_name: Option<String>,
    pub event_source: Option<String>,
    pub aws_region: Option<String>,
    pub event_time: String,
}

/// Parse a raw Lambda payload
pub fn parse_notification(payload: serde_json::Value) -> Result<S3Event> {
    Ok(serde_json::from_value(payload)?)
}

/// Decode the first record into a `SourceObject`
///
/// Only the first record is processed; any further records are dropped.
pub fn first_source_object(event: &S3Event) -> Result<SourceObject> {
    let record = event
        .records
        .first()
        .ok_or(ThumbnailError::EmptyNotification)?;

    if event.records.len() > 1 {
        warn!(
            ignored = event.records.len() - 1,
            "S3 event carries multiple records, only the first is processed"
        );
    }

    source_object(record)
}

fn source_object(record: &S3EventRecord) -> Result<SourceObject> {
    let bucket = record.s3.bucket.name.clone().ok_or_else(|| {
        ThumbnailError::InvalidNotification("record has no bucket name".to_string())
    })?;
    let raw_key = record.s3.object.key.as_deref().ok_or_else(|| {
        ThumbnailError::InvalidNotification("record has no object key".to_string())
    })?;

    Ok(SourceObject {
        bucket,
        key: decode_object_key(raw_key)?,
        size: record.s3.object.size,
        event_name: record.event_name.clone(),
        event_source: record.event_source.clone(),
        aws_region: record.aws_region.clone(),
        event_time: record.event_time.to_rfc3339(),
    })
}

/// Decode a form-urlencoded S3 key: `+` becomes a space, `%XX` a raw byte (UTF-8)
pub fn decode_object_key(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    for (idx, _) in raw.match_indices('%') {
        let escape = bytes.get(idx + 1..idx + 3);
        if !escape.map_or(false, |pair| pair.iter().all(u8::is_ascii_hexdigit)) {
            return Err(ThumbnailError::MalformedIdentifier {
                key: raw.to_string(),
                reason: format!("incomplete or invalid percent escape at byte {idx}"),
            });
        }
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ThumbnailError::MalformedIdentifier {
            key: raw.to_string(),
            reason: e.to_string(),
        })
}
