//! Thumbnail Service
//!
//! Reacts to S3 "object created" events: downloads the new image, fits it
//! into a small bounding box, re-encodes it as JPEG and publishes it to the
//! thumbnails bucket.

pub mod config;
pub mod error;
pub mod event;
pub mod outcome;
pub mod processor;
pub mod service;
pub mod telemetry;

// Public re-exports
pub use config::{Config, ConfigError, TargetConfig};
pub use error::{Result, ThumbnailError};
pub use event::{first_source_object, parse_notification, S3Event, SourceObject};
pub use outcome::InvocationOutcome;
pub use processor::{Thumbnail, ThumbnailConfig, ThumbnailProcessor};
pub use service::{PublishTarget, PublishedThumbnail, ThumbnailService};
