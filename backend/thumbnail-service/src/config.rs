//! Configuration management for thumbnail-service
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values are resolved once at startup and never change afterwards.

use crate::processor::ThumbnailConfig;
use s3_utils::{S3Config, StorageError};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TARGET_BUCKET: &str = "rvneto-aws-s3-thumbnails";
pub const DEFAULT_KEY_PREFIX: &str = "thumb-";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(transparent)]
    S3(#[from] StorageError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub target: TargetConfig,
    pub thumbnail: ThumbnailConfig,
    pub s3: S3Config,
}

/// Where thumbnails are published
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetConfig {
    pub bucket: String,
    pub key_prefix: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_TARGET_BUCKET.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ThumbnailConfig::default();

        let quality: u8 = parse_or("THUMBNAIL_JPEG_QUALITY", &lookup, defaults.quality)?;
        if !(1..=100).contains(&quality) {
            return Err(ConfigError::InvalidValue {
                name: "THUMBNAIL_JPEG_QUALITY",
                value: quality.to_string(),
                expected: "between 1 and 100",
            });
        }

        Ok(Config {
            target: TargetConfig {
                bucket: lookup("THUMBNAIL_TARGET_BUCKET")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_TARGET_BUCKET.to_string()),
                key_prefix: lookup("THUMBNAIL_KEY_PREFIX")
                    .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            },
            thumbnail: ThumbnailConfig {
                max_width: parse_dimension("THUMBNAIL_MAX_WIDTH", &lookup, defaults.max_width)?,
                max_height: parse_dimension("THUMBNAIL_MAX_HEIGHT", &lookup, defaults.max_height)?,
                quality,
            },
            s3: S3Config::from_lookup(&lookup)?,
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name,
                value: raw,
                expected: "a valid number",
            })
        }
        _ => Ok(default),
    }
}

fn parse_dimension<F>(name: &'static str, lookup: &F, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(name, lookup, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            expected: "a positive pixel count",
        });
    }
    Ok(value)
}
