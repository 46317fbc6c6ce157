//! S3 client configuration shared across services
use crate::error::{Result, StorageError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Config {
    /// AWS region override; `None` defers to the SDK default provider chain
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible storage (MinIO, LocalStack)
    pub endpoint: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub force_path_style: bool,
}

impl S3Config {
    /// Load S3 configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load S3 configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let force_path_style = match non_empty("S3_FORCE_PATH_STYLE") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| {
                StorageError::InvalidConfig(format!(
                    "S3_FORCE_PATH_STYLE must be true or false, got {raw:?}"
                ))
            })?,
            None => false,
        };

        Ok(Self {
            region: non_empty("AWS_REGION"),
            endpoint: non_empty("S3_ENDPOINT"),
            force_path_style,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_use_sdk_chain() {
        let config = S3Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, S3Config::default());
    }

    #[test]
    fn test_minio_style_overrides() {
        let config = S3Config::from_lookup(lookup(&[
            ("AWS_REGION", "sa-east-1"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("S3_FORCE_PATH_STYLE", "true"),
        ]))
        .unwrap();

        assert_eq!(config.region.as_deref(), Some("sa-east-1"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.force_path_style);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = S3Config::from_lookup(lookup(&[("AWS_REGION", "  "), ("S3_ENDPOINT", "")]))
            .unwrap();
        assert!(config.region.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_invalid_path_style_is_rejected() {
        let err = S3Config::from_lookup(lookup(&[("S3_FORCE_PATH_STYLE", "yes")])).unwrap_err();
        assert!(matches!(err, StorageError::InvalidConfig(_)));
    }
}
