//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a single directory traversal.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Sort each directory listing by file name before consuming it.
    ///
    /// When unset, entries come in whatever order the filesystem returns.
    #[builder(default = "false")]
    #[serde(default)]
    pub sort_entries: bool,
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a simple config for walking a path in filesystem order.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sort_entries: false,
        }
    }

    /// Same config with sorted listings.
    pub fn sorted(mut self) -> Self {
        self.sort_entries = true;
        self
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WalkConfig::builder()
            .root("/home/user")
            .sort_entries(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.sort_entries);
    }

    #[test]
    fn test_config_builder_rejects_missing_root() {
        let err = WalkConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("Root path is required"));

        let err = WalkConfig::builder().root("").build().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_config_simple() {
        let config = WalkConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(!config.sort_entries);
        assert!(config.sorted().sort_entries);
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: WalkConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();
        assert_eq!(config.root, PathBuf::from("/data"));
        assert!(!config.sort_entries);
    }
}
