//! Settings file parsing for `mentions.toml`
//!
//! A settings file declares the available pools and may carry a `[defaults]`
//! table of option overrides shared by every parser built from it:
//!
//! ```toml
//! [defaults]
//! notify = false
//!
//! [pools.users]
//! route = "/users/profile/"
//!
//! [pools.teams]
//! route = "/teams/"
//! ```

use crate::error::{Error, Result};
use crate::options::{MentionConfig, deep_merge_value};
use crate::resolved::ResolvedConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Prefix of the link target; the title-cased name is appended directly
    pub route: String,
}

/// Pools and shared option defaults, usually read from `mentions.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionSettings {
    /// Option overrides applied on top of the built-in defaults
    #[serde(default)]
    pub defaults: Map<String, Value>,

    /// Pools keyed by name
    #[serde(default)]
    pub pools: BTreeMap<String, PoolConfig>,
}

impl MentionSettings {
    /// Create empty settings with no pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a pool.
    pub fn with_pool(mut self, name: impl Into<String>, route: impl Into<String>) -> Self {
        self.pools.insert(
            name.into(),
            PoolConfig {
                route: route.into(),
            },
        );
        self
    }

    /// Parse settings from TOML content.
    ///
    /// # Example
    ///
    /// ```
    /// use mention_config::MentionSettings;
    ///
    /// let settings = MentionSettings::parse(r#"
    /// [pools.users]
    /// route = "/users/profile/"
    /// "#).unwrap();
    ///
    /// assert_eq!(settings.pool("users").unwrap().route, "/users/profile/");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let settings: MentionSettings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if `path` is not a file, or a parse
    /// error if the content is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::info!(?path, "Loading mention settings");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Layer `other` on top of these settings.
    ///
    /// Defaults are deep merged; pools from `other` replace pools of the same name.
    pub fn merge(&mut self, other: &MentionSettings) {
        let mut defaults = Value::Object(std::mem::take(&mut self.defaults));
        deep_merge_value(&mut defaults, &Value::Object(other.defaults.clone()));
        if let Value::Object(map) = defaults {
            self.defaults = map;
        }

        for (name, pool) in &other.pools {
            self.pools.insert(name.clone(), pool.clone());
        }
    }

    /// Look up a pool by name.
    pub fn pool(&self, name: &str) -> Option<&PoolConfig> {
        self.pools.get(name)
    }

    /// Built-in defaults, then the settings defaults, then `overrides`.
    pub fn options(&self, overrides: &Value) -> Result<MentionConfig> {
        MentionConfig::default()
            .merged(&Value::Object(self.defaults.clone()))?
            .merged(overrides)
    }

    /// Merge options and compile them against these pools.
    pub fn resolve(&self, overrides: &Value) -> Result<ResolvedConfig> {
        ResolvedConfig::new(self.options(overrides)?, self)
    }
}
