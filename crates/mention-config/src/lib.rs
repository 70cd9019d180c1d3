//! Configuration for the mention parser.
//!
//! Options are layered in a fixed order, later layers overriding earlier ones:
//!
//! 1. **Built-in defaults** - [`MentionConfig::default`]
//! 2. **Settings defaults** - the `[defaults]` table of a `mentions.toml` file
//! 3. **Caller overrides** - a JSON object passed when building a parser
//!
//! Nested maps (such as `regex_replacement`) are deep merged; scalars are replaced.
//!
//! The merged options are then compiled once into a [`ResolvedConfig`], which
//! carries the scanning expression and the link route of the selected pool.
//!
//! # Example
//!
//! ```
//! use mention_config::MentionSettings;
//! use serde_json::json;
//!
//! let settings = MentionSettings::parse(r#"
//! [pools.users]
//! route = "/users/profile/"
//! "#).unwrap();
//!
//! let resolved = settings.resolve(&json!({ "notify": false })).unwrap();
//! assert_eq!(resolved.route(), "/users/profile/");
//! assert!(!resolved.notify());
//! ```

pub mod error;
mod options;
mod resolved;
mod settings;

pub use error::{Error, Result};
pub use options::{
    DEFAULT_CHARACTER, DEFAULT_PATTERN, DEFAULT_POOL, DEFAULT_REGEX, DEFAULT_RULES, MentionConfig,
};
pub use resolved::ResolvedConfig;
pub use settings::{MentionSettings, PoolConfig};
