//! Compiled configuration handed to the parser

use crate::error::{Error, Result};
use crate::options::MentionConfig;
use crate::settings::MentionSettings;
use regex::Regex;

/// Options validated and compiled against a set of pools.
///
/// The scanning expression is compiled once here and reused by every parse.
/// A `ResolvedConfig` is immutable and cheap to clone.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    options: MentionConfig,
    trigger: char,
    route: String,
    scanner: Regex,
}

impl ResolvedConfig {
    /// Validate `options`, look up its pool in `settings` and compile the
    /// scanning expression.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCharacter`] if the trigger is not a single character
    /// - [`Error::MissingPool`] if the pool is not declared in `settings`
    /// - [`Error::UnknownPlaceholder`] if the template names an unknown slot
    /// - [`Error::InvalidRegex`] if the expanded template does not compile
    pub fn new(options: MentionConfig, settings: &MentionSettings) -> Result<Self> {
        let trigger = options.trigger()?;

        let pool = settings
            .pool(&options.pool)
            .ok_or_else(|| Error::MissingPool {
                pool: options.pool.clone(),
            })?;

        let expression = options.expression()?;
        let scanner = Regex::new(&expression)?;
        tracing::debug!(pool = %options.pool, %expression, "Compiled mention scanner");

        Ok(Self {
            route: pool.route.clone(),
            options,
            trigger,
            scanner,
        })
    }

    /// The merged options this configuration was built from.
    pub fn options(&self) -> &MentionConfig {
        &self.options
    }

    pub fn pool(&self) -> &str {
        &self.options.pool
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// The compiled scanning expression.
    pub fn scanner(&self) -> &Regex {
        &self.scanner
    }

    pub fn mention_enabled(&self) -> bool {
        self.options.mention
    }

    pub fn mention_self(&self) -> bool {
        self.options.mention_self
    }

    pub fn notify(&self) -> bool {
        self.options.notify
    }

    pub fn mention_each_occurrence(&self) -> bool {
        self.options.mention_each_occurrence
    }
}
