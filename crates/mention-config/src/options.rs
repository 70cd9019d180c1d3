//! Parser options and their merge rules

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const DEFAULT_POOL: &str = "users";
pub const DEFAULT_CHARACTER: &str = "@";
pub const DEFAULT_PATTERN: &str = "[A-Za-z0-9]";
pub const DEFAULT_RULES: &str = "{4,20}";
pub const DEFAULT_REGEX: &str = r"\s({character}{pattern}{rules})";

/// Placeholders filled from the dedicated option fields.
const BUILTIN_PLACEHOLDERS: [&str; 3] = ["character", "pattern", "rules"];

/// Matches a named `{placeholder}` in the template.
///
/// Quantifiers such as `{4,20}` start with a digit and are left alone.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\[pP])?\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid placeholder regex")
});

/// Options controlling how mentions are matched, recorded and rendered.
///
/// Unknown keys are rejected when deserializing, so a typo in an override
/// surfaces as [`Error::InvalidOverrides`] instead of being ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MentionConfig {
    /// Directory pool used for lookups and link routes
    pub pool: String,
    /// Record a mention for each resolved token
    pub mention: bool,
    /// Record mentions of the current actor
    pub mention_self: bool,
    /// Ask the recorder to notify the recipient
    pub notify: bool,
    /// Record every occurrence, or only the first per recipient
    pub mention_each_occurrence: bool,
    /// Trigger character preceding a candidate name
    pub character: String,
    /// Character class of a candidate name
    pub pattern: String,
    /// Quantifier applied to `pattern`
    pub rules: String,
    /// Matching template with `{placeholder}` slots
    pub regex: String,
    /// Extra placeholders available to the template, keyed without braces
    pub regex_replacement: BTreeMap<String, String>,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            pool: DEFAULT_POOL.to_string(),
            mention: true,
            mention_self: true,
            notify: true,
            mention_each_occurrence: true,
            character: DEFAULT_CHARACTER.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            rules: DEFAULT_RULES.to_string(),
            regex: DEFAULT_REGEX.to_string(),
            regex_replacement: BTreeMap::new(),
        }
    }
}

impl MentionConfig {
    /// Built-in defaults merged with `overrides`.
    pub fn with_overrides(overrides: &Value) -> Result<Self> {
        Self::default().merged(overrides)
    }

    /// Merge an override object on top of these options.
    ///
    /// `overrides` must be a JSON object (or `null`, meaning no overrides).
    /// Keys present in `overrides` win; nested maps are merged key by key.
    /// The result is validated before it is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use mention_config::MentionConfig;
    /// use serde_json::json;
    ///
    /// let config = MentionConfig::default()
    ///     .merged(&json!({ "character": "#" }))
    ///     .unwrap();
    /// assert_eq!(config.character, "#");
    /// assert_eq!(config.pool, "users");
    /// ```
    pub fn merged(&self, overrides: &Value) -> Result<Self> {
        match overrides {
            Value::Null => return Ok(self.clone()),
            Value::Object(_) => {}
            other => {
                return Err(Error::InvalidOverrides {
                    message: format!("expected an object, got {other}"),
                });
            }
        }

        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);

        let merged: MentionConfig =
            serde_json::from_value(base).map_err(|e| Error::InvalidOverrides {
                message: e.to_string(),
            })?;
        merged.validate()?;
        Ok(merged)
    }

    /// The trigger character as a `char`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCharacter`] unless `character` is exactly one
    /// non-whitespace character.
    pub fn trigger(&self) -> Result<char> {
        let mut chars = self.character.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(c),
            _ => Err(Error::InvalidCharacter {
                character: self.character.clone(),
            }),
        }
    }

    /// Check the invariants that do not need a compiled expression.
    pub fn validate(&self) -> Result<()> {
        self.trigger()?;

        if let Some(name) = self
            .regex_replacement
            .keys()
            .find(|key| BUILTIN_PLACEHOLDERS.contains(&key.as_str()))
        {
            return Err(Error::ReservedPlaceholder { name: name.clone() });
        }

        Ok(())
    }

    /// Expand the `regex` template into a matching expression.
    ///
    /// Substitution is a single pass: text inserted for one placeholder is
    /// never scanned for further placeholders. The trigger character is
    /// always escaped.
    ///
    /// # Example
    ///
    /// ```
    /// use mention_config::MentionConfig;
    ///
    /// let expression = MentionConfig::default().expression().unwrap();
    /// assert_eq!(expression, r"\s(@[A-Za-z0-9]{4,20})");
    /// ```
    pub fn expression(&self) -> Result<String> {
        self.validate()?;

        let character = regex::escape(&self.character);
        let mut unknown: Option<String> = None;

        let expanded = PLACEHOLDER_REGEX.replace_all(&self.regex, |caps: &Captures<'_>| {
            // `\p{L}` and `\P{L}` are Unicode classes, not placeholders
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            match &caps[2] {
                "character" => character.clone(),
                "pattern" => self.pattern.clone(),
                "rules" => self.rules.clone(),
                other => match self.regex_replacement.get(other) {
                    Some(value) => value.clone(),
                    None => {
                        unknown.get_or_insert_with(|| other.to_string());
                        caps[0].to_string()
                    }
                },
            }
        });
        let expanded = expanded.into_owned();

        match unknown {
            Some(name) => Err(Error::UnknownPlaceholder { name }),
            None => Ok(expanded),
        }
    }
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
pub(crate) fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                match base_map.get_mut(key) {
                    Some(base_val) => deep_merge_value(base_val, other_val),
                    None => {
                        base_map.insert(key.clone(), other_val.clone());
                    }
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
