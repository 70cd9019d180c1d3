//! The mention parser
//!
//! Detection and mutation are separate passes. The scan resolves and records
//! every candidate first; the text is only rewritten afterwards, in a single
//! replacement pass built from the resolved tokens.

use crate::error::Result;
use crate::render::{render_link, strip_trigger};
use mention_config::ResolvedConfig;
use mention_model::{Directory, HasMentions, Identity, IdentityId, MentionRecord};
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// True when a token ends with a word character.
static ENDS_WITH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w\z").expect("Invalid word-end regex"));

/// A resolved token as the scanner found it.
///
/// Ordered by token first, so reverse iteration puts longer names ahead of
/// their prefixes and a whitespace-led form ahead of the bare one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RewriteTarget {
    token: String,
    after_whitespace: bool,
}

impl RewriteTarget {
    fn from_match(raw: &str) -> Self {
        Self {
            token: raw.trim().to_string(),
            after_whitespace: raw.starts_with(char::is_whitespace),
        }
    }
}

/// Outcome of a parse, for callers that need more than the rewritten text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// The rewritten text
    pub text: String,
    /// Records created during the parse, in occurrence order
    pub recorded: Vec<MentionRecord>,
    /// Candidate tokens that did not resolve, in occurrence order
    pub unresolved: Vec<String>,
}

/// Parser bound to an author, a directory and a compiled configuration.
///
/// The configuration is fixed for the parser's lifetime. The parser holds no
/// mutable state, so one instance can serve concurrent parses when the
/// author and directory allow it.
pub struct MentionParser<'a, A: HasMentions + ?Sized> {
    author: &'a A,
    directory: &'a dyn Directory,
    config: ResolvedConfig,
    current_actor: Option<IdentityId>,
}

impl<'a, A: HasMentions + ?Sized> MentionParser<'a, A> {
    pub fn new(author: &'a A, directory: &'a dyn Directory, config: ResolvedConfig) -> Self {
        Self {
            author,
            directory,
            config,
            current_actor: None,
        }
    }

    /// Set the identity of the actor performing the parse.
    ///
    /// Only used to suppress self-mentions when `mention_self` is off.
    pub fn with_current_actor(mut self, actor: Option<IdentityId>) -> Self {
        self.current_actor = actor;
        self
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Record the mentions found in `input` and return it with resolved
    /// tokens rewritten as markdown links.
    ///
    /// Text without resolvable tokens is returned unchanged.
    ///
    /// # Errors
    ///
    /// Fatal directory failures and recorder failures abort the parse.
    /// Records created before the failure are kept.
    pub fn parse(&self, input: &str) -> Result<String> {
        Ok(self.parse_report(input)?.text)
    }

    /// [`parse`](Self::parse) for optional input; `None` passes through.
    pub fn parse_optional(&self, input: Option<&str>) -> Result<Option<String>> {
        input.map(|text| self.parse(text)).transpose()
    }

    /// Like [`parse`](Self::parse), also returning the records created and
    /// the tokens left untouched.
    pub fn parse_report(&self, input: &str) -> Result<ParseReport> {
        let mut report = ParseReport::default();
        if input.is_empty() {
            return Ok(report);
        }

        let mut targets = BTreeSet::new();
        let mut recorded_recipients = HashSet::new();

        for candidate in self.config.scanner().find_iter(input) {
            let target = RewriteTarget::from_match(candidate.as_str());
            let token = target.token.as_str();

            let Some(identity) = self.lookup(token)? else {
                report.unresolved.push(token.to_string());
                continue;
            };

            if let Some(record) = self.record(&identity, &mut recorded_recipients)? {
                report.recorded.push(record);
            }
            targets.insert(target);
        }

        report.text = if targets.is_empty() {
            input.to_string()
        } else {
            self.rewrite(input, &targets)?
        };

        Ok(report)
    }

    /// Resolve the tokens in `input` without recording anything.
    ///
    /// Returns one identity per resolved occurrence, in order of appearance.
    pub fn matches_from_input(&self, input: &str) -> Result<Vec<Identity>> {
        let mut identities = Vec::new();
        for candidate in self.config.scanner().find_iter(input) {
            if let Some(identity) = self.lookup(candidate.as_str().trim())? {
                identities.push(identity);
            }
        }
        Ok(identities)
    }

    /// Look up a trimmed token in the configured pool.
    ///
    /// Transient directory failures count as a miss.
    fn lookup(&self, token: &str) -> Result<Option<Identity>> {
        let name = strip_trigger(token, self.config.trigger());

        match self.directory.find_by_name_in_pool(self.config.pool(), &name) {
            Ok(Some(identity)) => {
                tracing::debug!(token, identity = %identity.id, "Resolved mention");
                Ok(Some(identity))
            }
            Ok(None) => {
                tracing::debug!(token, pool = self.config.pool(), "No identity for mention");
                Ok(None)
            }
            Err(err) if err.is_transient() => {
                tracing::warn!(token, error = %err, "Directory lookup failed, leaving token as is");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Record a mention of `identity` unless the options suppress it.
    fn record(
        &self,
        identity: &Identity,
        recorded_recipients: &mut HashSet<IdentityId>,
    ) -> Result<Option<MentionRecord>> {
        if !self.config.mention_enabled() {
            return Ok(None);
        }

        let is_self = self.current_actor.as_ref() == Some(&identity.id);
        if is_self && !self.config.mention_self() {
            tracing::debug!(identity = %identity.id, "Skipping self-mention");
            return Ok(None);
        }

        if !recorded_recipients.insert(identity.id.clone())
            && !self.config.mention_each_occurrence()
        {
            return Ok(None);
        }

        let record = self.author.mention(identity, self.config.notify())?;
        Ok(Some(record))
    }

    /// Replace every occurrence of a target, in the shape the scanner
    /// matched it, with its link.
    ///
    /// A whitespace-led match swallows the whole whitespace run and renders
    /// with a single leading space; a bare match renders without one.
    fn rewrite(&self, input: &str, targets: &BTreeSet<RewriteTarget>) -> Result<String> {
        let expression = rewrite_expression(targets.iter().rev());
        let regex = Regex::new(&expression).map_err(mention_config::Error::from)?;

        let trigger = self.config.trigger();
        let route = self.config.route();
        let rewritten = regex.replace_all(input, |caps: &Captures<'_>| {
            let matched = &caps[0];
            let link = render_link(trigger, route, matched);
            if matched.starts_with(char::is_whitespace) {
                link
            } else {
                link.trim_start().to_string()
            }
        });

        Ok(rewritten.into_owned())
    }
}

/// Combine targets into one alternation, in the given order.
///
/// Each alternative must not be followed by a word character, so `@admin`
/// never matches the start of `@admin2`. Callers pass the longest names
/// first so alternation order never favours a prefix.
fn rewrite_expression<'t>(targets: impl Iterator<Item = &'t RewriteTarget>) -> String {
    let alternatives: Vec<String> = targets
        .map(|target| {
            let lead = if target.after_whitespace { r"\s+" } else { "" };
            // After a word char `\b` means "no word char next"; after a non-word char `\B` does.
            let boundary = if ENDS_WITH_WORD.is_match(&target.token) {
                r"\b"
            } else {
                r"\B"
            };
            format!("{lead}{}{boundary}", regex::escape(&target.token))
        })
        .collect();

    alternatives.join("|")
}
