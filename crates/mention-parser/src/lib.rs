//! Mention scanning, resolution and rewriting.
//!
//! A [`MentionParser`] is bound to one author, one directory and one
//! compiled configuration. Parsing a text runs in three stages:
//!
//! 1. **Scan** - every match of the configured expression is a candidate token
//! 2. **Resolve** - each candidate is looked up in the directory; resolved
//!    candidates are recorded as mentions of the author
//! 3. **Rewrite** - resolved tokens are replaced by markdown links in one pass,
//!    longest token first
//!
//! ```text
//! "hey @admin2 and @admin"
//!        |
//!   scan + resolve  ->  records: post:1 -> users:2, post:1 -> users:1
//!        |
//! "hey [@Admin2](/users/profile/Admin2) and [@Admin](/users/profile/Admin)"
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mention_config::MentionSettings;
//! use mention_model::{Author, EntityRef, HasMentions, InMemoryDirectory, InMemoryRecorder};
//! use mention_parser::MentionParser;
//! use serde_json::Value;
//!
//! let mut directory = InMemoryDirectory::new();
//! directory.insert("users", "1", "admin");
//!
//! let config = MentionSettings::new()
//!     .with_pool("users", "/users/profile/")
//!     .resolve(&Value::Null)
//!     .unwrap();
//! let post = Author::new(EntityRef::new("post", "1"), Arc::new(InMemoryRecorder::new()));
//!
//! let parser = MentionParser::new(&post, &directory, config);
//! let output = parser.parse("hello @admin!").unwrap();
//!
//! assert_eq!(output, "hello [@Admin](/users/profile/Admin)!");
//! assert_eq!(post.mentions().unwrap().len(), 1);
//! ```

pub mod error;
pub mod logging;
mod parser;
mod render;

pub use error::{Error, Result};
pub use parser::{MentionParser, ParseReport};
pub use render::{render_link, strip_trigger, title_case};
