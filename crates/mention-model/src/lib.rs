//! Domain model for mentions.
//!
//! This crate defines the data carried between the parser and its external
//! collaborators, and the seams where those collaborators plug in:
//!
//! - [`Directory`] - identity lookup by name (case-insensitive) or by id
//! - [`MentionRecorder`] - durable storage of [`MentionRecord`]s
//! - [`Notifier`] - delivery hook fired when a record asks for notification
//! - [`HasMentions`] - the capability an author entity exposes
//!
//! In-memory implementations ([`InMemoryDirectory`], [`InMemoryRecorder`])
//! are provided for tests and for embedding hosts without their own storage.

pub mod directory;
pub mod error;
pub mod mentions;
pub mod record;
pub mod recorder;

pub use directory::{Directory, InMemoryDirectory};
pub use error::{Error, Result};
pub use mentions::{Author, HasMentions};
pub use record::{EntityRef, Identity, IdentityId, MentionRecord};
pub use recorder::{InMemoryRecorder, MentionRecorder, Notifier};
