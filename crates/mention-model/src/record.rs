//! Identities, author references and mention records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a directory entry, scoped to its pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityId {
    /// Pool the identity belongs to (e.g. "users")
    pub pool: String,
    /// Key of the identity within the pool
    pub key: String,
}

impl IdentityId {
    pub fn new(pool: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pool, self.key)
    }
}

/// A mentionable entry returned by a [`Directory`](crate::Directory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    /// Name matched against candidate tokens
    pub name: String,
}

impl Identity {
    pub fn new(id: IdentityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Reference to the entity that authored a mention (a post, a comment...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: String,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Durable evidence that an author mentioned a recipient.
///
/// The recipient is held by id only; resolving it back to an [`Identity`]
/// is a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    /// Unique identifier for this record
    pub id: Uuid,
    pub author: EntityRef,
    pub recipient: IdentityId,
    /// Whether notification was requested
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

impl MentionRecord {
    /// Create a record with a generated id and the current timestamp
    pub fn new(author: EntityRef, recipient: IdentityId, notified: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            recipient,
            notified,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_id_displays_pool_and_key() {
        assert_eq!(IdentityId::new("users", "42").to_string(), "users:42");
    }

    #[test]
    fn entity_ref_displays_kind_and_id() {
        assert_eq!(EntityRef::new("post", "7").to_string(), "post:7");
    }

    #[test]
    fn record_new_generates_uuid_and_timestamp() {
        let record = MentionRecord::new(
            EntityRef::new("post", "1"),
            IdentityId::new("users", "1"),
            true,
        );

        assert!(!record.id.is_nil());
        assert!(record.notified);
        let diff = Utc::now().signed_duration_since(record.created_at);
        assert!(diff.num_seconds() < 60);
    }

    #[test]
    fn record_serializes_to_json() {
        let record = MentionRecord::new(
            EntityRef::new("comment", "9"),
            IdentityId::new("teams", "core"),
            false,
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["author"]["kind"], "comment");
        assert_eq!(value["recipient"]["key"], "core");
        assert_eq!(value["notified"], false);
    }
}
