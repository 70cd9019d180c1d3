//! The capability exposed by entities that can author mentions

use crate::directory::Directory;
use crate::error::Result;
use crate::record::{EntityRef, Identity, MentionRecord};
use crate::recorder::MentionRecorder;
use std::sync::Arc;

/// Capability of an entity that can mention identities.
///
/// Implementors only say who they are and where records go; creating and
/// listing mentions is provided.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mention_model::{Author, EntityRef, HasMentions, InMemoryDirectory, InMemoryRecorder};
///
/// let mut directory = InMemoryDirectory::new();
/// let admin = directory.insert("users", "1", "admin");
///
/// let post = Author::new(EntityRef::new("post", "1"), Arc::new(InMemoryRecorder::new()));
/// post.mention(&admin, true).unwrap();
///
/// assert_eq!(post.mentions().unwrap().len(), 1);
/// assert_eq!(post.mentioned(&directory).unwrap(), vec![admin]);
/// ```
pub trait HasMentions {
    /// Reference stored as the author of new records.
    fn mention_author(&self) -> EntityRef;

    /// Recorder that owns this entity's records.
    fn mention_recorder(&self) -> &dyn MentionRecorder;

    /// Create a new mention of `recipient`.
    ///
    /// Always creates a record, even if an identical one exists.
    fn mention(&self, recipient: &Identity, notify: bool) -> Result<MentionRecord> {
        self.mention_recorder()
            .create(&self.mention_author(), recipient, notify)
    }

    /// Records authored by this entity, oldest first.
    fn mentions(&self) -> Result<Vec<MentionRecord>> {
        self.mention_recorder()
            .list_by_author(&self.mention_author())
    }

    /// Recipients of this entity's records, resolved through `directory`.
    ///
    /// Records whose recipient is no longer in the directory are skipped.
    fn mentioned(&self, directory: &dyn Directory) -> Result<Vec<Identity>> {
        let mut recipients = Vec::new();
        for record in self.mentions()? {
            match directory.find_by_id(&record.recipient)? {
                Some(identity) => recipients.push(identity),
                None => {
                    tracing::debug!(
                        recipient = %record.recipient,
                        record = %record.id,
                        "Skipping mention of a recipient missing from the directory"
                    );
                }
            }
        }
        Ok(recipients)
    }
}

/// A ready-made author: an entity reference plus a shared recorder.
///
/// Domain types can hold an `Author` and delegate to it, or implement
/// [`HasMentions`] themselves.
#[derive(Clone)]
pub struct Author {
    entity: EntityRef,
    recorder: Arc<dyn MentionRecorder>,
}

impl Author {
    pub fn new(entity: EntityRef, recorder: Arc<dyn MentionRecorder>) -> Self {
        Self { entity, recorder }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }
}

impl std::fmt::Debug for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Author").field("entity", &self.entity).finish()
    }
}

impl HasMentions for Author {
    fn mention_author(&self) -> EntityRef {
        self.entity.clone()
    }

    fn mention_recorder(&self) -> &dyn MentionRecorder {
        self.recorder.as_ref()
    }
}
