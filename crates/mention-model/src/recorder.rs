//! Mention record storage and notification hooks

use crate::error::{Error, Result};
use crate::record::{EntityRef, Identity, MentionRecord};
use std::sync::{Arc, RwLock};

/// Storage backend for mention records.
pub trait MentionRecorder: Send + Sync {
    /// Create a new record. Every call creates a record; there is no
    /// existing-record check.
    fn create(&self, author: &EntityRef, recipient: &Identity, notify: bool)
    -> Result<MentionRecord>;

    /// All records created by `author`, oldest first.
    fn list_by_author(&self, author: &EntityRef) -> Result<Vec<MentionRecord>>;
}

/// Delivery hook for recipients of a new mention.
pub trait Notifier: Send + Sync {
    fn notify(&self, record: &MentionRecord, recipient: &Identity) -> Result<()>;
}

/// A [`MentionRecorder`] keeping records in memory.
///
/// When a [`Notifier`] is attached, it is called after a record with
/// `notify = true` has been stored. A failing notifier does not roll the
/// record back.
#[derive(Default)]
pub struct InMemoryRecorder {
    records: RwLock<Vec<MentionRecord>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl InMemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Snapshot of every stored record, in creation order.
    pub fn records(&self) -> Result<Vec<MentionRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.clone())
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl std::fmt::Debug for InMemoryRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecorder")
            .field("records", &self.len().ok())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl MentionRecorder for InMemoryRecorder {
    fn create(
        &self,
        author: &EntityRef,
        recipient: &Identity,
        notify: bool,
    ) -> Result<MentionRecord> {
        let record = MentionRecord::new(author.clone(), recipient.id.clone(), notify);

        {
            let mut records = self.records.write().map_err(|_| poisoned())?;
            records.push(record.clone());
        }
        tracing::debug!(%author, recipient = %recipient.id, notify, "Recorded mention");

        if notify {
            if let Some(notifier) = &self.notifier {
                notifier.notify(&record, recipient)?;
            }
        }

        Ok(record)
    }

    fn list_by_author(&self, author: &EntityRef) -> Result<Vec<MentionRecord>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|record| &record.author == author)
            .cloned()
            .collect())
    }
}

fn poisoned() -> Error {
    Error::RecorderFailure {
        message: "record store lock poisoned".to_string(),
    }
}
