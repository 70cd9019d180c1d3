//! Collaborators that fail on demand

use mention_model::{
    Directory, EntityRef, Error, Identity, IdentityId, InMemoryDirectory, InMemoryRecorder,
    MentionRecord, MentionRecorder, Result,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Kind of failure a [`FailingDirectory`] raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// Raises [`Error::DirectoryUnavailable`]
    Unavailable,
    /// Raises [`Error::DirectoryFailure`]
    Fatal,
}

/// Wraps a directory and fails lookups of selected names.
pub struct FailingDirectory {
    inner: InMemoryDirectory,
    failing_names: HashSet<String>,
    failure: LookupFailure,
}

impl FailingDirectory {
    pub fn new(inner: InMemoryDirectory, failure: LookupFailure, names: &[&str]) -> Self {
        Self {
            inner,
            failing_names: names.iter().map(|name| name.to_lowercase()).collect(),
            failure,
        }
    }

    fn error(&self, name: &str) -> Error {
        let message = format!("lookup of {name} failed");
        match self.failure {
            LookupFailure::Unavailable => Error::DirectoryUnavailable { message },
            LookupFailure::Fatal => Error::DirectoryFailure { message },
        }
    }
}

impl Directory for FailingDirectory {
    fn find_by_name_in_pool(&self, pool: &str, name: &str) -> Result<Option<Identity>> {
        if self.failing_names.contains(&name.to_lowercase()) {
            return Err(self.error(name));
        }
        self.inner.find_by_name_in_pool(pool, name)
    }

    fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>> {
        self.inner.find_by_id(id)
    }
}

/// A recorder that accepts a fixed number of records, then fails.
pub struct FailingRecorder {
    inner: InMemoryRecorder,
    remaining: AtomicUsize,
}

impl FailingRecorder {
    /// Accept `successes` records before failing.
    pub fn after(successes: usize) -> Self {
        Self {
            inner: InMemoryRecorder::new(),
            remaining: AtomicUsize::new(successes),
        }
    }

    /// Records stored before the recorder started failing.
    pub fn stored(&self) -> usize {
        self.inner.len().expect("Record store should be readable")
    }
}

impl MentionRecorder for FailingRecorder {
    fn create(
        &self,
        author: &EntityRef,
        recipient: &Identity,
        notify: bool,
    ) -> Result<MentionRecord> {
        let accepted = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !accepted {
            return Err(Error::RecorderFailure {
                message: format!("refusing mention of {}", recipient.id),
            });
        }
        self.inner.create(author, recipient, notify)
    }

    fn list_by_author(&self, author: &EntityRef) -> Result<Vec<MentionRecord>> {
        self.inner.list_by_author(author)
    }
}
