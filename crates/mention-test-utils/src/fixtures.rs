//! Seeded collaborators and configuration

use mention_config::{MentionSettings, ResolvedConfig};
use mention_model::{
    Author, EntityRef, HasMentions, InMemoryDirectory, InMemoryRecorder, MentionRecord,
    MentionRecorder,
};
use serde_json::Value;
use std::sync::Arc;

/// Link route of the `users` pool in [`users_settings`].
pub const USERS_ROUTE: &str = "/users/profile/";

/// Settings declaring the `users` and `teams` pools.
pub fn users_settings() -> MentionSettings {
    MentionSettings::new()
        .with_pool("users", USERS_ROUTE)
        .with_pool("teams", "/teams/")
}

/// A directory with four users and one team:
///
/// | pool | key | name |
/// |---|---|---|
/// | users | 1 | admin |
/// | users | 2 | admin2 |
/// | users | 3 | Mario |
/// | users | 4 | luigi |
/// | teams | core | core |
pub fn seeded_directory() -> InMemoryDirectory {
    let mut directory = InMemoryDirectory::new();
    directory.insert("users", "1", "admin");
    directory.insert("users", "2", "admin2");
    directory.insert("users", "3", "Mario");
    directory.insert("users", "4", "luigi");
    directory.insert("teams", "core", "core");
    directory
}

/// [`users_settings`] resolved with `overrides`.
///
/// Panics on invalid overrides; use it only in tests.
pub fn resolved(overrides: Value) -> ResolvedConfig {
    users_settings()
        .resolve(&overrides)
        .expect("test overrides should resolve")
}

/// A post authoring mentions into its own in-memory recorder.
pub struct TestPost {
    author: Author,
    recorder: Arc<InMemoryRecorder>,
}

impl TestPost {
    pub fn new(id: &str) -> Self {
        Self::with_recorder(id, Arc::new(InMemoryRecorder::new()))
    }

    /// A post writing into a shared recorder.
    pub fn with_recorder(id: &str, recorder: Arc<InMemoryRecorder>) -> Self {
        Self {
            author: Author::new(EntityRef::new("post", id), recorder.clone()),
            recorder,
        }
    }

    pub fn recorder(&self) -> &InMemoryRecorder {
        &self.recorder
    }

    /// Every record in the recorder, whoever authored it.
    pub fn recorded(&self) -> Vec<MentionRecord> {
        self.recorder
            .records()
            .expect("in-memory recorder should be readable")
    }

    /// Keys of recorded recipients, in creation order.
    pub fn recorded_keys(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .map(|record| record.recipient.key)
            .collect()
    }
}

impl HasMentions for TestPost {
    fn mention_author(&self) -> EntityRef {
        self.author.mention_author()
    }

    fn mention_recorder(&self) -> &dyn MentionRecorder {
        self.author.mention_recorder()
    }
}
