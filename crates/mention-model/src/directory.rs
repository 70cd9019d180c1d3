//! Identity lookup

use crate::error::Result;
use crate::record::{Identity, IdentityId};
use std::collections::HashMap;

/// Lookup backend for mentionable identities.
///
/// Implementations must be thread-safe (Send + Sync) so a parser can be
/// shared across threads.
pub trait Directory: Send + Sync {
    /// Find an identity whose name equals `name`, ignoring case.
    ///
    /// When several identities share the name, the first one wins.
    fn find_by_name_in_pool(&self, pool: &str, name: &str) -> Result<Option<Identity>>;

    /// Find an identity by id.
    fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>>;
}

/// A [`Directory`] backed by in-memory pools.
///
/// Identities keep their insertion order, which decides ties between
/// names that only differ in case.
///
/// # Example
///
/// ```
/// use mention_model::{Directory, InMemoryDirectory};
///
/// let mut directory = InMemoryDirectory::new();
/// directory.insert("users", "1", "Admin");
///
/// let found = directory.find_by_name_in_pool("users", "admin").unwrap();
/// assert_eq!(found.unwrap().name, "Admin");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    pools: HashMap<String, Vec<Identity>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity to a pool and return it.
    pub fn insert(
        &mut self,
        pool: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
    ) -> Identity {
        let pool = pool.into();
        let identity = Identity::new(IdentityId::new(pool.clone(), key), name);
        self.pools.entry(pool).or_default().push(identity.clone());
        identity
    }

    /// Number of identities across all pools.
    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Directory for InMemoryDirectory {
    fn find_by_name_in_pool(&self, pool: &str, name: &str) -> Result<Option<Identity>> {
        let needle = name.to_lowercase();
        let found = self
            .pools
            .get(pool)
            .and_then(|identities| {
                identities
                    .iter()
                    .find(|identity| identity.name.to_lowercase() == needle)
            })
            .cloned();
        Ok(found)
    }

    fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>> {
        let found = self
            .pools
            .get(&id.pool)
            .and_then(|identities| identities.iter().find(|identity| &identity.id == id))
            .cloned();
        Ok(found)
    }
}
