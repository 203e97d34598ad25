//! Owning collection for desktop contexts, with explicit reclamation.
//!
//! The cache holds every desktop context a document knows about, keyed by id.
//! Reference counts live elsewhere (a [`RefCountRegistry`]); the cache
//! consults them only when asked to [`prune`](DesktopCache::prune), so
//! dropping the last handle on a desktop never deletes anything by itself.

use std::collections::HashMap;

use tracing::debug;

use crate::document::{DocumentError, PositionLogWriter};
use crate::position::desktop::PositionDesktop;
use crate::position::id::DesktopId;
use crate::position::refs::RefCountRegistry;

/// Desktop contexts keyed by their identifier.
///
/// Keys are taken from each desktop's id at insertion time; reassigning an id
/// with [`PositionDesktop::set_id`] after insertion requires re-inserting.
#[derive(Debug, Default)]
pub struct DesktopCache {
    desktops: HashMap<DesktopId, PositionDesktop>,
}

impl DesktopCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a desktop under its own id, returning any previous desktop
    /// with that id.
    pub fn insert(&mut self, desktop: PositionDesktop) -> Option<PositionDesktop> {
        self.desktops.insert(desktop.id(), desktop)
    }

    /// Looks up a desktop by id.
    pub fn get(&self, id: DesktopId) -> Option<&PositionDesktop> {
        self.desktops.get(&id)
    }

    /// Removes and returns a desktop by id.
    pub fn remove(&mut self, id: DesktopId) -> Option<PositionDesktop> {
        self.desktops.remove(&id)
    }

    /// Number of cached desktops.
    pub fn len(&self) -> usize {
        self.desktops.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.desktops.is_empty()
    }

    /// Iterates over the cached desktops in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &PositionDesktop> {
        self.desktops.values()
    }

    /// Drops every cached desktop whose count in `registry` is zero.
    ///
    /// Returns the number of desktops removed. This is the reclamation step
    /// the surrounding document runs before saving, so contexts no position
    /// references any more do not accumulate in the file.
    pub fn prune(&mut self, registry: &dyn RefCountRegistry) -> usize {
        let before = self.desktops.len();
        self.desktops.retain(|id, _| registry.count_of(*id) > 0);
        let removed = before - self.desktops.len();
        if removed > 0 {
            debug!(removed, "pruned unreferenced desktop contexts");
        }
        removed
    }

    /// Saves every cached desktop, ordered by id for stable output.
    ///
    /// # Errors
    ///
    /// Stops at and propagates the first [`DocumentError`] from a save.
    pub fn save_all(
        &self,
        writer: &mut dyn PositionLogWriter,
        version: u32,
    ) -> Result<(), DocumentError> {
        let mut ids: Vec<DesktopId> = self.desktops.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            self.desktops[&id].save(writer, version)?;
        }
        Ok(())
    }
}
