//! Reference-counted handles onto desktop contexts.
//!
//! Each saved position holds a [`DesktopRef`] instead of owning its desktop
//! context. The handle registers a claim on the desktop's id in a
//! [`RefCountRegistry`]: construction and cloning increment the count, drop
//! decrements it. The registry only bookkeeps — it never reclaims anything
//! itself, so a count may sit at zero until the owning collection decides to
//! prune (see [`DesktopCache::prune`](crate::position::DesktopCache)).
//!
//! Reassigning a handle (`handle = other.clone()`) releases the old claim and
//! takes the new one through ordinary drop glue; there is no separate assign
//! operation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::position::desktop::PositionDesktop;
use crate::position::id::{DesktopId, ParseIdError};

/// Mapping from desktop id to the number of live claims on it.
///
/// Methods take `&self` so handles can adjust counts through a shared `Rc`;
/// implementations use interior mutability. The core is single-threaded by
/// design — a multi-threaded host must wrap its registry accordingly.
pub trait RefCountRegistry {
    /// Adds one claim on `id`, creating the entry if needed.
    fn increment(&self, id: DesktopId);

    /// Releases one claim on `id`.
    ///
    /// Must never remove the entry; the count may reach and remain at zero.
    fn decrement(&self, id: DesktopId);

    /// The current number of claims on `id` (zero when untracked).
    fn count_of(&self, id: DesktopId) -> usize;
}

/// Default in-memory [`RefCountRegistry`].
#[derive(Debug, Default)]
pub struct DesktopRegistry {
    counts: RefCell<HashMap<DesktopId, usize>>,
}

impl DesktopRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids the registry has ever tracked, including zero-count
    /// entries.
    pub fn tracked(&self) -> usize {
        self.counts.borrow().len()
    }

    /// Ids whose count is currently zero — the candidates for reclamation.
    pub fn unreferenced(&self) -> Vec<DesktopId> {
        self.counts
            .borrow()
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl RefCountRegistry for DesktopRegistry {
    fn increment(&self, id: DesktopId) {
        *self.counts.borrow_mut().entry(id).or_insert(0) += 1;
    }

    fn decrement(&self, id: DesktopId) {
        let mut counts = self.counts.borrow_mut();
        match counts.get_mut(&id) {
            Some(count) if *count > 0 => *count -= 1,
            Some(_) => warn!(%id, "decrement on desktop id whose count is already zero"),
            None => {
                warn!(%id, "decrement on untracked desktop id");
                counts.insert(id, 0);
            }
        }
    }

    fn count_of(&self, id: DesktopId) -> usize {
        self.counts.borrow().get(&id).copied().unwrap_or(0)
    }
}

/// A lightweight claim on a desktop context's identifier.
///
/// Equality compares held ids only; which registry backs a handle is
/// irrelevant to comparisons.
pub struct DesktopRef {
    id: DesktopId,
    registry: Rc<dyn RefCountRegistry>,
}

impl DesktopRef {
    /// Takes a claim on `desktop`'s identifier.
    pub fn new(registry: Rc<dyn RefCountRegistry>, desktop: &PositionDesktop) -> Self {
        Self::from_id(registry, desktop.id())
    }

    /// Takes a claim on an identifier directly.
    pub fn from_id(registry: Rc<dyn RefCountRegistry>, id: DesktopId) -> Self {
        registry.increment(id);
        Self { id, registry }
    }

    /// Parses an identifier string and takes a claim on it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseIdError`] when the string is not a canonical GUID; no
    /// claim is taken in that case.
    pub fn parse(registry: Rc<dyn RefCountRegistry>, id_str: &str) -> Result<Self, ParseIdError> {
        let id: DesktopId = id_str.parse()?;
        Ok(Self::from_id(registry, id))
    }

    /// The identifier this handle claims.
    pub fn id(&self) -> DesktopId {
        self.id
    }
}

impl Clone for DesktopRef {
    fn clone(&self) -> Self {
        Self::from_id(Rc::clone(&self.registry), self.id)
    }
}

impl Drop for DesktopRef {
    fn drop(&mut self) {
        self.registry.decrement(self.id);
    }
}

impl PartialEq for DesktopRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DesktopRef {}

impl fmt::Display for DesktopRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for DesktopRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopRef").field("id", &self.id).finish()
    }
}

impl From<&DesktopRef> for DesktopId {
    fn from(handle: &DesktopRef) -> Self {
        handle.id()
    }
}
