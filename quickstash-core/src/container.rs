//! Narrow interface the engine uses to talk to world containers.

use crate::error::ContainerError;
use crate::item::Item;
use crate::types::{ContainerId, Position};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// A storage container living in the world.
///
/// The engine never reasons about stacking rules itself. It asks `can_add` before every `add`,
/// and treats an `add` returning `Ok(false)` as "the container changed its mind".
pub trait Container: Send + Sync {
    fn id(&self) -> ContainerId;

    fn position(&self) -> Result<Position, ContainerError>;

    /// Current contents, one entry per occupied slot
    fn contents(&self) -> Result<Vec<Item>, ContainerError>;

    /// Whether somebody currently has this container open
    fn is_in_use(&self) -> Result<bool, ContainerError>;

    /// Number of completely free slots
    fn empty_slots(&self) -> Result<usize, ContainerError>;

    /// Whether the whole stack would fit right now
    fn can_add(&self, item: &Item) -> Result<bool, ContainerError>;

    /// Add the whole stack. Returns false when it no longer fits.
    fn add(&mut self, item: &Item) -> Result<bool, ContainerError>;
}

/// Shared handle to a live container.
pub type ContainerRef = Arc<Mutex<dyn Container>>;

/// Handle held by the registry. It does not keep the container alive.
pub type WeakContainerRef = Weak<Mutex<dyn Container>>;

/// Wrap a container into a shared handle
pub fn container_ref<C: Container + 'static>(container: C) -> ContainerRef {
    Arc::new(Mutex::new(container))
}
