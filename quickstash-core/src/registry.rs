use crate::container::{ContainerRef, WeakContainerRef};
use crate::types::ContainerId;
use parking_lot::RwLock;
use std::sync::Arc;

struct Entry {
    id: ContainerId,
    handle: WeakContainerRef,
}

/// Live set of known storage containers.
///
/// Only the world's lifecycle hooks write to it (`register` on creation, `unregister` on
/// destruction). The engine takes a `snapshot` once per run and never touches the backing set
/// while iterating. Entries are weak, so a container dropped without an `unregister` simply
/// disappears from the next snapshot.
#[derive(Default)]
pub struct ContainerRegistry {
    entries: RwLock<Vec<Entry>>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container. Registering the same container twice is a no-op.
    pub fn register(&self, container: &ContainerRef) -> bool {
        let id = container.lock().id();
        let mut g = self.entries.write();
        if g.iter().any(|e| e.id == id) {
            tracing::trace!(%id, "container already registered");
            return false;
        }

        g.push(Entry {
            id,
            handle: Arc::downgrade(container),
        });
        tracing::debug!(%id, total = g.len(), "container registered");
        true
    }

    /// Remove a container. No-op when it is not (or no longer) registered.
    pub fn unregister(&self, id: ContainerId) -> bool {
        let mut g = self.entries.write();
        let before = g.len();
        g.retain(|e| e.id != id);
        let removed = g.len() != before;
        if removed {
            tracing::debug!(%id, total = g.len(), "container unregistered");
        }
        removed
    }

    pub fn contains(&self, id: ContainerId) -> bool {
        self.entries.read().iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Strong handles to every container still alive, in registration order
    pub fn snapshot(&self) -> Vec<ContainerRef> {
        let (alive, dead) = {
            let g = self.entries.read();
            let mut alive = Vec::with_capacity(g.len());
            let mut dead = Vec::new();
            for e in g.iter() {
                match e.handle.upgrade() {
                    Some(c) => alive.push(c),
                    None => dead.push(e.id),
                }
            }
            (alive, dead)
        };

        if !dead.is_empty() {
            tracing::debug!(count = dead.len(), "pruning dropped containers");
            self.entries.write().retain(|e| !dead.contains(&e.id));
        }

        alive
    }
}
