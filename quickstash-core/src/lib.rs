//! Stash distribution engine: moves an actor's inventory into nearby storage containers,
//! preferring containers that already hold the same kind, then the open container, then the
//! nearest empty one, then the one with the most free space.

pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod highlight;
pub mod index;
pub mod item;
pub mod registry;
pub mod snapshot;
pub mod types;

pub use config::{HighlightConfig, StashConfig};
pub use container::{Container, ContainerRef, container_ref};
pub use engine::{AllocationDecision, Outcome, StashReport, StashService, Tier};
pub use error::{ConfigError, ContainerError};
pub use feedback::{Discard, FeedbackSink, HighlightSink, ReportSink};
pub use highlight::HighlightScheduler;
pub use index::ContentIndex;
pub use item::Item;
pub use registry::ContainerRegistry;
pub use snapshot::{Actor, Inventory, InventorySnapshot, SkipReason};
pub use types::{ContainerId, Position, SlotPos};
