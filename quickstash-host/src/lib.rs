pub mod chest;
pub mod config;
pub mod error;
pub mod player;
pub mod sinks;
pub mod trigger;
pub mod world;

pub use config::Config;
pub use trigger::{InteractionGate, MenuState, StashTrigger, hover_text};
pub use world::World;
