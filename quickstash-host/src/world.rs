use crate::chest::{Chest, StackLimits};
use crate::error::{HostError, HostResult, WorldErrorKind};
use crate::player::{GridInventory, Player};
use parking_lot::Mutex;
use quickstash_core::{Container, ContainerId, ContainerRef, ContainerRegistry, Item, Position, SlotPos};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Only proper storage chests take part in stashing, not carts or ship holds
pub const CHEST_PREFIX: &str = "piece_chest";

#[derive(Debug, Deserialize)]
pub struct WorldYaml {
    #[serde(default)]
    pub stack_limits: StackLimits,
    pub player: PlayerYaml,
    #[serde(default)]
    pub containers: Vec<ContainerYaml>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerYaml {
    #[serde(default = "default_player_name")]
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub items: Vec<SlotItemYaml>,
}

#[derive(Debug, Deserialize)]
pub struct SlotItemYaml {
    pub x: usize,
    pub y: usize,
    #[serde(flatten)]
    pub item: Item,
}

#[derive(Debug, Deserialize)]
pub struct ContainerYaml {
    pub name: String,               // "piece_chest_wood"
    pub position: Position,
    pub slots: usize,
    #[serde(default)]
    pub in_use: bool,
    #[serde(default)]
    pub items: Vec<Item>,
}

fn default_player_name() -> String {
    "player".to_string()
}

fn default_width() -> usize {
    8
}

fn default_height() -> usize {
    4
}

/// Simulated world: one player and the chests around them.
///
/// The world owns the chests. The registry only sees them through weak handles and is kept in
/// sync by `spawn_chest` and `destroy_chest`, the same way a game's lifecycle hooks would.
pub struct World {
    pub player: Player,
    chests: Vec<Arc<Mutex<Chest>>>,
    registry: Arc<ContainerRegistry>,
    limits: Arc<StackLimits>,
}

impl World {
    pub fn new(player: Player, limits: StackLimits, registry: Arc<ContainerRegistry>) -> Self {
        Self {
            player,
            chests: Vec::new(),
            registry,
            limits: Arc::new(limits),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, registry: Arc<ContainerRegistry>) -> HostResult<Self> {
        let path = path.as_ref();
        let wrap = |source: WorldErrorKind| HostError::World {
            path: path.to_path_buf(),
            source,
        };

        let data = std::fs::read_to_string(path).map_err(|e| wrap(WorldErrorKind::Read(e)))?;
        let yaml: WorldYaml = serde_yaml::from_str(&data).map_err(|e| wrap(WorldErrorKind::Parse(e)))?;
        Self::from_yaml(yaml, registry).map_err(|msg| wrap(WorldErrorKind::Invalid(msg)))
    }

    pub fn from_yaml(yaml: WorldYaml, registry: Arc<ContainerRegistry>) -> Result<Self, String> {
        let mut inventory = GridInventory::new(yaml.player.width, yaml.player.height);
        for entry in yaml.player.items {
            validate_item(&entry.item)?;
            let slot = SlotPos::new(entry.x, entry.y);
            inventory
                .put(slot, entry.item)
                .map_err(|item| format!("cannot put {} into player slot {slot}", item.kind))?;
        }

        let player = Player {
            name: yaml.player.name,
            position: yaml.player.position,
            inventory,
        };

        let mut world = World::new(player, yaml.stack_limits, registry);
        for c in yaml.containers {
            let mut chest = Chest::new(&c.name, c.position, c.slots, world.limits.clone());
            chest.set_in_use(c.in_use);
            for item in c.items {
                validate_item(&item)?;
                chest
                    .insert(item)
                    .map_err(|item| format!("container {} has no room for {}", c.name, item.kind))?;
            }
            world.spawn_chest(chest);
        }

        Ok(world)
    }

    /// Lifecycle hook: a chest appeared in the world
    pub fn spawn_chest(&mut self, chest: Chest) -> ContainerId {
        let id = chest.id();
        let is_storage = chest.name.starts_with(CHEST_PREFIX);
        let name = chest.name.clone();
        let chest = Arc::new(Mutex::new(chest));

        if is_storage {
            let handle: ContainerRef = chest.clone();
            self.registry.register(&handle);
        } else {
            tracing::debug!(%id, %name, "not a storage chest, not registered");
        }

        self.chests.push(chest);
        id
    }

    /// Lifecycle hook: a chest was destroyed
    pub fn destroy_chest(&mut self, id: ContainerId) -> HostResult<()> {
        let pos = self
            .chests
            .iter()
            .position(|c| c.lock().id() == id)
            .ok_or_else(|| HostError::NotFound(format!("container {id}")))?;

        let chest = self.chests.remove(pos);
        chest.lock().mark_destroyed();
        self.registry.unregister(id);
        Ok(())
    }

    pub fn chests(&self) -> &[Arc<Mutex<Chest>>] {
        &self.chests
    }

    pub fn registry(&self) -> &Arc<ContainerRegistry> {
        &self.registry
    }
}

fn validate_item(item: &Item) -> Result<(), String> {
    if item.count == 0 {
        return Err(format!("item {} has a zero count", item.kind));
    }
    if item.kind.trim().is_empty() {
        return Err("item with an empty kind".to_string());
    }
    Ok(())
}
