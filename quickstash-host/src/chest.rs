use quickstash_core::{Container, ContainerError, ContainerId, Item, Position};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum stack size per item kind
#[derive(Debug, Clone, Deserialize)]
pub struct StackLimits {
    #[serde(default = "default_stack")]
    pub default: u32,
    #[serde(default)]
    pub kinds: HashMap<String, u32>,
}

fn default_stack() -> u32 {
    20
}

impl Default for StackLimits {
    fn default() -> Self {
        Self {
            default: default_stack(),
            kinds: HashMap::new(),
        }
    }
}

impl StackLimits {
    pub fn limit(&self, kind: &str) -> u32 {
        self.kinds.get(kind).copied().unwrap_or(self.default).max(1)
    }
}

/// Slot based storage chest placed in the world.
#[derive(Debug)]
pub struct Chest {
    id: ContainerId,
    /// Prefab name (e.g., "piece_chest_wood")
    pub name: String,
    pub position: Position,
    slots: Vec<Option<Item>>,
    limits: Arc<StackLimits>,
    in_use: bool,
    destroyed: bool,
}

impl Chest {
    pub fn new(name: impl Into<String>, position: Position, slot_count: usize, limits: Arc<StackLimits>) -> Self {
        Self {
            id: ContainerId::new(),
            name: name.into(),
            position,
            slots: vec![None; slot_count],
            limits,
            in_use: false,
            destroyed: false,
        }
    }

    pub fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }

    /// Called by the world right before the chest is removed
    pub fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().flatten()
    }

    /// Total count of `kind` stored in this chest
    pub fn count_of(&self, kind: &str) -> u32 {
        self.items().filter(|i| i.kind == kind).map(|i| i.count).sum()
    }

    /// How many more of `kind` fit, topping up partial stacks and filling free slots
    pub fn room_for(&self, kind: &str) -> u64 {
        let limit = self.limits.limit(kind);
        self.slots
            .iter()
            .map(|s| match s {
                None => u64::from(limit),
                Some(i) if i.kind == kind => u64::from(limit.saturating_sub(i.count)),
                Some(_) => 0,
            })
            .sum()
    }

    /// Put a stack straight into the next free slot (world loading)
    pub fn insert(&mut self, item: Item) -> Result<(), Item> {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                Ok(())
            }
            None => Err(item),
        }
    }

    fn check(&self) -> Result<(), ContainerError> {
        if self.destroyed {
            return Err(ContainerError::Destroyed(self.id));
        }
        Ok(())
    }
}

impl Container for Chest {
    fn id(&self) -> ContainerId {
        self.id
    }

    fn position(&self) -> Result<Position, ContainerError> {
        self.check()?;
        Ok(self.position)
    }

    fn contents(&self) -> Result<Vec<Item>, ContainerError> {
        self.check()?;
        Ok(self.items().cloned().collect())
    }

    fn is_in_use(&self) -> Result<bool, ContainerError> {
        self.check()?;
        Ok(self.in_use)
    }

    fn empty_slots(&self) -> Result<usize, ContainerError> {
        self.check()?;
        Ok(self.slots.iter().filter(|s| s.is_none()).count())
    }

    fn can_add(&self, item: &Item) -> Result<bool, ContainerError> {
        self.check()?;
        Ok(self.room_for(&item.kind) >= u64::from(item.count))
    }

    fn add(&mut self, item: &Item) -> Result<bool, ContainerError> {
        if !self.can_add(item)? {
            return Ok(false);
        }

        let limit = self.limits.limit(&item.kind);
        let mut left = item.count;

        for stack in self.slots.iter_mut().flatten().filter(|s| s.kind == item.kind) {
            let take = left.min(limit.saturating_sub(stack.count));
            stack.count += take;
            left -= take;
        }

        for slot in self.slots.iter_mut().filter(|s| s.is_none()) {
            if left == 0 {
                break;
            }
            let take = left.min(limit);
            *slot = Some(Item::new(item.kind.clone(), take));
            left -= take;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chest(slots: usize) -> Chest {
        let limits = StackLimits {
            default: 10,
            kinds: HashMap::from([("wood".to_string(), 50)]),
        };
        Chest::new("piece_chest_wood", Position::default(), slots, Arc::new(limits))
    }

    #[test]
    fn add_tops_up_partial_stacks_first() {
        let mut c = chest(3);
        c.insert(Item::new("wood", 45)).unwrap();

        assert!(c.add(&Item::new("wood", 20)).unwrap());
        let stacks: Vec<_> = c.items().map(|i| i.count).collect();
        assert_eq!(stacks, vec![50, 15]);
        assert_eq!(c.empty_slots().unwrap(), 1);
    }

    #[test]
    fn can_add_counts_partial_and_free_slots() {
        let mut c = chest(2);
        c.insert(Item::new("stone", 7)).unwrap();

        assert!(c.can_add(&Item::new("stone", 13)).unwrap());
        assert!(!c.can_add(&Item::new("stone", 14)).unwrap());
        assert!(c.can_add(&Item::new("wood", 50)).unwrap());
        assert!(!c.can_add(&Item::new("wood", 51)).unwrap());
    }

    #[test]
    fn add_refuses_what_does_not_fit() {
        let mut c = chest(1);
        assert!(!c.add(&Item::new("stone", 11)).unwrap());
        assert_eq!(c.items().count(), 0);
    }

    #[test]
    fn destroyed_chest_errors() {
        let mut c = chest(1);
        c.mark_destroyed();
        assert!(matches!(c.contents(), Err(ContainerError::Destroyed(_))));
        assert!(c.add(&Item::new("stone", 1)).is_err());
    }
}
