use crate::item::Item;
use crate::types::{Position, SlotPos};
use serde::Serialize;

/// Grid inventory of the acting entity.
pub trait Inventory {
    /// Grid size as (width, height)
    fn dimensions(&self) -> (usize, usize);

    fn item_at(&self, slot: SlotPos) -> Option<&Item>;

    /// Take the stack out of the live inventory
    fn remove_at(&mut self, slot: SlotPos) -> Option<Item>;
}

/// The entity that pressed "stash".
pub trait Actor {
    fn position(&self) -> Position;

    fn inventory(&self) -> &dyn Inventory;

    fn inventory_mut(&mut self) -> &mut dyn Inventory;
}

/// Why a slot was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Part of the protected prefix of the first row (hotbar)
    ExcludedSlot,
    /// Item is currently equipped
    Equipped,
}

#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    pub slot: SlotPos,
    pub item: Item,
    pub skip: Option<SkipReason>,
}

impl SnapshotEntry {
    pub fn is_eligible(&self) -> bool {
        self.skip.is_none()
    }
}

/// Occupied slots of an inventory at the start of a run, in row-major order.
///
/// Items are copied for decision making only. Removal always goes back to the live inventory
/// through the slot address.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    entries: Vec<SnapshotEntry>,
}

impl InventorySnapshot {
    pub fn capture(inventory: &dyn Inventory, excluded_slots: usize) -> Self {
        let (width, height) = inventory.dimensions();
        let mut entries = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let slot = SlotPos::new(x, y);
                let Some(item) = inventory.item_at(slot) else {
                    continue;
                };

                entries.push(SnapshotEntry {
                    slot,
                    item: item.clone(),
                    skip: skip_reason(slot, item, excluded_slots),
                });
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn eligible(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.iter().filter(|e| e.is_eligible())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Slots `0..=excluded_slots` of the first row are protected.
pub fn is_excluded(slot: SlotPos, excluded_slots: usize) -> bool {
    slot.y == 0 && slot.x <= excluded_slots
}

fn skip_reason(slot: SlotPos, item: &Item, excluded_slots: usize) -> Option<SkipReason> {
    if is_excluded(slot, excluded_slots) {
        Some(SkipReason::ExcludedSlot)
    } else if item.equipped {
        Some(SkipReason::Equipped)
    } else {
        None
    }
}
