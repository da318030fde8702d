use quickstash_core::{Actor, Inventory, Item, Position, SlotPos};

/// Grid inventory, `width` slots per row
#[derive(Debug, Clone)]
pub struct GridInventory {
    width: usize,
    height: usize,
    slots: Vec<Option<Item>>,
}

impl GridInventory {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![None; width * height],
        }
    }

    fn index(&self, slot: SlotPos) -> Option<usize> {
        (slot.x < self.width && slot.y < self.height).then(|| slot.y * self.width + slot.x)
    }

    /// Place a stack, returning it back when the slot is taken or out of bounds
    pub fn put(&mut self, slot: SlotPos, item: Item) -> Result<(), Item> {
        match self.index(slot) {
            Some(i) if self.slots[i].is_none() => {
                self.slots[i] = Some(item);
                Ok(())
            }
            _ => Err(item),
        }
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotPos, &Item)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.as_ref()
                .map(|item| (SlotPos::new(i % self.width, i / self.width), item))
        })
    }
}

impl Inventory for GridInventory {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn item_at(&self, slot: SlotPos) -> Option<&Item> {
        self.index(slot).and_then(|i| self.slots[i].as_ref())
    }

    fn remove_at(&mut self, slot: SlotPos) -> Option<Item> {
        self.index(slot).and_then(|i| self.slots[i].take())
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub inventory: GridInventory,
}

impl Actor for Player {
    fn position(&self) -> Position {
        self.position
    }

    fn inventory(&self) -> &dyn Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut dyn Inventory {
        &mut self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_remove_by_slot() {
        let mut inv = GridInventory::new(8, 4);
        inv.put(SlotPos::new(3, 2), Item::new("wood", 4)).unwrap();

        assert!(inv.put(SlotPos::new(3, 2), Item::new("stone", 1)).is_err());
        assert!(inv.put(SlotPos::new(8, 0), Item::new("stone", 1)).is_err());
        assert_eq!(inv.item_at(SlotPos::new(3, 2)).map(|i| i.count), Some(4));
        assert_eq!(inv.remove_at(SlotPos::new(3, 2)), Some(Item::new("wood", 4)));
        assert_eq!(inv.occupied(), 0);
    }

    #[test]
    fn iter_reports_grid_positions() {
        let mut inv = GridInventory::new(8, 4);
        inv.put(SlotPos::new(7, 1), Item::new("resin", 2)).unwrap();

        let slots: Vec<_> = inv.iter().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![SlotPos::new(7, 1)]);
    }
}
