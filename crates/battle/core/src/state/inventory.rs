use super::Item;
use crate::config::BattleConfig;

/// Result of offering an item to a bounded inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PickupOutcome {
    PickedUp(Item),
    /// The inventory was full; the item is gone.
    Discarded(Item),
}

impl PickupOutcome {
    pub fn item(&self) -> &Item {
        match self {
            Self::PickedUp(item) | Self::Discarded(item) => item,
        }
    }

    pub fn is_picked_up(&self) -> bool {
        matches!(self, Self::PickedUp(_))
    }
}

/// Bounded list of carried items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
    capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Adds the item if there is room; otherwise reports it as discarded.
    pub fn offer(&mut self, item: Item) -> PickupOutcome {
        if self.is_full() {
            PickupOutcome::Discarded(item)
        } else {
            self.items.push(item.clone());
            PickupOutcome::PickedUp(item)
        }
    }

    /// Removes and returns the item at `index`.
    pub fn take(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.offer(item);
        self
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(BattleConfig::DEFAULT_INVENTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_inventory_discards() {
        let mut inventory = Inventory::new(1);
        let first = inventory.offer(Item::consumable("Potion", 20, 0));
        let second = inventory.offer(Item::consumable("Elixir", 50, 10));

        assert!(first.is_picked_up());
        assert_eq!(second, PickupOutcome::Discarded(Item::consumable("Elixir", 50, 10)));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn take_out_of_range_is_none() {
        let mut inventory = Inventory::default().with_item(Item::consumable("Potion", 20, 0));
        assert!(inventory.take(3).is_none());
        assert_eq!(inventory.take(0).map(|item| item.name), Some("Potion".to_string()));
        assert!(inventory.is_empty());
    }
}
