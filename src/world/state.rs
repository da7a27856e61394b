use std::collections::HashMap;

use crate::entities::item::{EntityId, Item};
use crate::entities::mobile::Mobile;
use crate::entities::player::Player;

/// Read-only snapshot of the synchronized game world. The host keeps it
/// current; the scripting core only queries it.
#[derive(Debug, Default)]
pub struct World {
    items: HashMap<EntityId, Item>,
    mobiles: HashMap<EntityId, Mobile>,
    player: Option<Player>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    pub fn insert_mobile(&mut self, mobile: Mobile) {
        self.mobiles.insert(mobile.id, mobile);
    }

    pub fn remove_item(&mut self, id: EntityId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn remove_mobile(&mut self, id: EntityId) -> Option<Mobile> {
        self.mobiles.remove(&id)
    }

    pub fn set_player(&mut self, player: Player) {
        self.player = Some(player);
    }

    pub fn item(&self, id: EntityId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn mobile(&self, id: EntityId) -> Option<&Mobile> {
        self.mobiles.get(&id)
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn mobiles(&self) -> impl Iterator<Item = &Mobile> {
        self.mobiles.values()
    }

    pub fn items_by_graphic(&self, graphic: u16) -> Vec<&Item> {
        self.items
            .values()
            .filter(|item| item.graphic == graphic)
            .collect()
    }

    /// Case-insensitive substring match on item names.
    pub fn items_by_name(&self, name: &str) -> Vec<&Item> {
        let needle = name.to_ascii_lowercase();
        self.items
            .values()
            .filter(|item| item.name.to_ascii_lowercase().contains(&needle))
            .collect()
    }

    pub fn mobiles_by_name(&self, name: &str) -> Vec<&Mobile> {
        let needle = name.to_ascii_lowercase();
        self.mobiles
            .values()
            .filter(|mobile| mobile.name.to_ascii_lowercase().contains(&needle))
            .collect()
    }

    pub fn mobiles_in_range(&self, range: i32) -> Vec<&Mobile> {
        let Some(player) = self.player.as_ref() else {
            return Vec::new();
        };
        self.mobiles
            .values()
            .filter(|mobile| player.position.in_range(mobile.position, range))
            .collect()
    }
}
