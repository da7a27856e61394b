use std::collections::BTreeMap;

use crate::entities::item::EntityId;
use crate::entities::layer::Layer;
use crate::world::position::Position;

/// A generic dialog window the server has put up, reduced to the text
/// lines scripts can search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gump {
    pub lines: Vec<String>,
}

impl Gump {
    pub fn contains_text(&self, text: &str) -> bool {
        let needle = text.to_ascii_lowercase();
        self.lines
            .iter()
            .any(|line| line.to_ascii_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub backpack: EntityId,
    pub followers: i32,
    pub weight: i32,
    pub max_weight: i32,
    pub hits: i32,
    pub hits_max: i32,
    pub stam: i32,
    pub stam_max: i32,
    pub mana: i32,
    pub mana_max: i32,
    pub warmode: bool,
    pub paralyzed: bool,
    pub blessed: bool,
    pub dead: bool,
    pub is_ghost: bool,
    pub equipment: BTreeMap<Layer, EntityId>,
    pub gumps: BTreeMap<u32, Gump>,
}

impl Player {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            position: Position::default(),
            backpack: EntityId::ZERO,
            followers: 0,
            weight: 0,
            max_weight: 0,
            hits: 0,
            hits_max: 0,
            stam: 0,
            stam_max: 0,
            mana: 0,
            mana_max: 0,
            warmode: false,
            paralyzed: false,
            blessed: false,
            dead: false,
            is_ghost: false,
            equipment: BTreeMap::new(),
            gumps: BTreeMap::new(),
        }
    }

    pub fn any_gump_contains(&self, text: &str) -> bool {
        self.gumps.values().any(|gump| gump.contains_text(text))
    }
}
