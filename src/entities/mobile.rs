use std::collections::BTreeMap;

use crate::entities::item::EntityId;
use crate::entities::layer::Layer;
use crate::world::position::Position;

/// Game-assigned alignment class, wire values 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Notoriety {
    Innocent,
    GuildAlly,
    Hostile,
    Criminal,
    Enemy,
    Murderer,
    Invulnerable,
}

impl Notoriety {
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Notoriety::Innocent),
            2 => Some(Notoriety::GuildAlly),
            3 => Some(Notoriety::Hostile),
            4 => Some(Notoriety::Criminal),
            5 => Some(Notoriety::Enemy),
            6 => Some(Notoriety::Murderer),
            7 => Some(Notoriety::Invulnerable),
            _ => None,
        }
    }

    pub fn wire(self) -> u8 {
        match self {
            Notoriety::Innocent => 1,
            Notoriety::GuildAlly => 2,
            Notoriety::Hostile => 3,
            Notoriety::Criminal => 4,
            Notoriety::Enemy => 5,
            Notoriety::Murderer => 6,
            Notoriety::Invulnerable => 7,
        }
    }

    /// Script-facing token, as reported by the `noto` expression.
    pub fn token(self) -> &'static str {
        match self {
            Notoriety::Innocent => "innocent",
            Notoriety::GuildAlly => "friend",
            Notoriety::Hostile => "hostile",
            Notoriety::Criminal => "criminal",
            Notoriety::Enemy => "enemy",
            Notoriety::Murderer => "murderer",
            Notoriety::Invulnerable => "invulnerable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mobile {
    pub id: EntityId,
    pub body: u16,
    pub hue: u16,
    pub name: String,
    pub position: Position,
    pub notoriety: Notoriety,
    pub is_human: bool,
    pub is_ghost: bool,
    pub dead: bool,
    pub can_rename: bool,
    pub equipment: BTreeMap<Layer, EntityId>,
}

impl Mobile {
    pub fn new(id: EntityId, body: u16) -> Self {
        Self {
            id,
            body,
            hue: 0,
            name: String::new(),
            position: Position::default(),
            notoriety: Notoriety::Innocent,
            is_human: false,
            is_ghost: false,
            dead: false,
            can_rename: false,
            equipment: BTreeMap::new(),
        }
    }

    pub fn item_on_layer(&self, layer: Layer) -> EntityId {
        self.equipment.get(&layer).copied().unwrap_or(EntityId::ZERO)
    }
}
