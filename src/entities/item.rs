use crate::world::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    pub const ZERO: EntityId = EntityId(0);

    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Where an item currently sits. A mobile is always the top of a
/// containment chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    None,
    Item(EntityId),
    Mobile(EntityId),
}

impl Containment {
    pub fn is_none(self) -> bool {
        matches!(self, Containment::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: EntityId,
    pub graphic: u16,
    pub hue: u16,
    /// Stack size. Non-stackable items report 0.
    pub amount: u16,
    pub name: String,
    pub position: Position,
    pub container: Containment,
    pub is_corpse: bool,
}

impl Item {
    pub fn new(id: EntityId, graphic: u16) -> Self {
        Self {
            id,
            graphic,
            hue: 0,
            amount: 0,
            name: String::new(),
            position: Position::default(),
            container: Containment::None,
            is_corpse: false,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.container.is_none()
    }
}
