#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Tile distance on the surface plane (Chebyshev metric).
    pub fn distance(self, other: Position) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }

    pub fn in_range(self, other: Position, range: i32) -> bool {
        self.distance(other) <= range
    }
}
