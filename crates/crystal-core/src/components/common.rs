//! Common components used across multiple entity types.

use serde::{Deserialize, Serialize};

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Grid id meaning "floating in space, not attached to any grid".
pub const NO_GRID: u32 = 0;

/// Where an entity is and which grid it stands on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub grid: u32,
}

impl Transform {
    pub fn new(position: Vec3, grid: u32) -> Self {
        Self { position, grid }
    }

    pub fn on_grid(&self) -> bool {
        self.grid != NO_GRID
    }

    /// Atmosphere tile containing this position.
    pub fn tile(&self) -> TilePos {
        TilePos {
            grid: self.grid,
            x: self.position.x.floor() as i32,
            y: self.position.y.floor() as i32,
        }
    }

    /// Within `range` of another transform on the same grid.
    pub fn within(&self, other: &Transform, range: f32) -> bool {
        self.grid == other.grid
            && self.position.distance_squared(&other.position) <= range * range
    }
}

/// Integer tile coordinates on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub grid: u32,
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(grid: u32, x: i32, y: i32) -> Self {
        Self { grid, x, y }
    }

    /// The eight tiles around this one.
    pub fn neighbours(&self) -> [TilePos; 8] {
        let mut out = [*self; 8];
        let mut i = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out[i] = TilePos::new(self.grid, self.x + dx, self.y + dy);
                i += 1;
            }
        }
        out
    }
}

/// Prototype an entity was spawned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prototype(pub String);
