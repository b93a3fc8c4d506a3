//! Components carried by the crystal and by whatever it interacts with.

use crystal_logic::anomaly::AnomalyKind;
use crystal_logic::config::ReactorConfig;
use crystal_logic::state::ReactorState;
use serde::{Deserialize, Serialize};

/// A reactor crystal: its tuning and its live simulation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crystal {
    pub config: ReactorConfig,
    pub state: ReactorState,
}

impl Crystal {
    pub fn new(config: ReactorConfig) -> Self {
        let state = ReactorState::new(&config);
        Self { config, state }
    }
}

/// Damage bookkeeping owned outside the reactor logic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Damageable {
    pub total: f32,
}

impl Damageable {
    /// Apply a change, never dropping below zero.
    pub fn change(&mut self, delta: f32) {
        self.total = (self.total + delta).max(0.0);
    }
}

/// Living creature with a body.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Body;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Item;

/// Energy bolt fired from a weapon.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectileBolt;

/// Any projectile, with the damage it carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub damage: f32,
}

/// Declares a fixed power yield when consumed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FoodEnergy(pub f32);

/// Inert residue of consumed matter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ash;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ghost;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InContainer;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HiddenUnderFloor;

/// Gravitational singularity left by an overmassed delamination.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Singularity;

/// Anomaly thrown off by a charged crystal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
}

/// Despawns the entity once `remaining` seconds have run out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
}

/// Someone who calms the crystal while alive and nearby.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Soother {
    pub alive: bool,
}
