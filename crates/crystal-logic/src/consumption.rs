//! Matter touching the crystal is annihilated and feeds its power.

use serde::{Deserialize, Serialize};

use crate::events::ReactorEvent;
use crate::state::ReactorState;

/// Power gained from matter with nothing better to offer.
pub const FALLBACK_POWER_GAIN: f32 = 1.0;

/// What the crystal can tell about an entity within reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatterTraits {
    pub body: bool,
    pub item: bool,
    pub projectile_bolt: bool,
    pub ash: bool,
    pub in_container: bool,
    pub ghost: bool,
    pub under_floor: bool,
    pub food_energy: Option<f32>,
    /// Total damage carried by a projectile.
    pub projectile_damage: Option<f32>,
}

impl MatterTraits {
    pub fn is_destructible(&self) -> bool {
        (self.body || self.item || self.projectile_bolt)
            && !self.ash
            && !self.in_container
            && !self.ghost
            && !self.under_floor
    }

    /// Power released when this matter is consumed.
    pub fn power_gain(&self) -> f32 {
        self.food_energy
            .or(self.projectile_damage)
            .unwrap_or(FALLBACK_POWER_GAIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatterCandidate {
    /// Opaque entity handle, echoed back in the event.
    pub id: u64,
    pub traits: MatterTraits,
}

/// Consume every destructible candidate, raising power for each.
pub fn consume_matter(state: &mut ReactorState, candidates: &[MatterCandidate]) -> Vec<ReactorEvent> {
    candidates
        .iter()
        .filter(|c| c.traits.is_destructible())
        .map(|c| {
            let power_gain = c.traits.power_gain();
            state.power += power_gain;
            ReactorEvent::EntityConsumed {
                entity: c.id,
                power_gain,
            }
        })
        .collect()
}
