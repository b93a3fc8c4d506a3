//! Byproduct gas released by the reaction.

use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;
use crate::gas::{Gas, GasMixture, T0C};

/// Moles released back into the ambient mixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProducedGas {
    pub plasma: f32,
    pub oxygen: f32,
}

impl ProducedGas {
    pub fn is_empty(&self) -> bool {
        self.plasma <= 0.0 && self.oxygen <= 0.0
    }

    /// Add the byproducts to a mixture.
    pub fn merge_into(&self, mixture: &mut GasMixture) {
        mixture.adjust_moles(Gas::Plasma, self.plasma);
        mixture.adjust_moles(Gas::Oxygen, self.oxygen);
    }
}

/// Byproducts for a reaction step.
///
/// `temperature` is the post-reaction ambient temperature in kelvin.
pub fn compute_byproducts(
    energy: f32,
    temperature: f32,
    heat_modifier: f32,
    config: &ReactorConfig,
) -> ProducedGas {
    let plasma = (energy * heat_modifier / config.plasma_release_modifier).max(0.0);
    let oxygen =
        ((energy + temperature * heat_modifier - T0C) / config.oxygen_release_modifier).max(0.0);
    ProducedGas { plasma, oxygen }
}
