//! Power accumulation, radiation output, reaction heat and power decay.

use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;
use crate::gas::T0C;
use crate::state::{ReactorState, POWER_HARD_CAP};

/// Result of one reaction step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionStep {
    /// Reaction energy driving heat and byproducts.
    pub energy: f32,
    /// Ambient temperature after reaction heat, clamped.
    pub temperature: f32,
    /// Radiation pulse magnitude.
    pub radiation: f32,
}

/// Temperature sensitivity of power gain for a given power ratio.
pub fn temperature_factor(gasmix_power_ratio: f32) -> f32 {
    if gasmix_power_ratio > 0.8 {
        50.0
    } else {
        30.0
    }
}

/// Integrate ambient temperature into power and compute reaction output.
///
/// `temperature` is the ambient mixture temperature in kelvin.
pub fn react(state: &mut ReactorState, config: &ReactorConfig, temperature: f32) -> ReactionStep {
    let factor = temperature_factor(state.gasmix_power_ratio);
    state.power = (temperature * factor / T0C * state.gasmix_power_ratio + state.power).max(0.0);

    let radiation = state.power * (1.0 + state.power_transmission_bonus / 10.0).max(0.0);

    let energy = state.power * config.reaction_power_modifier * (1.0 - state.psy_coefficient * 0.2);

    let heat_modifier = state.dynamic_heat_modifier;
    let heated = temperature + energy * heat_modifier / config.thermal_release_modifier;
    let temperature = heated.clamp(0.0, 2500.0 * heat_modifier);

    ReactionStep {
        energy,
        temperature,
        radiation,
    }
}

/// Power lost this cycle, before clamping.
pub fn power_loss(power: f32, inhibitor: f32, psy_coefficient: f32) -> f32 {
    let cubic = (power / 500.0).powi(3) * inhibitor;
    let linear = power * 0.83 * inhibitor;
    cubic.min(linear) * (1.0 - 0.2 * psy_coefficient)
}

/// Apply end-of-cycle power decay; result is within `[0, POWER_HARD_CAP]`.
pub fn decay_power(state: &mut ReactorState) {
    let loss = power_loss(state.power, state.powerloss_inhibitor, state.psy_coefficient);
    state.power = (state.power - loss).clamp(0.0, POWER_HARD_CAP);
}
