//! Mutable per-crystal simulation state.

use serde::{Deserialize, Serialize};

use crate::audio::AmbientSound;
use crate::config::ReactorConfig;
use crate::delamination::Delamination;
use crate::gas::GasArray;
use crate::status::ReactorStatus;
use crate::timer::PeriodicTimer;

/// Maximum power after a decay step.
pub const POWER_HARD_CAP: f32 = 10_000.0;

/// Sub-tick throttles of a single crystal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorTimers {
    /// Gas exchange, power and byproducts.
    pub atmos: PeriodicTimer,
    /// Damage evaluation.
    pub damage: PeriodicTimer,
    /// Integrity announcements.
    pub yell: PeriodicTimer,
}

impl ReactorTimers {
    /// Atmos and damage start due so a fresh crystal evaluates on its first tick.
    pub fn new(config: &ReactorConfig) -> Self {
        Self {
            atmos: PeriodicTimer::primed(config.atmos_interval),
            damage: PeriodicTimer::primed(config.damage_interval),
            yell: PeriodicTimer::primed(config.yell_interval),
        }
    }
}

impl Default for ReactorTimers {
    fn default() -> Self {
        Self::new(&ReactorConfig::default())
    }
}

/// State of one crystal entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorState {
    /// Internal energy. Never negative; at most [`POWER_HARD_CAP`] after decay.
    pub power: f32,
    /// Externally tracked damage, snapshotted at the start of each damage cycle.
    pub damage_archived: f32,
    /// Damage after this cycle's change was applied.
    pub damage: f32,
    /// Mole fraction of each species from the last exchange cycle.
    pub gas_composition: GasArray,
    pub gasmix_power_ratio: f32,
    pub dynamic_heat_modifier: f32,
    pub power_transmission_bonus: f32,
    pub dynamic_heat_resistance: f32,
    pub powerloss_dynamic_scaling: f32,
    pub powerloss_inhibitor: f32,
    /// Heat damage multiplier from absorbed moles.
    pub mole_heat_penalty_threshold: f32,
    /// Pacification from soothers nearby, in [0, 1].
    pub psy_coefficient: f32,
    /// Total moles seen by the last exchange cycle.
    pub last_moles: f32,
    pub status: ReactorStatus,
    pub final_countdown: bool,
    /// Loop last handed to the audio collaborator.
    pub ambient: Option<AmbientSound>,
    /// Seconds since the last accent sound.
    pub since_accent: f32,
    pub timers: ReactorTimers,
    pub delamination: Delamination,
}

impl ReactorState {
    pub fn new(config: &ReactorConfig) -> Self {
        Self {
            power: 0.0,
            damage_archived: 0.0,
            damage: 0.0,
            gas_composition: GasArray::default(),
            gasmix_power_ratio: 0.0,
            dynamic_heat_modifier: 1.0,
            power_transmission_bonus: 0.0,
            dynamic_heat_resistance: 1.0,
            powerloss_dynamic_scaling: 0.0,
            powerloss_inhibitor: 1.0,
            mole_heat_penalty_threshold: 0.25,
            psy_coefficient: 0.0,
            last_moles: 0.0,
            status: ReactorStatus::Inactive,
            final_countdown: false,
            ambient: None,
            since_accent: 0.0,
            timers: ReactorTimers::new(config),
            delamination: Delamination::new(config),
        }
    }

    /// Integrity in percent, 100 when undamaged.
    pub fn integrity(&self, config: &ReactorConfig) -> f32 {
        crate::integrity::integrity_percent(self.damage, config.explosion_point)
    }
}

impl Default for ReactorState {
    fn default() -> Self {
        Self::new(&ReactorConfig::default())
    }
}
