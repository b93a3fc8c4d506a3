//! Per-prototype reactor tuning.
//!
//! Every threshold and release modifier the simulation consults lives in
//! [`ReactorConfig`]. Values deserialize from JSON with every field
//! optional, so a prototype only names what it overrides.
//!
//! ```
//! use crystal_logic::config::{validate_config, ReactorConfig};
//!
//! let config = ReactorConfig::from_json(r#"{ "explosion_point": 1200.0 }"#).unwrap();
//! assert_eq!(config.explosion_point, 1200.0);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable thresholds and modifiers for one crystal prototype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    // Damage thresholds
    /// Damage at which local warnings start.
    pub warning_point: f32,
    /// Damage at which the crystal is reported as dangerous.
    pub danger_point: f32,
    /// Damage at which warnings become station-wide.
    pub emergency_point: f32,
    /// Damage at which the delamination countdown starts.
    pub explosion_point: f32,

    // Heat
    /// Safe operating temperature in °C above 0 °C.
    pub heat_penalty_threshold: f32,
    /// Divisor turning absorbed moles into the heat damage multiplier.
    pub mole_heat_penalty: f32,

    // Power and moles
    pub power_penalty_threshold: f32,
    pub severe_power_penalty_threshold: f32,
    pub critical_power_penalty_threshold: f32,
    /// Above: mole damage and singularity delamination. Below: healing.
    pub mole_penalty_threshold: f32,

    // Powerloss inhibition
    pub powerloss_inhibition_mole_threshold: f32,
    pub powerloss_inhibition_gas_threshold: f32,
    pub powerloss_inhibition_mole_boost_threshold: f32,

    // Damage scaling
    pub max_space_exposure_damage: f32,
    pub damage_increase_multiplier: f32,
    /// Multiplied by `explosion_point` to cap damage taken per cycle.
    pub damage_hardcap: f32,

    // Reaction output
    pub reaction_power_modifier: f32,
    pub thermal_release_modifier: f32,
    pub plasma_release_modifier: f32,
    pub oxygen_release_modifier: f32,
    pub radiation_range: f32,

    // Timing (seconds)
    pub atmos_interval: f32,
    pub damage_interval: f32,
    pub yell_interval: f32,
    pub delam_duration: f32,
    /// Remaining countdown seconds at which the alarm starts.
    pub alarm_threshold: f32,

    // Proximity (meters)
    pub consume_radius: f32,
    pub soother_range: f32,

    // Explosion yield on a thin-gas delamination
    pub explosion_light: f32,
    pub explosion_heavy: f32,
    pub explosion_devastation: f32,
    pub explosion_radius: f32,

    // Anomalies: one-in-N chances per atmos cycle
    pub anomaly_bluespace_chance: f32,
    pub anomaly_gravity_chance: f32,
    /// Used instead while power is above the severe threshold.
    pub anomaly_gravity_chance_severe: f32,
    /// Only rolled above the power penalty threshold.
    pub anomaly_pyro_chance: f32,
    pub anomaly_pyro_chance_severe: f32,
    /// Seconds before a spawned anomaly vanishes.
    pub anomaly_lifetime: f32,
    /// Spawn ring around the crystal, in meters.
    pub anomaly_spawn_min_range: f32,
    pub anomaly_spawn_max_range: f32,

    /// Shortest gap between two accent sounds, in seconds.
    pub accent_min_cooldown: f32,

    // Prototypes spawned by the reactor
    pub ash_prototype: String,
    pub singularity_prototype: String,
    pub anomaly_bluespace_prototype: String,
    pub anomaly_gravity_prototype: String,
    pub anomaly_pyroclastic_prototype: String,

    // Sounds
    pub alarm_sound: String,
    pub calm_loop_sound: String,
    pub delam_loop_sound: String,
    pub calm_accent_sound: String,
    pub delam_accent_sound: String,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            warning_point: 50.0,
            danger_point: 300.0,
            emergency_point: 500.0,
            explosion_point: 900.0,
            heat_penalty_threshold: 40.0,
            mole_heat_penalty: 350.0,
            power_penalty_threshold: 5000.0,
            severe_power_penalty_threshold: 7000.0,
            critical_power_penalty_threshold: 9000.0,
            mole_penalty_threshold: 1800.0,
            powerloss_inhibition_mole_threshold: 20.0,
            powerloss_inhibition_gas_threshold: 0.2,
            powerloss_inhibition_mole_boost_threshold: 500.0,
            max_space_exposure_damage: 2.0,
            damage_increase_multiplier: 0.25,
            damage_hardcap: 0.002,
            reaction_power_modifier: 0.55,
            thermal_release_modifier: 5.0,
            plasma_release_modifier: 750.0,
            oxygen_release_modifier: 325.0,
            radiation_range: 10.0,
            atmos_interval: 0.5,
            damage_interval: 1.0,
            yell_interval: 60.0,
            delam_duration: 30.0,
            alarm_threshold: 13.0,
            consume_radius: 0.5,
            soother_range: 20.0,
            explosion_light: 20.0,
            explosion_heavy: 10.0,
            explosion_devastation: 5.0,
            explosion_radius: 15.0,
            anomaly_bluespace_chance: 150.0,
            anomaly_gravity_chance: 750.0,
            anomaly_gravity_chance_severe: 150.0,
            anomaly_pyro_chance: 2500.0,
            anomaly_pyro_chance_severe: 375.0,
            anomaly_lifetime: 60.0,
            anomaly_spawn_min_range: 5.0,
            anomaly_spawn_max_range: 10.0,
            accent_min_cooldown: 2.0,
            ash_prototype: "Ash".to_string(),
            singularity_prototype: "Singularity".to_string(),
            anomaly_bluespace_prototype: "AnomalyBluespace".to_string(),
            anomaly_gravity_prototype: "AnomalyGravity".to_string(),
            anomaly_pyroclastic_prototype: "AnomalyPyroclastic".to_string(),
            alarm_sound: "/Audio/Machines/alarm.ogg".to_string(),
            calm_loop_sound: "/Audio/Crystal/calm.ogg".to_string(),
            delam_loop_sound: "/Audio/Crystal/delamming.ogg".to_string(),
            calm_accent_sound: "CrystalAccentNormal".to_string(),
            delam_accent_sound: "CrystalAccentDelam".to_string(),
        }
    }
}

impl ReactorConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: ReactorConfig = serde_json::from_str(json)?;
        let errors = validate_config(&config);
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigLoadError::Invalid(errors))
        }
    }

    /// Per-cycle damage ceiling.
    pub fn damage_cap(&self) -> f32 {
        self.damage_hardcap * self.explosion_point
    }

    /// Heat penalty threshold in kelvin.
    pub fn heat_threshold_kelvin(&self) -> f32 {
        crate::gas::T0C + self.heat_penalty_threshold
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("damage thresholds must increase: warning {warning} < danger {danger} < emergency {emergency} < explosion {explosion}")]
    ThresholdOrder {
        warning: f32,
        danger: f32,
        emergency: f32,
        explosion: f32,
    },
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must be within [0, 1]")]
    NotFraction(&'static str),
    #[error("alarm threshold {alarm}s exceeds countdown duration {duration}s")]
    AlarmAfterCountdown { alarm: f32, duration: f32 },
    #[error("{0} is a one-in-N chance and must be at least 1")]
    NotOneInN(&'static str),
    #[error("anomaly spawn ring is empty: min {min} > max {max}")]
    AnomalyRing { min: f32, max: f32 },
}

/// Failure to load a configuration document.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("malformed reactor config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid reactor config: {}", format_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn format_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a reactor configuration, returning all errors found.
pub fn validate_config(config: &ReactorConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let ordered = config.warning_point < config.danger_point
        && config.danger_point < config.emergency_point
        && config.emergency_point < config.explosion_point;
    if !ordered {
        errors.push(ConfigError::ThresholdOrder {
            warning: config.warning_point,
            danger: config.danger_point,
            emergency: config.emergency_point,
            explosion: config.explosion_point,
        });
    }

    // Divisors and periods
    let positive = [
        ("explosion_point", config.explosion_point),
        ("mole_heat_penalty", config.mole_heat_penalty),
        (
            "powerloss_inhibition_mole_boost_threshold",
            config.powerloss_inhibition_mole_boost_threshold,
        ),
        ("thermal_release_modifier", config.thermal_release_modifier),
        ("plasma_release_modifier", config.plasma_release_modifier),
        ("oxygen_release_modifier", config.oxygen_release_modifier),
        ("atmos_interval", config.atmos_interval),
        ("damage_interval", config.damage_interval),
        ("yell_interval", config.yell_interval),
        ("delam_duration", config.delam_duration),
        ("consume_radius", config.consume_radius),
    ];
    for (name, value) in positive {
        if !(value > 0.0) {
            errors.push(ConfigError::NotPositive(name));
        }
    }

    if !(0.0..=1.0).contains(&config.powerloss_inhibition_gas_threshold) {
        errors.push(ConfigError::NotFraction("powerloss_inhibition_gas_threshold"));
    }

    let chances = [
        ("anomaly_bluespace_chance", config.anomaly_bluespace_chance),
        ("anomaly_gravity_chance", config.anomaly_gravity_chance),
        ("anomaly_gravity_chance_severe", config.anomaly_gravity_chance_severe),
        ("anomaly_pyro_chance", config.anomaly_pyro_chance),
        ("anomaly_pyro_chance_severe", config.anomaly_pyro_chance_severe),
    ];
    for (name, value) in chances {
        if !(value >= 1.0) {
            errors.push(ConfigError::NotOneInN(name));
        }
    }

    if config.anomaly_spawn_min_range > config.anomaly_spawn_max_range {
        errors.push(ConfigError::AnomalyRing {
            min: config.anomaly_spawn_min_range,
            max: config.anomaly_spawn_max_range,
        });
    }

    if config.alarm_threshold > config.delam_duration {
        errors.push(ConfigError::AlarmAfterCountdown {
            alarm: config.alarm_threshold,
            duration: config.delam_duration,
        });
    }

    errors
}
