//! Short-lived anomalies thrown off by a charged crystal.
//!
//! Each kind has a one-in-N chance per atmos cycle; gravity and pyroclastic
//! anomalies get likelier as power crosses the penalty thresholds.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyKind {
    Bluespace,
    Gravity,
    Pyroclastic,
}

impl AnomalyKind {
    /// Prototype spawned for this kind.
    pub fn prototype(self, config: &ReactorConfig) -> &str {
        match self {
            AnomalyKind::Bluespace => &config.anomaly_bluespace_prototype,
            AnomalyKind::Gravity => &config.anomaly_gravity_prototype,
            AnomalyKind::Pyroclastic => &config.anomaly_pyroclastic_prototype,
        }
    }
}

fn one_in<R: Rng + ?Sized>(rng: &mut R, n: f32) -> bool {
    rng.gen_bool((1.0 / n as f64).clamp(0.0, 1.0))
}

/// Roll this cycle's anomalies.
///
/// One anomaly is spawned per kind that came up, each taking its kind at
/// random from those that came up. An unpowered crystal throws nothing.
pub fn plan_anomalies<R: Rng + ?Sized>(
    power: f32,
    config: &ReactorConfig,
    rng: &mut R,
) -> Vec<AnomalyKind> {
    if power <= 0.0 {
        return Vec::new();
    }

    let severe = power > config.severe_power_penalty_threshold;
    let mut rolled = Vec::new();

    if one_in(rng, config.anomaly_bluespace_chance) {
        rolled.push(AnomalyKind::Bluespace);
    }
    if (severe && one_in(rng, config.anomaly_gravity_chance_severe))
        || one_in(rng, config.anomaly_gravity_chance)
    {
        rolled.push(AnomalyKind::Gravity);
    }
    if (severe && one_in(rng, config.anomaly_pyro_chance_severe))
        || (power > config.power_penalty_threshold && one_in(rng, config.anomaly_pyro_chance))
    {
        rolled.push(AnomalyKind::Pyroclastic);
    }

    (0..rolled.len())
        .filter_map(|_| rolled.choose(rng).copied())
        .collect()
}
