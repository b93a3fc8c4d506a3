//! Lightning discharge planning.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ReactorConfig;

/// Chance of a stray bolt on any atmos cycle.
pub const STRAY_BOLT_CHANCE: f64 = 0.05;

/// Bolts to fire this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZapPlan {
    pub count: u32,
    /// 0 = regular, 1 = charged, 2 = supercharged.
    pub tier: u8,
    /// Search radius in tiles.
    pub range: u32,
}

/// Decide how many bolts the crystal throws at its current power.
///
/// Returns `None` when nothing is fired.
pub fn plan_discharge<R: Rng + ?Sized>(
    power: f32,
    config: &ReactorConfig,
    rng: &mut R,
) -> Option<ZapPlan> {
    let mut count = 0;
    let mut tier = 0;

    if rng.gen_bool(STRAY_BOLT_CHANCE) {
        count += 1;
    }
    if power >= config.power_penalty_threshold {
        count += 2;
    }
    if power >= config.severe_power_penalty_threshold {
        count += 1;
        tier += 1;
    }
    if power >= config.critical_power_penalty_threshold {
        count += 1;
        tier += 1;
    }

    if count == 0 {
        return None;
    }

    let range = (power / 1000.0).clamp(2.0, 7.0) as u32;
    Some(ZapPlan { count, tier, range })
}
