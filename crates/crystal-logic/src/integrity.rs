//! Structural damage accumulation, integrity, and integrity announcements.

use crate::config::ReactorConfig;
use crate::events::{Announcement, AnnouncementKind};
use crate::gas::GasMixture;
use crate::state::ReactorState;
use crate::status::ReactorStatus;

/// Most healing a single damage cycle can apply.
pub const MAX_HEALING: f32 = 2.0;
/// Extra safe temperature granted by a fully soothed crystal, in kelvin.
pub const PSY_HEAT_ALLOWANCE: f32 = 45.0;

/// What the crystal sees around it during a damage cycle.
#[derive(Debug, Clone, Copy)]
pub struct DamageEnvironment<'a> {
    /// Whether the crystal sits on a grid. Off-grid counts as space.
    pub on_grid: bool,
    pub mixture: Option<&'a GasMixture>,
    /// Any neighbouring tile holds no gas at all.
    pub adjacent_vacuum: bool,
}

/// Integrity in percent: 100 undamaged, 0 at or beyond the explosion point.
pub fn integrity_percent(damage: f32, explosion_point: f32) -> f32 {
    if explosion_point <= 0.0 {
        return 0.0;
    }
    (100.0 * (1.0 - damage / explosion_point)).round().clamp(0.0, 100.0)
}

/// Power-to-damage coefficient for space exposure at a given integrity.
pub fn space_exposure_factor(integrity: f32) -> f32 {
    if integrity < 10.0 {
        0.0005
    } else if integrity < 25.0 {
        0.0009
    } else if integrity < 45.0 {
        0.005
    } else if integrity < 75.0 {
        0.002
    } else {
        0.0
    }
}

/// Damage taken this cycle, after the per-cycle cap.
///
/// Reads `damage_archived`, `power` and the cached composition coefficients.
/// The result never drives total damage below zero.
pub fn compute_damage_delta(
    state: &ReactorState,
    config: &ReactorConfig,
    env: &DamageEnvironment<'_>,
) -> f32 {
    let archived = state.damage_archived;
    let multiplier = config.damage_increase_multiplier;

    let total = match env.mixture {
        Some(mix) if env.on_grid && !mix.is_vacuum() => {
            atmosphere_damage(state, config, mix) + space_exposure_damage(state, config, env)
        }
        _ => (state.power / 1000.0 * multiplier).max(0.1),
    };

    let capped = total.min(config.damage_cap());
    capped.max(-archived)
}

fn atmosphere_damage(state: &ReactorState, config: &ReactorConfig, mix: &GasMixture) -> f32 {
    let multiplier = config.damage_increase_multiplier;
    let moles = mix.total_moles();
    let temperature = mix.temperature;

    let mole_clamp = (moles / 200.0).clamp(0.5, 1.0);
    let heat_floor = config.heat_threshold_kelvin() * state.dynamic_heat_resistance;

    let heat = (mole_clamp * temperature - heat_floor).max(0.0) * state.mole_heat_penalty_threshold
        / 150.0
        * multiplier;
    let power = (state.power - config.power_penalty_threshold).max(0.0) / 500.0 * multiplier;
    let mole = (moles - config.mole_penalty_threshold).max(0.0) / 80.0 * multiplier;

    let mut total = heat + power + mole;

    if moles < config.mole_penalty_threshold {
        let heal_cap = config.heat_threshold_kelvin() + PSY_HEAT_ALLOWANCE * state.psy_coefficient;
        let healing = ((temperature - heal_cap).min(0.0) / 150.0).max(-MAX_HEALING);
        total += healing;
    }

    total
}

fn space_exposure_damage(
    state: &ReactorState,
    config: &ReactorConfig,
    env: &DamageEnvironment<'_>,
) -> f32 {
    if !env.adjacent_vacuum {
        return 0.0;
    }
    let integrity = integrity_percent(state.damage_archived, config.explosion_point);
    let factor = space_exposure_factor(integrity);
    (state.power * factor * config.damage_increase_multiplier)
        .clamp(0.0, config.max_space_exposure_damage)
}

/// Integrity messages due this yell cycle, most severe first.
///
/// Only healing is reported once damage reaches the explosion point or a
/// countdown is running; the countdown takes over warnings there.
pub fn damage_announcements(state: &ReactorState, config: &ReactorConfig) -> Vec<Announcement> {
    let damage = state.damage;
    let mut out = Vec::new();

    if damage > config.explosion_point || damage <= 0.0 {
        return out;
    }

    let integrity = state.integrity(config);

    if damage < state.damage_archived && state.status >= ReactorStatus::Warning {
        let text = format!("Crystalline hyperstructure returning to safe operating parameters. Integrity: {integrity}%.");
        out.push(if state.status >= ReactorStatus::Emergency {
            Announcement::station(AnnouncementKind::Healing, text)
        } else {
            Announcement::local(AnnouncementKind::Healing, text)
        });
        return out;
    }

    // the countdown does its own talking
    if state.final_countdown || damage >= config.explosion_point {
        return out;
    }

    if damage >= config.emergency_point {
        out.push(Announcement::station(
            AnnouncementKind::Emergency,
            format!("CRYSTAL DELAMINATION IMMINENT. Integrity: {integrity}%."),
        ));
    } else if damage >= config.warning_point {
        out.push(Announcement::local(
            AnnouncementKind::Warning,
            format!("Danger! Crystal hyperstructure integrity faltering! Integrity: {integrity}%."),
        ));
    } else {
        return out;
    }

    if state.power >= config.power_penalty_threshold {
        out.push(Announcement::local(
            AnnouncementKind::PowerThreshold,
            "Warning: Hyperstructure has reached dangerous power level.",
        ));
        if state.powerloss_inhibitor < 0.5 {
            out.push(Announcement::local(
                AnnouncementKind::PowerlossThreshold,
                "DANGER: CHARGE INERTIA CHAIN REACTION IN PROGRESS.",
            ));
        }
    }

    if state.last_moles >= config.mole_penalty_threshold {
        out.push(Announcement::local(
            AnnouncementKind::MoleThreshold,
            "Warning: Critical coolant mass reached.",
        ));
    }

    out
}
