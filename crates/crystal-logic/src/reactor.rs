//! One simulation tick of a crystal.
//!
//! Stage order per tick:
//!
//! 1. atmos cycle (0.5 s): gas exchange, power, radiation, byproducts,
//!    lightning, anomalies, power decay
//! 2. damage cycle (1 s): soother, damage delta, status, announcements
//! 3. sound: ambient loop every tick, accent rolls on the atmos cadence
//! 4. matter consumption (every tick)
//! 5. delamination (every tick)

use rand::Rng;

use crate::anomaly::plan_anomalies;
use crate::audio::{roll_accent, update_ambient};
use crate::config::ReactorConfig;
use crate::consumption::{consume_matter, MatterCandidate};
use crate::delamination::step_delamination;
use crate::events::ReactorEvent;
use crate::exchange::update_gas_exchange;
use crate::gas::GasMixture;
use crate::integrity::{compute_damage_delta, damage_announcements, DamageEnvironment};
use crate::power::{decay_power, react};
use crate::production::compute_byproducts;
use crate::soother::update_psy_coefficient;
use crate::state::ReactorState;
use crate::status::compute_status;
use crate::zap::plan_discharge;

/// Everything the crystal observes this tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    /// Frame time in seconds.
    pub dt: f32,
    /// Mixture of the tile the crystal stands on.
    pub mixture: Option<&'a GasMixture>,
    pub on_grid: bool,
    pub adjacent_vacuum: bool,
    /// Damage total from the damageable collaborator; `None` if it has none.
    pub external_damage: Option<f32>,
    pub soother_present: bool,
    /// Entities within the consume radius.
    pub matter: &'a [MatterCandidate],
}

impl<'a> TickInput<'a> {
    pub fn new(dt: f32, mixture: Option<&'a GasMixture>) -> Self {
        Self {
            dt,
            mixture,
            on_grid: true,
            adjacent_vacuum: false,
            external_damage: Some(0.0),
            soother_present: false,
            matter: &[],
        }
    }
}

/// Advance one crystal by `input.dt` and collect the side effects it asks for.
///
/// A resolved crystal is inert: nothing is mutated and no events are returned.
pub fn tick_reactor<R: Rng + ?Sized>(
    state: &mut ReactorState,
    config: &ReactorConfig,
    input: &TickInput<'_>,
    rng: &mut R,
) -> Vec<ReactorEvent> {
    let mut events = Vec::new();
    if state.delamination.is_resolved() {
        return events;
    }

    state.timers.yell.advance_capped(input.dt);

    let atmos_due = state.timers.atmos.tick(input.dt);
    if atmos_due {
        if let Some(mix) = input.mixture {
            atmos_cycle(state, config, mix, rng, &mut events);
        }
    }

    if state.timers.damage.tick(input.dt) {
        if let Some(total) = input.external_damage {
            damage_cycle(state, config, input, total, &mut events);
        }
    }

    state.since_accent += input.dt;
    events.extend(update_ambient(state));
    if atmos_due {
        events.extend(roll_accent(state, config, rng));
    }

    events.extend(consume_matter(state, input.matter));

    let moles = input.mixture.map_or(0.0, GasMixture::total_moles);
    events.extend(step_delamination(state, moles, input.dt, config));

    events
}

fn atmos_cycle<R: Rng + ?Sized>(
    state: &mut ReactorState,
    config: &ReactorConfig,
    mix: &GasMixture,
    rng: &mut R,
    events: &mut Vec<ReactorEvent>,
) {
    if !update_gas_exchange(state, mix, config) {
        return;
    }

    let step = react(state, config, mix.temperature);
    if step.radiation > 0.0 {
        events.push(ReactorEvent::RadiationEmitted {
            amount: step.radiation,
            range: config.radiation_range,
        });
    }

    let produced = compute_byproducts(
        step.energy,
        step.temperature,
        state.dynamic_heat_modifier,
        config,
    );
    events.push(ReactorEvent::GasReleased {
        produced,
        temperature: step.temperature,
    });

    if let Some(plan) = plan_discharge(state.power, config, rng) {
        events.push(ReactorEvent::LightningDischarged(plan));
    }

    let anomalies = plan_anomalies(state.power, config, rng);
    if !anomalies.is_empty() {
        events.push(ReactorEvent::AnomaliesSpawned(anomalies));
    }

    decay_power(state);
}

fn damage_cycle(
    state: &mut ReactorState,
    config: &ReactorConfig,
    input: &TickInput<'_>,
    total: f32,
    events: &mut Vec<ReactorEvent>,
) {
    state.damage_archived = total;
    update_psy_coefficient(state, input.soother_present);

    let env = DamageEnvironment {
        on_grid: input.on_grid,
        mixture: input.mixture,
        adjacent_vacuum: input.adjacent_vacuum,
    };
    let delta = compute_damage_delta(state, config, &env);
    state.damage = state.damage_archived + delta;
    if delta != 0.0 {
        events.push(ReactorEvent::DamageChanged { delta });
    }

    let status = compute_status(state, config, input.mixture);
    if status != state.status {
        events.push(ReactorEvent::StatusChanged {
            from: state.status,
            to: status,
        });
        state.status = status;
    }

    if state.timers.yell.is_due() {
        let announcements = damage_announcements(state, config);
        if !announcements.is_empty() {
            state.timers.yell.consume();
            events.extend(announcements.into_iter().map(ReactorEvent::Announcement));
        }
    }
}
