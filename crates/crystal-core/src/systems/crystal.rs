//! Crystal system - gather each crystal's surroundings, run the reactor
//! tick, and carry out the events it returns.

use crystal_logic::config::ReactorConfig;
use crystal_logic::events::{AnnouncementScope, ReactorEvent};
use crystal_logic::reactor::{tick_reactor, TickInput};
use hecs::{Entity, World};
use rand::Rng;

use super::{matter_in_reach, reduce_to_ash, soother_in_range, spawn_anomalies};
use crate::components::{Crystal, Damageable, Prototype, Singularity, Transform};
use crate::ports::{Atmosphere, ExplosionYield, ReactorServices, SoundFilter};

/// What became of a crystal during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrystalFate {
    Intact,
    /// Replaced by the given singularity entity.
    Collapsed(Entity),
    Exploded,
}

/// Tick every crystal in the world.
pub fn crystal_system<A, S, R>(
    world: &mut World,
    atmosphere: &mut A,
    services: &mut S,
    rng: &mut R,
    dt: f32,
) -> Vec<(Entity, CrystalFate)>
where
    A: Atmosphere + ?Sized,
    S: ReactorServices + ?Sized,
    R: Rng + ?Sized,
{
    let crystals: Vec<Entity> = world
        .query::<(&Crystal, &Transform)>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    let mut fates = Vec::with_capacity(crystals.len());
    for entity in crystals {
        let fate = update_crystal(world, atmosphere, services, rng, entity, dt);
        fates.push((entity, fate));
    }
    fates
}

/// Run one tick for a single crystal.
pub fn update_crystal<A, S, R>(
    world: &mut World,
    atmosphere: &mut A,
    services: &mut S,
    rng: &mut R,
    entity: Entity,
    dt: f32,
) -> CrystalFate
where
    A: Atmosphere + ?Sized,
    S: ReactorServices + ?Sized,
    R: Rng + ?Sized,
{
    let Ok(transform) = world.get::<&Transform>(entity).map(|t| *t) else {
        return CrystalFate::Intact;
    };
    let tile = transform.tile();

    let mixture = if transform.on_grid() {
        atmosphere.tile_mixture(tile)
    } else {
        None
    };
    if mixture.is_none() {
        log::debug!("Crystal {entity:?} has no tile mixture at {tile:?}");
    }
    // a missing tile next to the crystal is open space
    let adjacent_vacuum = transform.on_grid()
        && atmosphere
            .adjacent_mixtures(tile)
            .iter()
            .any(|m| m.map_or(true, |m| m.total_moles() <= 0.0));

    let external_damage = world.get::<&Damageable>(entity).ok().map(|d| d.total);
    if external_damage.is_none() {
        log::debug!("Crystal {entity:?} has no damageable component; skipping damage");
    }

    let (config, events) = {
        let Ok(mut crystal) = world.get::<&mut Crystal>(entity) else {
            return CrystalFate::Intact;
        };
        let soother_present = soother_in_range(world, &transform, crystal.config.soother_range);
        let matter = matter_in_reach(world, entity, &transform, crystal.config.consume_radius);

        let input = TickInput {
            dt,
            mixture: mixture.as_ref(),
            on_grid: transform.on_grid(),
            adjacent_vacuum,
            external_damage,
            soother_present,
            matter: &matter,
        };
        let Crystal { config, state } = &mut *crystal;
        let events = tick_reactor(state, config, &input, rng);
        (config.clone(), events)
    };

    let mut fate = CrystalFate::Intact;
    for event in events {
        if let Some(end) = apply_event(
            world, atmosphere, services, rng, entity, &transform, &config, dt, event,
        ) {
            fate = end;
        }
    }
    fate
}

/// Carry out one reactor event. Returns the crystal's fate if it ended.
#[allow(clippy::too_many_arguments)]
fn apply_event<A, S, R>(
    world: &mut World,
    atmosphere: &mut A,
    services: &mut S,
    rng: &mut R,
    entity: Entity,
    transform: &Transform,
    config: &ReactorConfig,
    dt: f32,
    event: ReactorEvent,
) -> Option<CrystalFate>
where
    A: Atmosphere + ?Sized,
    S: ReactorServices + ?Sized,
    R: Rng + ?Sized,
{
    match event {
        ReactorEvent::Announcement(announcement) => match announcement.scope {
            AnnouncementScope::Station => {
                log::info!("Crystal {entity:?} announces: {}", announcement.text);
                services.station_announcement(&announcement.text, entity);
            }
            AnnouncementScope::Local => services.entity_say(entity, &announcement.text),
        },
        ReactorEvent::RadiationEmitted { amount, range } => {
            services.emit_radiation(entity, amount, range, dt);
        }
        ReactorEvent::GasReleased {
            produced,
            temperature,
        } => {
            let tile = transform.tile();
            atmosphere.merge_gas(tile, &produced);
            atmosphere.set_tile_temperature(tile, temperature);
        }
        ReactorEvent::DamageChanged { delta } => {
            if let Ok(mut damageable) = world.get::<&mut Damageable>(entity) {
                damageable.change(delta);
            }
        }
        ReactorEvent::LightningDischarged(plan) => {
            services.discharge_lightning(entity, &plan);
        }
        ReactorEvent::AnomaliesSpawned(kinds) => {
            let spawned = spawn_anomalies(world, &*atmosphere, rng, transform, &kinds, config);
            log::debug!(
                "Crystal {entity:?} threw {} of {} anomalies",
                spawned.len(),
                kinds.len()
            );
        }
        ReactorEvent::AmbientChanged(ambient) => {
            services.set_ambient(entity, ambient.mood.loop_sound(config), ambient.volume);
        }
        ReactorEvent::AccentPlayed(mood) => {
            services.play_sound(mood.accent_sound(config), SoundFilter::Near(entity));
        }
        ReactorEvent::StatusChanged { from, to } => {
            log::info!(
                "Crystal {entity:?} status {} -> {}",
                from.label(),
                to.label()
            );
        }
        ReactorEvent::AlarmStarted => {
            log::warn!("Crystal {entity:?} delamination alarm");
            services.play_sound(&config.alarm_sound, SoundFilter::Global);
        }
        ReactorEvent::EntityConsumed { entity: id, power_gain } => {
            match Entity::from_bits(id) {
                Some(consumed) => {
                    if reduce_to_ash(world, consumed, &config.ash_prototype).is_some() {
                        log::debug!("Crystal {entity:?} consumed {consumed:?} for {power_gain:.1} power");
                    }
                }
                None => log::warn!("Crystal {entity:?} consumed unknown entity {id}"),
            }
        }
        ReactorEvent::SingularitySpawned => {
            log::warn!("Crystal {entity:?} collapsed into a singularity");
            let singularity = world.spawn((
                *transform,
                Singularity,
                Prototype(config.singularity_prototype.clone()),
            ));
            if world.despawn(entity).is_err() {
                log::warn!("Crystal {entity:?} already gone at collapse");
            }
            return Some(CrystalFate::Collapsed(singularity));
        }
        ReactorEvent::ExplosionTriggered => {
            log::warn!("Crystal {entity:?} exploded");
            services.spawn_explosion(
                entity,
                ExplosionYield {
                    light: config.explosion_light,
                    heavy: config.explosion_heavy,
                    devastation: config.explosion_devastation,
                    radius: config.explosion_radius,
                },
            );
            if world.despawn(entity).is_err() {
                log::warn!("Crystal {entity:?} already gone at explosion");
            }
            return Some(CrystalFate::Exploded);
        }
    }
    None
}
