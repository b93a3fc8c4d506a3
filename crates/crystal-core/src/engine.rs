//! Reactor engine - composition root that owns the world and its collaborators

use crystal_logic::config::ReactorConfig;
use crystal_logic::state::ReactorState;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::ports::{Atmosphere, ReactorServices};
use crate::systems::*;

/// Main reactor engine
pub struct ReactorEngine<A: Atmosphere, S: ReactorServices> {
    /// ECS world containing crystals and everything around them
    pub world: World,
    atmosphere: A,
    services: S,
    rng: StdRng,
    /// Simulation time in seconds since start
    sim_time: f64,
    time_scale: f32,
}

impl<A: Atmosphere, S: ReactorServices> ReactorEngine<A, S> {
    /// Create an engine with entropy-seeded randomness
    pub fn new(atmosphere: A, services: S) -> Self {
        Self::with_rng(atmosphere, services, StdRng::from_entropy())
    }

    /// Create an engine whose random draws are reproducible
    pub fn with_seed(atmosphere: A, services: S, seed: u64) -> Self {
        Self::with_rng(atmosphere, services, StdRng::seed_from_u64(seed))
    }

    fn with_rng(atmosphere: A, services: S, rng: StdRng) -> Self {
        Self {
            world: World::new(),
            atmosphere,
            services,
            rng,
            sim_time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Spawn a crystal with its own damage bookkeeping
    pub fn spawn_crystal(&mut self, transform: Transform, config: ReactorConfig) -> Entity {
        let entity = self
            .world
            .spawn((transform, Crystal::new(config), Damageable::default()));
        log::info!("Spawned crystal {entity:?} at {:?}", transform.tile());
        entity
    }

    /// Update the simulation by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) -> Vec<(Entity, CrystalFate)> {
        let scaled_delta = delta_seconds * self.time_scale;
        self.sim_time += scaled_delta as f64;

        let expired = lifetime_system(&mut self.world, scaled_delta);
        if expired > 0 {
            log::debug!("{expired} timed entities despawned");
        }

        crystal_system(
            &mut self.world,
            &mut self.atmosphere,
            &mut self.services,
            &mut self.rng,
            scaled_delta,
        )
        .into_iter()
        .filter(|(_, fate)| *fate != CrystalFate::Intact)
        .collect()
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn atmosphere(&self) -> &A {
        &self.atmosphere
    }

    pub fn atmosphere_mut(&mut self) -> &mut A {
        &mut self.atmosphere
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut S {
        &mut self.services
    }

    /// Snapshot of a crystal's reactor state
    pub fn crystal_state(&self, crystal: Entity) -> Option<ReactorState> {
        self.world
            .get::<&Crystal>(crystal)
            .ok()
            .map(|c| c.state.clone())
    }

    /// Externally tracked damage of an entity
    pub fn damage(&self, entity: Entity) -> Option<f32> {
        self.world.get::<&Damageable>(entity).ok().map(|d| d.total)
    }

    /// Overwrite an entity's damage total, as an outside damage source would
    pub fn set_damage(&mut self, entity: Entity, total: f32) {
        if let Ok(mut damageable) = self.world.get::<&mut Damageable>(entity) {
            damageable.total = total.max(0.0);
        }
    }

    /// Count crystals still in the world
    pub fn crystal_count(&self) -> usize {
        self.world.query::<&Crystal>().iter().count()
    }

    pub fn singularity_count(&self) -> usize {
        self.world.query::<&Singularity>().iter().count()
    }

    pub fn ash_count(&self) -> usize {
        self.world.query::<&Ash>().iter().count()
    }

    pub fn anomaly_count(&self) -> usize {
        self.world.query::<&Anomaly>().iter().count()
    }
}
