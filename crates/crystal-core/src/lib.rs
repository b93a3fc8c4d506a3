//! Crystal Core - Reactor Simulation Engine
//!
//! An ECS host for the reactor logic in `crystal_logic`. Crystals live in a
//! `hecs` world next to the matter they may consume and the soothers that
//! calm them; gas, radiation, chat, audio and explosions are reached
//! through the traits in [`ports`].
//!
//! # Architecture
//!
//! - **Entities**: crystals, items, bodies, projectiles, ash, singularities
//! - **Components**: pure data ([`components::Transform`], [`components::Crystal`], ...)
//! - **Systems**: functions that query the world, call into `crystal_logic`
//!   and apply the returned events
//!
//! # Example
//!
//! ```rust,no_run
//! use crystal_core::prelude::*;
//! use crystal_logic::config::ReactorConfig;
//! use crystal_logic::gas::{Gas, GasMixture};
//!
//! let mut atmosphere = TileAtmosphere::new();
//! let air = GasMixture::default().with_moles(Gas::Oxygen, 100.0);
//! atmosphere.fill(1, (-2, -2), (2, 2), &air);
//!
//! let mut engine = ReactorEngine::with_seed(atmosphere, RecordingServices::new(), 7);
//! engine.spawn_crystal(Transform::new(Vec3::ZERO, 1), ReactorConfig::default());
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod components;
pub mod engine;
pub mod ports;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::ReactorEngine;
    pub use crate::ports::{Atmosphere, ReactorServices, RecordingServices, TileAtmosphere};
    pub use crate::systems::CrystalFate;
}
