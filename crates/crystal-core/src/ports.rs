//! Collaborators the reactor talks to but does not own.
//!
//! The engine is handed one [`Atmosphere`] and one bundle of
//! [`ReactorServices`] at construction. [`TileAtmosphere`] and
//! [`RecordingServices`] are in-memory implementations used by the
//! harness and tests.

use std::collections::HashMap;

use crystal_logic::gas::GasMixture;
use crystal_logic::production::ProducedGas;
use crystal_logic::zap::ZapPlan;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::components::TilePos;

/// Tile gas storage. Diffusion between tiles is not this crate's business.
pub trait Atmosphere {
    fn tile_mixture(&self, tile: TilePos) -> Option<GasMixture>;
    /// One entry per tile of the surrounding 3x3 box, `None` where the grid
    /// has no tile (open space).
    fn adjacent_mixtures(&self, tile: TilePos) -> Vec<Option<GasMixture>>;
    fn merge_gas(&mut self, tile: TilePos, produced: &ProducedGas);
    fn set_tile_temperature(&mut self, tile: TilePos, kelvin: f32);
}

pub trait RadiationSink {
    fn emit_radiation(&mut self, source: Entity, amount: f32, range: f32, dt: f32);
    fn discharge_lightning(&mut self, source: Entity, plan: &ZapPlan);
}

pub trait Announcer {
    fn station_announcement(&mut self, text: &str, source: Entity);
    fn entity_say(&mut self, entity: Entity, text: &str);
}

/// Who hears a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFilter {
    /// Everyone on the station.
    Global,
    /// Those near an entity.
    Near(Entity),
}

pub trait AudioPlayer {
    fn play_sound(&mut self, sound: &str, filter: SoundFilter);
    /// Replace the looping ambience emitted by `source`.
    fn set_ambient(&mut self, source: Entity, sound: &str, volume: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionYield {
    pub light: f32,
    pub heavy: f32,
    pub devastation: f32,
    pub radius: f32,
}

pub trait ExplosionService {
    fn spawn_explosion(&mut self, source: Entity, yield_: ExplosionYield);
}

/// Everything besides atmosphere and the world the engine calls out to.
pub trait ReactorServices: RadiationSink + Announcer + AudioPlayer + ExplosionService {}

impl<T> ReactorServices for T where T: RadiationSink + Announcer + AudioPlayer + ExplosionService {}

// ── In-memory implementations ──────────────────────────────────────────

/// Tile mixtures kept in a map. Tiles without an entry have no atmosphere.
#[derive(Debug, Clone, Default)]
pub struct TileAtmosphere {
    tiles: HashMap<TilePos, GasMixture>,
}

impl TileAtmosphere {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tile(&mut self, tile: TilePos, mixture: GasMixture) {
        self.tiles.insert(tile, mixture);
    }

    /// Fill the rectangle `[min, max]` (inclusive) with copies of `mixture`.
    pub fn fill(&mut self, grid: u32, min: (i32, i32), max: (i32, i32), mixture: &GasMixture) {
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                self.tiles.insert(TilePos::new(grid, x, y), *mixture);
            }
        }
    }

    pub fn tile(&self, tile: TilePos) -> Option<&GasMixture> {
        self.tiles.get(&tile)
    }
}

impl Atmosphere for TileAtmosphere {
    fn tile_mixture(&self, tile: TilePos) -> Option<GasMixture> {
        self.tiles.get(&tile).copied()
    }

    fn adjacent_mixtures(&self, tile: TilePos) -> Vec<Option<GasMixture>> {
        tile.neighbours()
            .iter()
            .map(|n| self.tiles.get(n).copied())
            .collect()
    }

    fn merge_gas(&mut self, tile: TilePos, produced: &ProducedGas) {
        if let Some(mix) = self.tiles.get_mut(&tile) {
            produced.merge_into(mix);
        }
    }

    fn set_tile_temperature(&mut self, tile: TilePos, kelvin: f32) {
        if let Some(mix) = self.tiles.get_mut(&tile) {
            mix.temperature = kelvin;
        }
    }
}

/// Something the reactor asked a collaborator to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    Radiation { source: Entity, amount: f32, range: f32 },
    Lightning { source: Entity, plan: ZapPlan },
    StationAnnouncement { source: Entity, text: String },
    EntitySay { entity: Entity, text: String },
    Sound { sound: String, filter: SoundFilter },
    Ambient { source: Entity, sound: String, volume: f32 },
    Explosion { source: Entity, yield_: ExplosionYield },
}

/// Records every call in order instead of acting on it.
#[derive(Debug, Clone, Default)]
pub struct RecordingServices {
    pub calls: Vec<ServiceCall>,
}

impl RecordingServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of all station-wide announcements so far.
    pub fn station_announcements(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ServiceCall::StationAnnouncement { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text the crystal said aloud so far.
    pub fn local_speech(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ServiceCall::EntitySay { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn sounds(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ServiceCall::Sound { sound, .. } => Some(sound.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Sounds heard only near the given entity.
    pub fn sounds_near(&self, entity: Entity) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ServiceCall::Sound {
                    sound,
                    filter: SoundFilter::Near(near),
                } if *near == entity => Some(sound.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent ambience set for `source`.
    pub fn ambient(&self, source: Entity) -> Option<(&str, f32)> {
        self.calls.iter().rev().find_map(|c| match c {
            ServiceCall::Ambient {
                source: s,
                sound,
                volume,
            } if *s == source => Some((sound.as_str(), *volume)),
            _ => None,
        })
    }

    pub fn explosions(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ServiceCall::Explosion { .. }))
            .count()
    }

    pub fn total_radiation(&self) -> f32 {
        self.calls
            .iter()
            .map(|c| match c {
                ServiceCall::Radiation { amount, .. } => *amount,
                _ => 0.0,
            })
            .sum()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RadiationSink for RecordingServices {
    fn emit_radiation(&mut self, source: Entity, amount: f32, range: f32, _dt: f32) {
        self.calls.push(ServiceCall::Radiation {
            source,
            amount,
            range,
        });
    }

    fn discharge_lightning(&mut self, source: Entity, plan: &ZapPlan) {
        self.calls.push(ServiceCall::Lightning {
            source,
            plan: *plan,
        });
    }
}

impl Announcer for RecordingServices {
    fn station_announcement(&mut self, text: &str, source: Entity) {
        self.calls.push(ServiceCall::StationAnnouncement {
            source,
            text: text.to_string(),
        });
    }

    fn entity_say(&mut self, entity: Entity, text: &str) {
        self.calls.push(ServiceCall::EntitySay {
            entity,
            text: text.to_string(),
        });
    }
}

impl AudioPlayer for RecordingServices {
    fn play_sound(&mut self, sound: &str, filter: SoundFilter) {
        self.calls.push(ServiceCall::Sound {
            sound: sound.to_string(),
            filter,
        });
    }

    fn set_ambient(&mut self, source: Entity, sound: &str, volume: f32) {
        self.calls.push(ServiceCall::Ambient {
            source,
            sound: sound.to_string(),
            volume,
        });
    }
}

impl ExplosionService for RecordingServices {
    fn spawn_explosion(&mut self, source: Entity, yield_: ExplosionYield) {
        self.calls.push(ServiceCall::Explosion { source, yield_ });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crystal_logic::gas::Gas;

    #[test]
    fn test_adjacent_reports_missing_tiles() {
        let mut atmos = TileAtmosphere::new();
        let air = GasMixture::default().with_moles(Gas::Oxygen, 50.0);
        atmos.fill(1, (-1, -1), (1, 1), &air);
        atmos.set_tile(TilePos::new(1, -1, 0), GasMixture::vacuum());

        let adjacent = atmos.adjacent_mixtures(TilePos::new(1, 0, 0));
        assert_eq!(adjacent.len(), 8);
        assert!(adjacent.iter().all(Option::is_some));
        assert_eq!(adjacent.iter().flatten().filter(|m| m.is_vacuum()).count(), 1);

        // corner tile of the filled box has five neighbours off the grid
        let corner = atmos.adjacent_mixtures(TilePos::new(1, 1, 1));
        assert_eq!(corner.iter().filter(|m| m.is_none()).count(), 5);
    }

    #[test]
    fn test_merge_and_heat_tile() {
        let mut atmos = TileAtmosphere::new();
        let tile = TilePos::new(1, 0, 0);
        atmos.set_tile(tile, GasMixture::default());
        atmos.merge_gas(
            tile,
            &ProducedGas {
                plasma: 2.0,
                oxygen: 3.0,
            },
        );
        atmos.set_tile_temperature(tile, 500.0);

        let mix = atmos.tile(tile).unwrap();
        assert_eq!(mix.moles(Gas::Plasma), 2.0);
        assert_eq!(mix.moles(Gas::Oxygen), 3.0);
        assert_eq!(mix.temperature, 500.0);
    }

    #[test]
    fn test_writes_to_missing_tile_are_dropped() {
        let mut atmos = TileAtmosphere::new();
        let tile = TilePos::new(1, 5, 5);
        atmos.set_tile_temperature(tile, 500.0);
        assert!(atmos.tile_mixture(tile).is_none());
    }
}
