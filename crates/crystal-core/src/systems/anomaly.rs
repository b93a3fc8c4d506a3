//! Anomaly placement and timed despawn

use crystal_logic::anomaly::AnomalyKind;
use crystal_logic::config::ReactorConfig;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Anomaly, Lifetime, Prototype, TilePos, Transform, Vec3};
use crate::ports::Atmosphere;

/// Tiles on the crystal's grid whose centres lie inside the spawn ring.
pub fn anomaly_spawn_tiles<A: Atmosphere + ?Sized>(
    atmosphere: &A,
    origin: &Transform,
    config: &ReactorConfig,
) -> Vec<TilePos> {
    if !origin.on_grid() {
        return Vec::new();
    }
    let centre = origin.tile();
    let reach = config.anomaly_spawn_max_range.ceil() as i32;
    let (min_sq, max_sq) = (
        config.anomaly_spawn_min_range.powi(2),
        config.anomaly_spawn_max_range.powi(2),
    );

    let mut tiles = Vec::new();
    for dx in -reach..=reach {
        for dy in -reach..=reach {
            let tile = TilePos::new(centre.grid, centre.x + dx, centre.y + dy);
            let d_sq = tile_centre(tile).distance_squared(&origin.position);
            if d_sq < min_sq || d_sq > max_sq {
                continue;
            }
            if atmosphere.tile_mixture(tile).is_some() {
                tiles.push(tile);
            }
        }
    }
    tiles
}

fn tile_centre(tile: TilePos) -> Vec3 {
    Vec3::new(tile.x as f32 + 0.5, tile.y as f32 + 0.5, 0.0)
}

/// Spawn one anomaly per entry of `kinds` on distinct random tiles of the
/// ring. Fewer are spawned when the ring has fewer tiles.
pub fn spawn_anomalies<A, R>(
    world: &mut World,
    atmosphere: &A,
    rng: &mut R,
    origin: &Transform,
    kinds: &[AnomalyKind],
    config: &ReactorConfig,
) -> Vec<Entity>
where
    A: Atmosphere + ?Sized,
    R: Rng + ?Sized,
{
    let tiles = anomaly_spawn_tiles(atmosphere, origin, config);
    let chosen: Vec<TilePos> = tiles.choose_multiple(rng, kinds.len()).copied().collect();

    chosen
        .into_iter()
        .zip(kinds)
        .map(|(tile, &kind)| {
            world.spawn((
                Transform::new(tile_centre(tile), tile.grid),
                Anomaly { kind },
                Lifetime {
                    remaining: config.anomaly_lifetime,
                },
                Prototype(kind.prototype(config).to_string()),
            ))
        })
        .collect()
}

/// Count down lifetimes and despawn what has expired. Returns how many went.
pub fn lifetime_system(world: &mut World, dt: f32) -> usize {
    let mut expired = Vec::new();
    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining -= dt;
        if lifetime.remaining <= 0.0 {
            expired.push(entity);
        }
    }
    for &entity in &expired {
        let _ = world.despawn(entity);
    }
    expired.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TileAtmosphere;
    use crystal_logic::gas::{Gas, GasMixture};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn big_room() -> TileAtmosphere {
        let mut atmos = TileAtmosphere::new();
        let air = GasMixture::default().with_moles(Gas::Oxygen, 100.0);
        atmos.fill(1, (-15, -15), (15, 15), &air);
        atmos
    }

    fn origin() -> Transform {
        Transform::new(Vec3::new(0.5, 0.5, 0.0), 1)
    }

    #[test]
    fn test_spawn_tiles_form_ring() {
        let config = ReactorConfig::default();
        let tiles = anomaly_spawn_tiles(&big_room(), &origin(), &config);
        assert!(!tiles.is_empty());
        for tile in tiles {
            let d = tile_centre(tile).distance_squared(&origin().position).sqrt();
            assert!((5.0..=10.0).contains(&d), "tile {tile:?} at {d}");
        }
    }

    #[test]
    fn test_no_tiles_off_grid_or_in_small_room() {
        let config = ReactorConfig::default();
        let floating = Transform::new(Vec3::ZERO, crate::components::NO_GRID);
        assert!(anomaly_spawn_tiles(&big_room(), &floating, &config).is_empty());

        let mut closet = TileAtmosphere::new();
        closet.fill(1, (-2, -2), (2, 2), &GasMixture::default());
        assert!(anomaly_spawn_tiles(&closet, &origin(), &config).is_empty());
    }

    #[test]
    fn test_spawned_anomalies_expire() {
        let config = ReactorConfig::default();
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);
        let spawned = spawn_anomalies(
            &mut world,
            &big_room(),
            &mut rng,
            &origin(),
            &[AnomalyKind::Gravity, AnomalyKind::Bluespace],
            &config,
        );
        assert_eq!(spawned.len(), 2);
        assert_ne!(
            world.get::<&Transform>(spawned[0]).unwrap().tile(),
            world.get::<&Transform>(spawned[1]).unwrap().tile()
        );
        assert_eq!(world.get::<&Prototype>(spawned[0]).unwrap().0, "AnomalyGravity");

        assert_eq!(lifetime_system(&mut world, 59.0), 0);
        assert_eq!(lifetime_system(&mut world, 1.0), 2);
        assert!(!world.contains(spawned[0]));
    }
}
