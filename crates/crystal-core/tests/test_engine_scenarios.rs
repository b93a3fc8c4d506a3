//! End-to-end scenarios through the engine: world, ports and reactor logic
//! together.

use crystal_core::ports::ServiceCall;
use crystal_core::prelude::*;
use crystal_logic::config::ReactorConfig;
use crystal_logic::gas::{Gas, GasMixture};

// ── Helpers ────────────────────────────────────────────────────────────

type Engine = ReactorEngine<TileAtmosphere, RecordingServices>;

const GRID: u32 = 1;

fn engine_with_room(air: GasMixture) -> Engine {
    let mut atmosphere = TileAtmosphere::new();
    atmosphere.fill(GRID, (-3, -3), (3, 3), &air);
    ReactorEngine::with_seed(atmosphere, RecordingServices::new(), 99)
}

fn cool_air() -> GasMixture {
    GasMixture::default()
        .with_moles(Gas::Oxygen, 100.0)
        .with_temperature(240.0)
}

fn centre() -> Transform {
    Transform::new(Vec3::new(0.5, 0.5, 0.0), GRID)
}

fn beside_crystal() -> Transform {
    Transform::new(Vec3::new(0.8, 0.5, 0.0), GRID)
}

/// Run until some crystal meets its end, at most `seconds` of 1 s ticks.
fn run_until_fate(engine: &mut Engine, seconds: usize) -> Option<CrystalFate> {
    for _ in 0..seconds {
        if let Some((_, fate)) = engine.update(1.0).into_iter().next() {
            return Some(fate);
        }
    }
    None
}

// ── Delamination ───────────────────────────────────────────────────────

#[test]
fn test_dense_gas_countdown_spawns_singularity() {
    let dense = GasMixture::default()
        .with_moles(Gas::Nitrogen, 2500.0)
        .with_temperature(300.0);
    let mut engine = engine_with_room(dense);
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());
    engine.set_damage(crystal, 900.0);

    let fate = run_until_fate(&mut engine, 40);
    assert!(matches!(fate, Some(CrystalFate::Collapsed(_))));
    assert_eq!(engine.crystal_count(), 0);
    assert_eq!(engine.singularity_count(), 1);
    assert_eq!(engine.services().explosions(), 0);

    let announcements = engine.services().station_announcements();
    assert!(announcements[0].starts_with("CRYSTAL DELAMINATION IN PROGRESS"));
}

#[test]
fn test_countdown_takes_thirty_seconds() {
    let mut engine = ReactorEngine::with_seed(TileAtmosphere::new(), RecordingServices::new(), 5);
    let crystal = engine.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), ReactorConfig::default());
    engine.set_damage(crystal, 900.0);

    // first tick starts the countdown, the next thirty run it out
    for _ in 0..30 {
        assert!(engine.update(1.0).is_empty());
    }
    let fates = engine.update(1.0);
    assert_eq!(fates, vec![(crystal, CrystalFate::Exploded)]);
}

#[test]
fn test_thin_gas_countdown_explodes() {
    let mut engine = ReactorEngine::with_seed(TileAtmosphere::new(), RecordingServices::new(), 5);
    let crystal = engine.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), ReactorConfig::default());
    engine.set_damage(crystal, 900.0);

    let fate = run_until_fate(&mut engine, 40);
    assert_eq!(fate, Some(CrystalFate::Exploded));
    assert_eq!(engine.crystal_count(), 0);
    assert_eq!(engine.singularity_count(), 0);
    assert_eq!(engine.services().explosions(), 1);

    let config = ReactorConfig::default();
    let explosion = engine
        .services()
        .calls
        .iter()
        .find_map(|c| match c {
            ServiceCall::Explosion { source, yield_ } => Some((*source, *yield_)),
            _ => None,
        })
        .unwrap();
    assert_eq!(explosion.0, crystal);
    assert_eq!(explosion.1.radius, config.explosion_radius);
}

#[test]
fn test_alarm_plays_once() {
    let mut engine = ReactorEngine::with_seed(TileAtmosphere::new(), RecordingServices::new(), 5);
    let crystal = engine.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), ReactorConfig::default());
    engine.set_damage(crystal, 950.0);

    // quarter-second frames through the whole countdown
    for _ in 0..200 {
        engine.update(0.25);
    }
    let sounds = engine.services().sounds();
    assert_eq!(sounds, vec![ReactorConfig::default().alarm_sound.as_str()]);
}

#[test]
fn test_recovery_stands_down() {
    let mut engine = ReactorEngine::with_seed(TileAtmosphere::new(), RecordingServices::new(), 5);
    let crystal = engine.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), ReactorConfig::default());
    engine.set_damage(crystal, 950.0);
    for _ in 0..5 {
        engine.update(1.0);
    }
    assert!(engine.crystal_state(crystal).unwrap().final_countdown);

    engine.set_damage(crystal, 100.0);
    for _ in 0..60 {
        assert!(engine.update(1.0).is_empty());
    }
    let state = engine.crystal_state(crystal).unwrap();
    assert!(!state.final_countdown);
    let stand_downs = engine
        .services()
        .station_announcements()
        .into_iter()
        .filter(|text| text.contains("Delamination averted"))
        .count();
    assert_eq!(stand_downs, 1);
}

#[test]
fn test_healing_at_threshold_keeps_countdown_quiet_between_cycles() {
    let thin_cool = GasMixture::default()
        .with_moles(Gas::Nitrogen, 100.0)
        .with_temperature(200.0);
    let mut engine = engine_with_room(thin_cool);
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());
    engine.set_damage(crystal, 900.5);

    // ten frames inside a single damage cycle
    for _ in 0..10 {
        assert!(engine.update(0.1).is_empty());
    }

    let announcements = engine.services().station_announcements();
    let starts = announcements
        .iter()
        .filter(|text| text.starts_with("CRYSTAL DELAMINATION IN PROGRESS"))
        .count();
    let stand_downs = announcements
        .iter()
        .filter(|text| text.contains("Delamination averted"))
        .count();
    assert_eq!((starts, stand_downs), (0, 0));
    assert!(!engine.crystal_state(crystal).unwrap().final_countdown);
    assert!(engine.damage(crystal).unwrap() < 900.0);
}

#[test]
fn test_countdown_started_at_small_frames_starts_once() {
    let mut engine = ReactorEngine::with_seed(TileAtmosphere::new(), RecordingServices::new(), 5);
    let crystal = engine.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), ReactorConfig::default());
    engine.set_damage(crystal, 900.0);

    for _ in 0..100 {
        engine.update(0.05);
    }
    let announcements = engine.services().station_announcements();
    let starts = announcements
        .iter()
        .filter(|text| text.starts_with("CRYSTAL DELAMINATION IN PROGRESS"))
        .count();
    assert_eq!(starts, 1);
    assert!(!announcements.iter().any(|text| text.contains("Delamination averted")));
}

// ── Matter consumption ─────────────────────────────────────────────────

#[test]
fn test_food_energy_consumed_into_power_and_ash() {
    let mut engine = engine_with_room(cool_air());
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());

    // let the primed atmos and damage cycles run first
    engine.update(0.1);
    let before = engine.crystal_state(crystal).unwrap().power;

    let snack = engine
        .world
        .spawn((beside_crystal(), Item, FoodEnergy(25.0)));
    engine.update(0.1);

    let after = engine.crystal_state(crystal).unwrap().power;
    assert!((after - before - 25.0).abs() < 1e-4);
    assert!(!engine.world.contains(snack));

    let ash: Vec<_> = engine
        .world
        .query::<(&Transform, &Ash, &Prototype)>()
        .iter()
        .map(|(_, (t, _, p))| (*t, p.0.clone()))
        .collect();
    assert_eq!(ash, vec![(beside_crystal(), "Ash".to_string())]);
}

#[test]
fn test_projectile_and_plain_item_gains() {
    let mut engine = engine_with_room(cool_air());
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());
    engine.update(0.1);
    let before = engine.crystal_state(crystal).unwrap().power;

    engine.world.spawn((
        beside_crystal(),
        ProjectileBolt,
        Projectile { damage: 15.0 },
    ));
    engine.world.spawn((beside_crystal(), Item));
    engine.update(0.1);

    let after = engine.crystal_state(crystal).unwrap().power;
    assert!((after - before - 16.0).abs() < 1e-4);
    assert_eq!(engine.ash_count(), 2);
}

#[test]
fn test_protected_matter_survives() {
    let mut engine = engine_with_room(cool_air());
    engine.spawn_crystal(centre(), ReactorConfig::default());

    let ghost = engine.world.spawn((beside_crystal(), Body, Ghost));
    let boxed = engine.world.spawn((beside_crystal(), Item, InContainer));
    let hidden = engine.world.spawn((beside_crystal(), Item, HiddenUnderFloor));
    let far = engine
        .world
        .spawn((Transform::new(Vec3::new(2.5, 0.5, 0.0), GRID), Item));
    for _ in 0..10 {
        engine.update(0.1);
    }

    for entity in [ghost, boxed, hidden, far] {
        assert!(engine.world.contains(entity));
    }
    assert_eq!(engine.ash_count(), 0);
}

// ── Environment ────────────────────────────────────────────────────────

#[test]
fn test_soother_raises_psy_coefficient() {
    let mut engine = engine_with_room(cool_air());
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());
    engine.world.spawn((
        Transform::new(Vec3::new(5.0, 0.5, 0.0), GRID),
        Soother { alive: true },
    ));

    for _ in 0..10 {
        engine.update(1.0);
    }
    let psy = engine.crystal_state(crystal).unwrap().psy_coefficient;
    assert!((psy - 0.07).abs() < 1e-4);
}

#[test]
fn test_vacuum_neighbour_counts_as_space_exposure() {
    let mut sealed = engine_with_room(cool_air());
    let mut breached = engine_with_room(cool_air());
    breached
        .atmosphere_mut()
        .set_tile(TilePos::new(GRID, 1, 0), GasMixture::vacuum());

    let a = sealed.spawn_crystal(centre(), ReactorConfig::default());
    let b = breached.spawn_crystal(centre(), ReactorConfig::default());
    // integrity 60 puts exposure in the 0.002 band
    sealed.set_damage(a, 360.0);
    breached.set_damage(b, 360.0);
    for _ in 0..3 {
        sealed.update(1.0);
        breached.update(1.0);
    }

    assert!(breached.damage(b).unwrap() > sealed.damage(a).unwrap());
}

#[test]
fn test_missing_neighbour_tile_counts_as_space_exposure() {
    let mut sealed = engine_with_room(cool_air());
    // room ends at the crystal's column: the tiles east of it are open space
    let mut open_edge = TileAtmosphere::new();
    open_edge.fill(GRID, (-3, -3), (0, 3), &cool_air());
    let mut open_edge = ReactorEngine::with_seed(open_edge, RecordingServices::new(), 99);

    let a = sealed.spawn_crystal(centre(), ReactorConfig::default());
    let b = open_edge.spawn_crystal(centre(), ReactorConfig::default());
    sealed.set_damage(a, 360.0);
    open_edge.set_damage(b, 360.0);
    for _ in 0..3 {
        sealed.update(1.0);
        open_edge.update(1.0);
    }

    assert!(open_edge.damage(b).unwrap() > sealed.damage(a).unwrap());
}

#[test]
fn test_integrity_warning_spoken_locally() {
    let mut engine = engine_with_room(cool_air());
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());
    engine.set_damage(crystal, 120.0);
    engine.update(1.0);

    let speech = engine.services().local_speech();
    assert_eq!(speech.len(), 1);
    assert!(speech[0].contains("Integrity"));
}

// ── Anomalies and sound ────────────────────────────────────────────────

#[test]
fn test_charged_crystal_throws_anomalies_that_fade() {
    let warm = GasMixture::default()
        .with_moles(Gas::Oxygen, 100.0)
        .with_temperature(300.0);
    let mut atmosphere = TileAtmosphere::new();
    atmosphere.fill(GRID, (-12, -12), (12, 12), &warm);
    let mut engine = ReactorEngine::with_seed(atmosphere, RecordingServices::new(), 99);
    let config = ReactorConfig {
        anomaly_bluespace_chance: 1.0,
        ..Default::default()
    };
    engine.spawn_crystal(centre(), config);

    engine.update(0.1);
    let first: Vec<_> = engine
        .world
        .query::<(&Anomaly, &Transform, &Prototype)>()
        .iter()
        .map(|(entity, (_, t, p))| (entity, *t, p.0.clone()))
        .collect();
    assert!(!first.is_empty());
    for (_, transform, prototype) in &first {
        let d = transform.position.distance_squared(&centre().position).sqrt();
        assert!((5.0..=10.0).contains(&d), "anomaly at {d}");
        assert!(prototype.starts_with("Anomaly"));
    }

    for _ in 0..61 {
        engine.update(1.0);
    }
    for (entity, _, _) in &first {
        assert!(!engine.world.contains(*entity));
    }
}

#[test]
fn test_ambience_turns_ominous_when_damaged() {
    let mut engine = engine_with_room(cool_air());
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());
    let config = ReactorConfig::default();

    engine.update(1.0);
    assert_eq!(
        engine.services().ambient(crystal).map(|(sound, _)| sound),
        Some(config.calm_loop_sound.as_str())
    );

    engine.set_damage(crystal, 700.0);
    engine.update(1.0);
    assert_eq!(
        engine.services().ambient(crystal).map(|(sound, _)| sound),
        Some(config.delam_loop_sound.as_str())
    );
}

#[test]
fn test_driven_crystal_plays_delam_accents() {
    let mut engine = engine_with_room(cool_air());
    let crystal = engine.spawn_crystal(centre(), ReactorConfig::default());

    // held at high damage and power
    for _ in 0..300 {
        engine.set_damage(crystal, 800.0);
        engine.world.get::<&mut Crystal>(crystal).unwrap().state.power = 2500.0;
        engine.update(1.0);
    }

    let accents = engine.services().sounds_near(crystal);
    assert!(!accents.is_empty());
    let delam = ReactorConfig::default().delam_accent_sound;
    assert!(accents.iter().all(|sound| *sound == delam));
}
