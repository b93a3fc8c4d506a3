//! Crystal Reactor Headless Simulation Harness
//!
//! Runs the reactor logic and the ECS engine through fixed scenarios and
//! reports PASS/FAIL for each check. Entirely in-process: no rendering, no
//! networking.
//!
//! Usage:
//!   cargo run -p crystal-simtest
//!   cargo run -p crystal-simtest -- --verbose --seed 7
//!   cargo run -p crystal-simtest -- --config my_crystal.json

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use crystal_core::prelude::*;
use crystal_logic::config::{validate_config, ReactorConfig};
use crystal_logic::events::ReactorEvent;
use crystal_logic::exchange::update_gas_exchange;
use crystal_logic::gas::{Gas, GasMixture};
use crystal_logic::integrity::{compute_damage_delta, integrity_percent, DamageEnvironment};
use crystal_logic::reactor::{tick_reactor, TickInput};
use crystal_logic::state::{ReactorState, POWER_HARD_CAP};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Default crystal prototype (same JSON shipped in data/) ──────────────
const DEFAULT_CONFIG_JSON: &str = include_str!("../../../data/reactor_config.json");

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless crystal reactor scenario harness")]
struct Args {
    /// Reactor config JSON to use instead of the bundled prototype
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every check, not only failures
    #[arg(long)]
    verbose: bool,

    /// Seed for lightning draws
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("=== Crystal Reactor Simulation Harness ===\n");

    let config = load_config(args.config.as_deref())?;
    log::info!("Loaded reactor config, explosion point {}", config.explosion_point);

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_configuration(&config));

    // 2. Gas exchange
    results.extend(validate_gas_exchange(&config));

    // 3. Power feedback loop
    results.extend(validate_power_loop(&config, args.seed));

    // 4. Integrity
    results.extend(validate_integrity(&config));

    // 5. Delamination through the engine
    results.extend(validate_delamination(&config, args.seed));

    // 6. Matter consumption through the engine
    results.extend(validate_consumption(&config, args.seed));

    // 7. Anomalies and ambience through the engine
    results.extend(validate_anomalies(&config, args.seed));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReactorConfig> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading reactor config {}", path.display()))?,
        None => DEFAULT_CONFIG_JSON.to_string(),
    };
    ReactorConfig::from_json(&json).context("loading reactor config")
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn engine(atmosphere: TileAtmosphere, seed: u64) -> ReactorEngine<TileAtmosphere, RecordingServices> {
    ReactorEngine::with_seed(atmosphere, RecordingServices::new(), seed)
}

fn room(mixture: &GasMixture) -> TileAtmosphere {
    let mut atmosphere = TileAtmosphere::new();
    atmosphere.fill(1, (-3, -3), (3, 3), mixture);
    atmosphere
}

fn centre() -> Transform {
    Transform::new(Vec3::new(0.5, 0.5, 0.0), 1)
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &ReactorConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let errors = validate_config(config);
    results.push(TestResult::new(
        "config_valid",
        errors.is_empty(),
        format!("{} validation errors", errors.len()),
    ));

    let bad = ReactorConfig::from_json(r#"{ "warning_point": 1000.0, "thermal_release_modifier": 0.0 }"#);
    results.push(TestResult::new(
        "config_rejects_bad_thresholds",
        bad.is_err(),
        match bad {
            Ok(_) => "accepted".to_string(),
            Err(e) => e.to_string(),
        },
    ));

    results
}

// ── 2. Gas Exchange ─────────────────────────────────────────────────────

fn validate_gas_exchange(config: &ReactorConfig) -> Vec<TestResult> {
    println!("--- Gas Exchange ---");
    let mut results = Vec::new();

    let mut state = ReactorState::new(config);
    let before = state.clone();
    let changed = update_gas_exchange(&mut state, &GasMixture::vacuum(), config);
    results.push(TestResult::new(
        "exchange_empty_mixture_noop",
        !changed && state == before,
        "zero moles leaves coefficients untouched",
    ));

    let co2 = GasMixture::default()
        .with_moles(Gas::CarbonDioxide, 900.0)
        .with_moles(Gas::Oxygen, 100.0);
    let mut state = ReactorState::new(config);
    for _ in 0..50 {
        update_gas_exchange(&mut state, &co2, config);
    }
    let scaling = state.powerloss_dynamic_scaling;
    results.push(TestResult::new(
        "exchange_powerloss_converges",
        (scaling - 0.9).abs() <= 0.02,
        format!("scaling {scaling:.3} after 50 cycles at 90% CO2"),
    ));

    let mut extremes_ok = true;
    for gas in Gas::ALL {
        let mix = GasMixture::default().with_moles(gas, 500.0);
        let mut state = ReactorState::new(config);
        update_gas_exchange(&mut state, &mix, config);
        extremes_ok &= (0.0..=1.0).contains(&state.gasmix_power_ratio)
            && state.dynamic_heat_modifier >= 0.5
            && (0.0..=1.0).contains(&state.powerloss_inhibitor);
    }
    results.push(TestResult::new(
        "exchange_pure_species_in_range",
        extremes_ok,
        format!("{} pure-species mixtures", Gas::ALL.len()),
    ));

    results
}

// ── 3. Power Loop ───────────────────────────────────────────────────────

fn validate_power_loop(config: &ReactorConfig, seed: u64) -> Vec<TestResult> {
    println!("--- Power Loop ---");
    let mut results = Vec::new();
    let mut rng = rng(seed);

    let mixes = [
        ("oxygen", GasMixture::default().with_moles(Gas::Oxygen, 100.0).with_temperature(300.0)),
        (
            "plasma_oxygen",
            GasMixture::default()
                .with_moles(Gas::Oxygen, 60.0)
                .with_moles(Gas::Plasma, 40.0)
                .with_temperature(800.0),
        ),
        (
            "tritium_hot",
            GasMixture::default()
                .with_moles(Gas::Tritium, 200.0)
                .with_temperature(2000.0),
        ),
    ];

    for (name, initial) in mixes {
        let mut mix = initial;
        let mut state = ReactorState::new(config);
        let mut peak: f32 = 0.0;
        let mut in_bounds = true;

        // 10 simulated minutes with byproducts written back
        for _ in 0..1200 {
            let input = TickInput {
                external_damage: None,
                ..TickInput::new(0.5, Some(&mix))
            };
            let events = tick_reactor(&mut state, config, &input, &mut rng);
            for event in events {
                if let ReactorEvent::GasReleased {
                    produced,
                    temperature,
                } = event
                {
                    produced.merge_into(&mut mix);
                    mix.temperature = temperature;
                }
            }
            peak = peak.max(state.power);
            in_bounds &= state.power.is_finite() && (0.0..=POWER_HARD_CAP).contains(&state.power);
        }

        results.push(TestResult::new(
            &format!("power_bounded_{name}"),
            in_bounds,
            format!("peak power {peak:.1}, final {:.1}", state.power),
        ));
    }

    results
}

// ── 4. Integrity ────────────────────────────────────────────────────────

fn validate_integrity(config: &ReactorConfig) -> Vec<TestResult> {
    println!("--- Integrity ---");
    let mut results = Vec::new();

    let mut last = 100.0;
    let mut monotonic = true;
    let steps = 1000;
    for i in 0..=steps {
        let damage = config.explosion_point * 1.2 * i as f32 / steps as f32;
        let integrity = integrity_percent(damage, config.explosion_point);
        monotonic &= integrity <= last && (0.0..=100.0).contains(&integrity);
        last = integrity;
    }
    results.push(TestResult::new(
        "integrity_monotonic",
        monotonic,
        format!("integrity {last} at 120% of explosion point"),
    ));

    let frozen = GasMixture::default()
        .with_moles(Gas::Nitrogen, 100.0)
        .with_temperature(3.0);
    let state = ReactorState {
        damage_archived: 200.0,
        ..ReactorState::new(config)
    };
    let env = DamageEnvironment {
        on_grid: true,
        mixture: Some(&frozen),
        adjacent_vacuum: false,
    };
    let delta = compute_damage_delta(&state, config, &env);
    results.push(TestResult::new(
        "integrity_healing_capped",
        delta >= -2.0 && delta < 0.0,
        format!("delta {delta:.3} in near-zero kelvin"),
    ));

    let scorched = GasMixture::default()
        .with_moles(Gas::Plasma, 5000.0)
        .with_temperature(5000.0);
    let state = ReactorState {
        power: POWER_HARD_CAP,
        mole_heat_penalty_threshold: 14.0,
        ..ReactorState::new(config)
    };
    let env = DamageEnvironment {
        mixture: Some(&scorched),
        ..env
    };
    let delta = compute_damage_delta(&state, config, &env);
    results.push(TestResult::new(
        "integrity_damage_hardcap",
        delta <= config.damage_cap() + 1e-6,
        format!("delta {delta:.3}, cap {:.3}", config.damage_cap()),
    ));

    results
}

// ── 5. Delamination ─────────────────────────────────────────────────────

fn validate_delamination(config: &ReactorConfig, seed: u64) -> Vec<TestResult> {
    println!("--- Delamination ---");
    let mut results = Vec::new();
    let budget = config.delam_duration.ceil() as usize + 10;

    // Thin gas: off-grid crystal explodes
    let mut eng = engine(TileAtmosphere::new(), seed);
    let crystal = eng.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), config.clone());
    eng.set_damage(crystal, config.explosion_point);
    let mut fate = None;
    let mut seconds = 0;
    for _ in 0..budget {
        seconds += 1;
        if let Some((_, f)) = eng.update(1.0).into_iter().next() {
            fate = Some(f);
            break;
        }
    }
    results.push(TestResult::new(
        "delam_thin_gas_explodes",
        fate == Some(CrystalFate::Exploded) && eng.services().explosions() == 1,
        format!("{fate:?} after {seconds} s"),
    ));
    results.push(TestResult::new(
        "delam_alarm_once",
        eng.services().sounds().len() == 1,
        format!("{} alarm plays", eng.services().sounds().len()),
    ));

    // Dense gas: crystal collapses into a singularity
    let dense = GasMixture::default()
        .with_moles(Gas::Nitrogen, config.mole_penalty_threshold * 1.5)
        .with_temperature(300.0);
    let mut eng = engine(room(&dense), seed);
    let crystal = eng.spawn_crystal(centre(), config.clone());
    eng.set_damage(crystal, config.explosion_point);
    let mut fate = None;
    for _ in 0..budget {
        if let Some((_, f)) = eng.update(1.0).into_iter().next() {
            fate = Some(f);
            break;
        }
    }
    results.push(TestResult::new(
        "delam_dense_gas_singularity",
        matches!(fate, Some(CrystalFate::Collapsed(_))) && eng.singularity_count() == 1,
        format!("{fate:?}, {} crystals left", eng.crystal_count()),
    ));

    // Recovery below the explosion point aborts the countdown
    let mut eng = engine(TileAtmosphere::new(), seed);
    let crystal = eng.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), config.clone());
    eng.set_damage(crystal, config.explosion_point);
    for _ in 0..5 {
        eng.update(1.0);
    }
    eng.set_damage(crystal, config.warning_point);
    let mut resolved = false;
    for _ in 0..budget {
        resolved |= !eng.update(1.0).is_empty();
    }
    let countdown = eng
        .crystal_state(crystal)
        .map(|s| s.final_countdown)
        .unwrap_or(true);
    results.push(TestResult::new(
        "delam_recovery_aborts",
        !resolved && !countdown,
        format!("resolved {resolved}, countdown {countdown}"),
    ));

    results
}

// ── 6. Matter Consumption ───────────────────────────────────────────────

fn validate_consumption(config: &ReactorConfig, seed: u64) -> Vec<TestResult> {
    println!("--- Matter Consumption ---");
    let mut results = Vec::new();

    let air = GasMixture::default()
        .with_moles(Gas::Oxygen, 100.0)
        .with_temperature(240.0);
    let mut eng = engine(room(&air), seed);
    let crystal = eng.spawn_crystal(centre(), config.clone());
    eng.update(0.05);
    let before = eng.crystal_state(crystal).map(|s| s.power).unwrap_or(0.0);

    let energy = 40.0;
    let spot = Transform::new(Vec3::new(0.5, 0.8, 0.0), 1);
    let food = eng.world.spawn((spot, Item, FoodEnergy(energy)));
    let ghost = eng.world.spawn((spot, Body, Ghost));
    eng.update(0.05);

    let after = eng.crystal_state(crystal).map(|s| s.power).unwrap_or(0.0);
    results.push(TestResult::new(
        "consume_food_energy",
        (after - before - energy).abs() < 1e-3,
        format!("power {before:.2} -> {after:.2}"),
    ));
    results.push(TestResult::new(
        "consume_leaves_ash",
        !eng.world.contains(food) && eng.ash_count() == 1,
        format!("{} ash", eng.ash_count()),
    ));
    results.push(TestResult::new(
        "consume_spares_ghosts",
        eng.world.contains(ghost),
        "ghost untouched",
    ));

    results
}

// ── 7. Anomalies and ambience ───────────────────────────────────────────

fn validate_anomalies(config: &ReactorConfig, seed: u64) -> Vec<TestResult> {
    println!("--- Anomalies & Ambience ---");
    let mut results = Vec::new();

    let air = GasMixture::default()
        .with_moles(Gas::Oxygen, 100.0)
        .with_temperature(300.0);
    let mut hall = TileAtmosphere::new();
    hall.fill(1, (-12, -12), (12, 12), &air);
    let mut eng = engine(hall, seed);
    let certain = ReactorConfig {
        anomaly_bluespace_chance: 1.0,
        ..config.clone()
    };
    let crystal = eng.spawn_crystal(centre(), certain.clone());

    eng.update(0.1);
    let spawned = eng.anomaly_count();
    results.push(TestResult::new(
        "anomaly_spawned_when_charged",
        spawned > 0,
        format!("{spawned} anomalies"),
    ));

    let ambient = eng
        .services()
        .ambient(crystal)
        .map(|(sound, volume)| (sound.to_string(), volume));
    results.push(TestResult::new(
        "ambient_loop_started",
        matches!(&ambient, Some((sound, _)) if *sound == config.calm_loop_sound),
        format!("{ambient:?}"),
    ));

    let mut quiet = engine(TileAtmosphere::new(), seed);
    quiet.spawn_crystal(Transform::new(Vec3::ZERO, NO_GRID), certain);
    for _ in 0..10 {
        quiet.update(1.0);
    }
    results.push(TestResult::new(
        "anomaly_none_when_unpowered",
        quiet.anomaly_count() == 0,
        format!("{} anomalies", quiet.anomaly_count()),
    ));

    results
}
