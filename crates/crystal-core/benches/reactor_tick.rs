use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crystal_core::prelude::*;
use crystal_logic::config::ReactorConfig;
use crystal_logic::gas::{Gas, GasMixture};

fn engine_with_crystals(count: usize) -> ReactorEngine<TileAtmosphere, RecordingServices> {
    let air = GasMixture::default()
        .with_moles(Gas::Oxygen, 80.0)
        .with_moles(Gas::Nitrogen, 20.0)
        .with_temperature(280.0);
    let mut atmosphere = TileAtmosphere::new();
    atmosphere.fill(1, (0, 0), (count as i32 * 4, 4), &air);

    let mut engine = ReactorEngine::with_seed(atmosphere, RecordingServices::new(), 11);
    for i in 0..count {
        let x = i as f32 * 4.0 + 2.5;
        engine.spawn_crystal(
            Transform::new(Vec3::new(x, 2.5, 0.0), 1),
            ReactorConfig::default(),
        );
        engine
            .world
            .spawn((Transform::new(Vec3::new(x + 1.0, 2.5, 0.0), 1), Item));
    }
    engine
}

fn bench_reactor_tick(c: &mut Criterion) {
    c.bench_function("reactor_tick_16_crystals", |b| {
        let mut engine = engine_with_crystals(16);
        b.iter(|| {
            engine.update(black_box(1.0 / 60.0));
            engine.services_mut().clear();
        })
    });
}

criterion_group!(benches, bench_reactor_tick);
criterion_main!(benches);
