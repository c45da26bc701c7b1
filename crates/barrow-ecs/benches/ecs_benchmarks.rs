//! Benchmarks for the core store and tick paths.
//!
//! Run with: `cargo bench --bench ecs_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use barrow_ecs::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a world with `entity_count` entities, each holding Position and
/// Health, all participating in the turn order.
fn setup_world(entity_count: usize) -> (World, Vec<Entity>) {
    let mut world = World::new();
    let mut entities = Vec::with_capacity(entity_count);
    for i in 0..entity_count {
        let entity = world.create_entity();
        world.set_component(
            entity,
            Position {
                x: i as i32,
                y: (i * 7 % 23) as i32,
            },
        );
        world.set_component(entity, Health { hp: 50, max_hp: 50 });
        world.add_to_turn_order(entity);
        entities.push(entity);
    }
    (world, entities)
}

/// A movement stage that consumes MoveIntent the way the pipeline systems do.
struct Shuffle;

impl System for Shuffle {
    fn name(&self) -> &str {
        "shuffle"
    }

    fn run(&mut self, world: &mut World) {
        for entity in world.entities_with(ComponentKind::MoveIntent) {
            let Some(intent) = world.take_component::<MoveIntent>(entity) else {
                continue;
            };
            if let Some(position) = world.get_component_mut::<Position>(entity) {
                position.x += intent.dx;
                position.y += intent.dy;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_component_set_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    for entity_count in [100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("set_and_get", entity_count),
            &entity_count,
            |b, &count| {
                let (mut world, entities) = setup_world(count);
                b.iter(|| {
                    for &entity in &entities {
                        world.set_component(entity, Strength { value: 5 });
                        black_box(world.get_component::<Strength>(entity));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for entity_count in [100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("entities_with", entity_count),
            &entity_count,
            |b, &count| {
                let (world, _) = setup_world(count);
                b.iter(|| black_box(world.entities_with(ComponentKind::Position)).len());
            },
        );
    }
    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for entity_count in [100usize, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("move_everyone", entity_count),
            &entity_count,
            |b, &count| {
                let (mut world, entities) = setup_world(count);
                world.add_system(Shuffle);
                b.iter(|| {
                    for &entity in &entities {
                        world.set_component(entity, MoveIntent { dx: 1, dy: 0 });
                    }
                    black_box(world.run_tick())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_component_set_get, bench_scan, bench_tick);
criterion_main!(benches);
