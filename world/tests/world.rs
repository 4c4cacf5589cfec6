use std::time::Duration;

use lawn_defence_core::{
    AttackState, CellCoord, Command, EnemyId, EnemyKind, Event, PixelPoint, PlacementError,
    PlantKind, ProjectileId, Tuning,
};
use lawn_defence_world::{self as world, query, World};

fn fresh_world() -> World {
    World::new(Tuning::default(), 0x5eed)
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn tick_for(world: &mut World, total: Duration, step: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        world::apply(world, Command::Tick { dt: step }, &mut events);
        elapsed += step;
    }
    events
}

#[test]
fn placement_deducts_cost_and_occupies_cell() {
    let mut world = fresh_world();
    let cell = CellCoord::new(2, 2);

    let events = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Shooter,
            cell,
        },
    );

    assert!(matches!(
        events.as_slice(),
        [Event::PlantPlaced {
            kind: PlantKind::Shooter,
            cell: placed,
            ..
        }] if *placed == cell
    ));
    assert_eq!(query::balance(&world), 400);
    let plants = query::plant_view(&world).into_vec();
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0].bounds.center(), PixelPoint::new(200.0, 280.0));
    assert_eq!(query::plant_at(&world, cell), Some(plants[0].id));

    let events = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Shooter,
            cell,
        },
    );
    assert_eq!(
        events,
        vec![Event::PlantPlacementRejected {
            kind: PlantKind::Shooter,
            cell,
            reason: PlacementError::CellOccupied,
        }],
        "a second placement on the same cell must be rejected",
    );
    assert_eq!(query::balance(&world), 400, "rejections never charge");
}

#[test]
fn placement_checks_bounds_before_occupancy_before_cost() {
    let mut tuning = Tuning::default();
    tuning.economy.starting_balance = 50;
    let mut world = World::new(tuning, 1);

    assert_eq!(
        query::can_place(&world, CellCoord::new(0, 5), PlantKind::Shooter),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        query::can_place(&world, CellCoord::new(0, 0), PlantKind::Shooter),
        Err(PlacementError::InsufficientResources)
    );

    let _ = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Blocker,
            cell: CellCoord::new(0, 0),
        },
    );
    assert_eq!(query::balance(&world), 0);
    assert_eq!(
        query::can_place(&world, CellCoord::new(0, 0), PlantKind::Shooter),
        Err(PlacementError::CellOccupied),
        "occupancy is reported ahead of affordability",
    );
}

#[test]
fn lone_enemy_breaches_the_left_boundary() {
    let mut world = fresh_world();
    let events = run(
        &mut world,
        Command::SpawnEnemy {
            row: 0,
            kind: EnemyKind::Normal,
        },
    );
    assert_eq!(
        events,
        vec![Event::EnemySpawned {
            enemy: EnemyId::new(0),
            kind: EnemyKind::Normal,
            row: 0,
        }]
    );
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.bounds.center(), PixelPoint::new(850.0, 120.0));

    let step = Duration::from_millis(100);
    let _ = tick_for(&mut world, Duration::from_secs(26), step);
    assert!(!query::breached(&world), "enemy should still be on the lawn");

    let _ = tick_for(&mut world, Duration::from_secs(1), step);
    assert!(query::breached(&world), "enemy should have crossed the boundary");
}

#[test]
fn enemy_eats_through_a_generator_and_moves_on() {
    let mut world = fresh_world();
    let cell = CellCoord::new(3, 1);
    let _ = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Generator,
            cell,
        },
    );
    let _ = run(
        &mut world,
        Command::SpawnEnemy {
            row: 1,
            kind: EnemyKind::Normal,
        },
    );

    let events = tick_for(&mut world, Duration::from_secs(25), Duration::from_millis(100));

    let engaged = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyEngaged { .. }))
        .count();
    let bites = events
        .iter()
        .filter(|event| matches!(event, Event::PlantBitten { .. }))
        .count();
    let destroyed = events
        .iter()
        .filter(|event| matches!(event, Event::PlantDestroyed { kind: PlantKind::Generator, .. }))
        .count();
    assert_eq!(engaged, 1);
    assert_eq!(bites, 3, "80 health absorbs three 25 damage bites");
    assert_eq!(destroyed, 1);

    assert_eq!(query::plant_at(&world, cell), None, "cell must be vacated");
    assert_eq!(query::can_place(&world, cell, PlantKind::Blocker), Ok(()));
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.attack, AttackState::Advancing);
    assert!(enemy.bounds.center().x < 280.0, "enemy resumed walking");
}

#[test]
fn shooter_projectile_hits_and_is_consumed() {
    let mut world = fresh_world();
    let _ = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Shooter,
            cell: CellCoord::new(0, 2),
        },
    );
    let _ = run(
        &mut world,
        Command::SpawnEnemy {
            row: 2,
            kind: EnemyKind::Normal,
        },
    );

    let events = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(2),
        },
    );
    assert!(events.contains(&Event::ProjectileFired {
        projectile: ProjectileId::new(0),
        plant: query::plant_view(&world).into_vec()[0].id,
    }));
    assert_eq!(query::projectile_view(&world).len(), 1);

    let hit = Command::ResolveHit {
        projectile: ProjectileId::new(0),
        enemy: EnemyId::new(0),
    };
    let events = run(&mut world, hit.clone());
    assert_eq!(
        events,
        vec![Event::EnemyHit {
            enemy: EnemyId::new(0),
            kind: EnemyKind::Normal,
            projectile: ProjectileId::new(0),
        }]
    );
    assert!(query::projectile_view(&world).is_empty());
    assert_eq!(query::enemy_view(&world).into_vec()[0].health, 75);

    assert!(
        run(&mut world, hit).is_empty(),
        "a consumed projectile cannot hit twice"
    );
}

#[test]
fn unobstructed_projectile_leaves_the_field() {
    let mut world = fresh_world();
    let _ = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Shooter,
            cell: CellCoord::new(0, 4),
        },
    );
    let _ = run(
        &mut world,
        Command::SpawnEnemy {
            row: 4,
            kind: EnemyKind::Armored,
        },
    );

    let events = tick_for(&mut world, Duration::from_secs(4), Duration::from_millis(50));
    assert!(
        events.contains(&Event::ProjectileExpired {
            projectile: ProjectileId::new(0)
        }),
        "projectile should expire past the field edge",
    );
}

#[test]
fn natural_pickup_falls_and_is_collected_once() {
    let mut world = fresh_world();
    let events = run(
        &mut world,
        Command::DropPickup {
            x: 200.0,
            rest_y: 200.0,
        },
    );
    assert!(matches!(
        events.as_slice(),
        [Event::PickupSpawned { value: 25, .. }]
    ));
    let start = query::pickup_view(&world).into_vec()[0].bounds.center();
    assert_eq!(start, PixelPoint::new(200.0, -30.0));

    let _ = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(2),
        },
    );
    let point = PixelPoint::new(200.0, 200.0);
    let events = run(&mut world, Command::CollectAt { point });
    assert!(matches!(
        events.as_slice(),
        [Event::PickupCollected { value: 25, .. }]
    ));
    assert_eq!(query::balance(&world), 525);

    assert!(run(&mut world, Command::CollectAt { point }).is_empty());
    assert_eq!(query::balance(&world), 525, "a pickup is credited once");
}

#[test]
fn pickup_expires_one_millisecond_after_its_lifetime() {
    let mut world = fresh_world();
    let _ = run(
        &mut world,
        Command::DropPickup {
            x: 300.0,
            rest_y: 250.0,
        },
    );

    let _ = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(5_000),
        },
    );
    assert_eq!(query::pickup_view(&world).len(), 1, "still collectible at t0 + L");

    let events = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(1),
        },
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PickupExpired { .. })));
    assert!(query::pickup_view(&world).is_empty());

    let _ = run(
        &mut world,
        Command::CollectAt {
            point: PixelPoint::new(300.0, 250.0),
        },
    );
    assert_eq!(query::balance(&world), 500, "expired pickups grant nothing");
}

#[test]
fn set_enemy_target_reports_new_engagements_only() {
    let mut world = fresh_world();
    let _ = run(
        &mut world,
        Command::PlacePlant {
            kind: PlantKind::Blocker,
            cell: CellCoord::new(8, 0),
        },
    );
    let _ = run(
        &mut world,
        Command::SpawnEnemy {
            row: 0,
            kind: EnemyKind::Normal,
        },
    );
    let plant = query::plant_view(&world).into_vec()[0].id;
    let engage = Command::SetEnemyTarget {
        enemy: EnemyId::new(0),
        target: Some(plant),
    };

    assert_eq!(
        run(&mut world, engage.clone()),
        vec![Event::EnemyEngaged {
            enemy: EnemyId::new(0),
            plant,
        }]
    );
    assert!(run(&mut world, engage).is_empty());
    assert!(run(
        &mut world,
        Command::SetEnemyTarget {
            enemy: EnemyId::new(0),
            target: None,
        },
    )
    .is_empty());
    assert_eq!(
        query::enemy_view(&world).into_vec()[0].attack,
        AttackState::Advancing
    );
}
