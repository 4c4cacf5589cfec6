#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lawn Defence.
//!
//! The world owns every entity registry. It is mutated exclusively through
//! [`apply`] and observed through the functions in [`query`].

mod economy;
mod enemies;
mod pickups;
mod plants;
mod projectiles;

use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use lawn_defence_core::{
    CellCoord, Command, EnemyId, EnemyKind, Event, LawnGrid, PickupId, PixelPoint, PlantId,
    PlantKind, ProjectileId, Tuning, WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use economy::Economy;
use enemies::{Enemy, EnemyAction};
use pickups::Pickup;
use plants::{PlantRegistry, SpawnRequest};
use projectiles::Projectile;

/// Represents the authoritative Lawn Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    grid: LawnGrid,
    occupancy: OccupancyGrid,
    plants: PlantRegistry,
    enemies: BTreeMap<EnemyId, Enemy>,
    next_enemy_id: EnemyId,
    projectiles: BTreeMap<ProjectileId, Projectile>,
    next_projectile_id: ProjectileId,
    pickups: BTreeMap<PickupId, Pickup>,
    next_pickup_id: PickupId,
    economy: Economy,
    rng: ChaCha8Rng,
    clock: Duration,
    tick_index: u64,
}

impl World {
    /// Creates an empty lawn configured by `tuning`.
    ///
    /// `seed` drives the world's own random choices, such as how far a
    /// generator pickup falls.
    #[must_use]
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let grid = tuning.lawn.grid();
        Self {
            banner: WELCOME_BANNER,
            occupancy: OccupancyGrid::new(grid.columns(), grid.rows()),
            plants: PlantRegistry::new(),
            enemies: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
            projectiles: BTreeMap::new(),
            next_projectile_id: ProjectileId::new(0),
            pickups: BTreeMap::new(),
            next_pickup_id: PickupId::new(0),
            economy: Economy::new(tuning.economy.starting_balance),
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock: Duration::ZERO,
            tick_index: 0,
            grid,
            tuning,
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let requests = self.update_plants(dt);
        self.update_enemies(dt, out_events);
        self.update_projectiles(dt, out_events);
        self.update_pickups(dt, out_events);
        for request in requests {
            self.fulfil(request, out_events);
        }

        trace!(
            tick = self.tick_index,
            plants = self.plants.iter().count(),
            enemies = self.enemies.len(),
            projectiles = self.projectiles.len(),
            pickups = self.pickups.len(),
            "world ticked"
        );
    }

    fn update_plants(&mut self, dt: Duration) -> Vec<SpawnRequest> {
        let enemy_rows: Vec<f32> = self.enemies.values().map(|enemy| enemy.position.y).collect();
        let mut requests = Vec::new();
        for plant in self.plants.iter_mut() {
            if let Some(request) = plant.update(dt, &self.tuning.plants, &self.grid, &enemy_rows) {
                requests.push(request);
            }
        }
        requests
    }

    fn update_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let plant_footprint = self.tuning.plants.footprint;
        for enemy in self.enemies.values_mut() {
            match enemy.update(dt, &self.tuning.enemies, &self.plants, plant_footprint) {
                EnemyAction::None => {}
                EnemyAction::Engaged(plant) => {
                    debug!(enemy = enemy.id.get(), plant = plant.get(), "enemy engaged plant");
                    out_events.push(Event::EnemyEngaged {
                        enemy: enemy.id,
                        plant,
                    });
                }
                EnemyAction::Bite { target, damage } => {
                    let Some(plant) = self.plants.get_mut(target) else {
                        continue;
                    };
                    if !plant.take_damage(damage) {
                        out_events.push(Event::PlantBitten {
                            plant: target,
                            kind: plant.kind,
                            enemy: enemy.id,
                        });
                        continue;
                    }
                    if let Some(destroyed) = self.plants.remove(target) {
                        self.occupancy.vacate(destroyed.cell);
                        debug!(
                            plant = target.get(),
                            kind = destroyed.kind.label(),
                            enemy = enemy.id.get(),
                            "plant destroyed"
                        );
                        out_events.push(Event::PlantDestroyed {
                            plant: target,
                            kind: destroyed.kind,
                            cell: destroyed.cell,
                        });
                    }
                    let _ = enemy.set_target(None);
                }
            }
        }
    }

    fn update_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let footprint = self.tuning.projectile.footprint;
        let field_width = self.tuning.lawn.field_width;
        let mut departed = Vec::new();
        for projectile in self.projectiles.values_mut() {
            projectile.advance(dt);
            if projectile.left_field(footprint, field_width) {
                departed.push(projectile.id);
            }
        }
        for projectile in departed {
            let _ = self.projectiles.remove(&projectile);
            out_events.push(Event::ProjectileExpired { projectile });
        }
    }

    fn update_pickups(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let fall_speed = self.tuning.pickups.fall_speed;
        let mut expired = Vec::new();
        for pickup in self.pickups.values_mut() {
            if pickup.update(dt, fall_speed) {
                expired.push(pickup.id);
            }
        }
        for pickup in expired {
            let _ = self.pickups.remove(&pickup);
            out_events.push(Event::PickupExpired { pickup });
        }
    }

    fn fulfil(&mut self, request: SpawnRequest, out_events: &mut Vec<Event>) {
        match request {
            SpawnRequest::Projectile { source, origin } => {
                let id = self.next_projectile_id;
                self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
                let velocity = Vec2::new(self.tuning.projectile.speed, 0.0);
                let projectile =
                    Projectile::new(id, origin, velocity, self.tuning.projectile.damage);
                let _ = self.projectiles.insert(id, projectile);
                out_events.push(Event::ProjectileFired {
                    projectile: id,
                    plant: source,
                });
            }
            SpawnRequest::Pickup { origin, value } => {
                let rest_y = origin.y + self.generated_fall();
                self.spawn_pickup(origin, rest_y, value, out_events);
            }
        }
    }

    fn generated_fall(&mut self) -> f32 {
        let min = self.tuning.pickups.generated_fall_min;
        let max = self.tuning.pickups.generated_fall_max;
        if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }

    fn spawn_pickup(&mut self, origin: Vec2, rest_y: f32, value: u32, out_events: &mut Vec<Event>) {
        let id = self.next_pickup_id;
        self.next_pickup_id = PickupId::new(id.get().wrapping_add(1));
        let pickup = Pickup::new(id, origin, rest_y, value, self.tuning.pickups.lifetime());
        let _ = self.pickups.insert(id, pickup);
        debug!(pickup = id.get(), value, "pickup spawned");
        out_events.push(Event::PickupSpawned { pickup: id, value });
    }

    fn place_plant(&mut self, kind: PlantKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = query::can_place(self, cell, kind) {
            debug!(kind = kind.label(), ?cell, %reason, "placement rejected");
            out_events.push(Event::PlantPlacementRejected { kind, cell, reason });
            return;
        }
        if !self.economy.spend(self.tuning.plants.cost(kind)) {
            return;
        }
        let center = self.grid.cell_center(cell);
        let plant = self.plants.insert(
            kind,
            cell,
            Vec2::new(center.x, center.y),
            &self.tuning.plants,
        );
        self.occupancy.occupy(plant, cell);
        debug!(
            plant = plant.get(),
            kind = kind.label(),
            ?cell,
            balance = self.economy.balance(),
            "plant placed"
        );
        out_events.push(Event::PlantPlaced { plant, kind, cell });
    }

    fn spawn_enemy(&mut self, row: u32, kind: EnemyKind, out_events: &mut Vec<Event>) {
        if row >= self.grid.rows() {
            warn!(row, rows = self.grid.rows(), "ignoring enemy spawn outside the lawn");
            return;
        }
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().wrapping_add(1));
        let position = Vec2::new(
            self.tuning.lawn.field_width + self.tuning.enemies.spawn_margin,
            self.grid.row_center(row),
        );
        let _ = self
            .enemies
            .insert(id, Enemy::new(id, kind, row, position, &self.tuning.enemies));
        debug!(enemy = id.get(), kind = kind.label(), row, "enemy spawned");
        out_events.push(Event::EnemySpawned {
            enemy: id,
            kind,
            row,
        });
    }

    fn collect_at(&mut self, point: PixelPoint, out_events: &mut Vec<Event>) {
        let footprint = self.tuning.pickups.footprint;
        let Some(pickup) = self
            .pickups
            .values()
            .find(|pickup| pickup.bounds(footprint).contains(point))
            .map(|pickup| pickup.id)
        else {
            return;
        };
        if let Some(collected) = self.pickups.remove(&pickup) {
            self.economy.add(collected.value);
            debug!(
                pickup = pickup.get(),
                value = collected.value,
                balance = self.economy.balance(),
                "pickup collected"
            );
            out_events.push(Event::PickupCollected {
                pickup,
                value: collected.value,
            });
        }
    }

    fn resolve_hit(&mut self, projectile: ProjectileId, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if !self.enemies.contains_key(&enemy) {
            return;
        }
        let Some(consumed) = self.projectiles.remove(&projectile) else {
            return;
        };
        let Some(target) = self.enemies.get_mut(&enemy) else {
            return;
        };
        let destroyed = target.take_damage(consumed.damage);
        let kind = target.kind;
        out_events.push(Event::EnemyHit {
            enemy,
            kind,
            projectile,
        });
        if destroyed {
            let _ = self.enemies.remove(&enemy);
            debug!(enemy = enemy.get(), kind = kind.label(), "enemy destroyed");
            out_events.push(Event::EnemyDestroyed { enemy, kind });
        }
    }

    fn set_enemy_target(
        &mut self,
        enemy: EnemyId,
        target: Option<PlantId>,
        out_events: &mut Vec<Event>,
    ) {
        let target = target.filter(|plant| self.plants.contains(*plant));
        let Some(entry) = self.enemies.get_mut(&enemy) else {
            return;
        };
        if entry.set_target(target) {
            if let Some(plant) = target {
                out_events.push(Event::EnemyEngaged { enemy, plant });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::PlacePlant { kind, cell } => world.place_plant(kind, cell, out_events),
        Command::SpawnEnemy { row, kind } => world.spawn_enemy(row, kind, out_events),
        Command::DropPickup { x, rest_y } => {
            let origin = Vec2::new(x, world.tuning.pickups.natural_start_y);
            let value = world.tuning.pickups.natural_value;
            world.spawn_pickup(origin, rest_y, value, out_events);
        }
        Command::CollectAt { point } => world.collect_at(point, out_events),
        Command::ResolveHit { projectile, enemy } => {
            world.resolve_hit(projectile, enemy, out_events);
        }
        Command::SetEnemyTarget { enemy, target } => {
            world.set_enemy_target(enemy, target, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use lawn_defence_core::{
        CellCoord, EnemyView, LawnGrid, PickupView, PlacementError, PlantId, PlantKind, PlantView,
        ProjectileView, Tuning,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Provides read-only access to the lawn layout.
    #[must_use]
    pub fn grid(world: &World) -> &LawnGrid {
        &world.grid
    }

    /// Current resource balance.
    #[must_use]
    pub fn balance(world: &World) -> u32 {
        world.economy.balance()
    }

    /// Simulated time accumulated across every tick.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Number of ticks applied so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Checks whether a plant of `kind` could be placed on `cell` right now.
    ///
    /// Bounds are checked first, then occupancy, then affordability.
    pub fn can_place(world: &World, cell: CellCoord, kind: PlantKind) -> Result<(), PlacementError> {
        if !world.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if !world.occupancy.is_free(cell) {
            return Err(PlacementError::CellOccupied);
        }
        if !world.economy.can_afford(world.tuning.plants.cost(kind)) {
            return Err(PlacementError::InsufficientResources);
        }
        Ok(())
    }

    /// Plant occupying `cell`, if any.
    #[must_use]
    pub fn plant_at(world: &World, cell: CellCoord) -> Option<PlantId> {
        world.occupancy.occupant(cell)
    }

    /// Captures a read-only view of the plants on the lawn.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        let footprint = world.tuning.plants.footprint;
        PlantView::from_snapshots(
            world
                .plants
                .iter()
                .map(|plant| plant.snapshot(footprint))
                .collect(),
        )
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let footprint = world.tuning.enemies.footprint;
        EnemyView::from_snapshots(
            world
                .enemies
                .values()
                .map(|enemy| enemy.snapshot(footprint))
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let footprint = world.tuning.projectile.footprint;
        ProjectileView::from_snapshots(
            world
                .projectiles
                .values()
                .map(|projectile| projectile.snapshot(footprint))
                .collect(),
        )
    }

    /// Captures a read-only view of the pickups awaiting collection.
    #[must_use]
    pub fn pickup_view(world: &World) -> PickupView {
        let footprint = world.tuning.pickups.footprint;
        PickupView::from_snapshots(
            world
                .pickups
                .values()
                .map(|pickup| pickup.snapshot(footprint))
                .collect(),
        )
    }

    /// Number of enemies currently on the field.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Reports whether any enemy's right edge crossed the loss threshold.
    #[must_use]
    pub fn breached(world: &World) -> bool {
        let footprint = world.tuning.enemies.footprint;
        let threshold = world.tuning.lawn.loss_threshold_x;
        world
            .enemies
            .values()
            .any(|enemy| enemy.bounds(footprint).right() < threshold)
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<PlantId>>,
}

impl OccupancyGrid {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    fn is_free(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_none()
    }

    fn occupant(&self, cell: CellCoord) -> Option<PlantId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn occupy(&mut self, plant: PlantId, cell: CellCoord) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = Some(plant);
        }
    }

    fn vacate(&mut self, cell: CellCoord) {
        if let Some(slot) = self.index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = None;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
