//! Authoritative plant state and per-tick plant behaviours.

use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use lawn_defence_core::{
    CellCoord, LawnGrid, PixelPoint, PixelRect, PlantId, PlantKind, PlantSnapshot, PlantTuning,
};

/// Timer state carried by each plant kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Behaviour {
    /// Time accumulated toward the next pickup.
    Generator { since_last: Duration },
    /// Time since the last shot, capped at the shooter interval.
    Shooter { since_last: Duration },
    /// No autonomous behaviour.
    Blocker,
}

impl Behaviour {
    fn for_kind(kind: PlantKind) -> Self {
        match kind {
            PlantKind::Generator => Self::Generator {
                since_last: Duration::ZERO,
            },
            PlantKind::Shooter => Self::Shooter {
                since_last: Duration::ZERO,
            },
            PlantKind::Blocker => Self::Blocker,
        }
    }
}

/// Work a plant asks the world to perform once the update pass completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SpawnRequest {
    /// Launch a projectile from the plant's center.
    Projectile { source: PlantId, origin: Vec2 },
    /// Produce a pickup at the plant's center.
    Pickup { origin: Vec2, value: u32 },
}

/// Plant stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Plant {
    pub(crate) id: PlantId,
    pub(crate) kind: PlantKind,
    pub(crate) cell: CellCoord,
    pub(crate) center: Vec2,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    behaviour: Behaviour,
}

impl Plant {
    fn new(id: PlantId, kind: PlantKind, cell: CellCoord, center: Vec2, tuning: &PlantTuning) -> Self {
        let health = tuning.stats(kind).health;
        Self {
            id,
            kind,
            cell,
            center,
            health,
            max_health: health,
            behaviour: Behaviour::for_kind(kind),
        }
    }

    /// Advances the plant's timers and reports any spawn it wants performed.
    ///
    /// `enemy_rows` holds the vertical center of every live enemy.
    pub(crate) fn update(
        &mut self,
        dt: Duration,
        tuning: &PlantTuning,
        grid: &LawnGrid,
        enemy_rows: &[f32],
    ) -> Option<SpawnRequest> {
        match &mut self.behaviour {
            Behaviour::Generator { since_last } => {
                let interval = tuning.generator_interval();
                if interval.is_zero() {
                    return None;
                }
                *since_last = since_last.saturating_add(dt);
                if *since_last < interval {
                    return None;
                }
                *since_last -= interval;
                Some(SpawnRequest::Pickup {
                    origin: self.center,
                    value: tuning.generator_value,
                })
            }
            Behaviour::Shooter { since_last } => {
                let interval = tuning.shooter_interval();
                *since_last = since_last.saturating_add(dt).min(interval);
                if *since_last < interval {
                    return None;
                }
                let row_y = self.center.y;
                if !enemy_rows.iter().any(|y| grid.shares_row(*y, row_y)) {
                    return None;
                }
                *since_last = Duration::ZERO;
                Some(SpawnRequest::Projectile {
                    source: self.id,
                    origin: self.center,
                })
            }
            Behaviour::Blocker => None,
        }
    }

    /// Reduces health, saturating at zero. Returns `true` once the plant is destroyed.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    pub(crate) fn bounds(&self, footprint: f32) -> PixelRect {
        PixelRect::square(PixelPoint::new(self.center.x, self.center.y), footprint)
    }

    pub(crate) fn snapshot(&self, footprint: f32) -> PlantSnapshot {
        PlantSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            bounds: self.bounds(footprint),
            health: self.health,
            max_health: self.max_health,
        }
    }
}

/// Registry that stores plants and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct PlantRegistry {
    entries: BTreeMap<PlantId, Plant>,
    next_plant_id: PlantId,
}

impl PlantRegistry {
    /// Creates an empty plant registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_plant_id: PlantId::new(0),
        }
    }

    /// Creates a plant and returns the identifier allocated to it.
    pub(crate) fn insert(
        &mut self,
        kind: PlantKind,
        cell: CellCoord,
        center: Vec2,
        tuning: &PlantTuning,
    ) -> PlantId {
        let id = self.next_plant_id;
        self.next_plant_id = PlantId::new(id.get().wrapping_add(1));
        let _ = self
            .entries
            .insert(id, Plant::new(id, kind, cell, center, tuning));
        id
    }

    pub(crate) fn get_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: PlantId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn remove(&mut self, id: PlantId) -> Option<Plant> {
        self.entries.remove(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Plant> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Plant> {
        self.entries.values_mut()
    }
}

/// Selects the plant an enemy occupying `bounds` should attack.
///
/// The rightmost overlapping plant wins, which is the first one a left-walking
/// enemy reaches; ties fall to the lowest identifier.
pub(crate) fn engaged_plant(
    bounds: &PixelRect,
    plants: &PlantRegistry,
    footprint: f32,
) -> Option<PlantId> {
    let mut best: Option<&Plant> = None;
    for plant in plants.iter() {
        if !plant.bounds(footprint).overlaps(bounds) {
            continue;
        }
        match best {
            Some(current) if current.center.x >= plant.center.x => {}
            _ => best = Some(plant),
        }
    }
    best.map(|plant| plant.id)
}
