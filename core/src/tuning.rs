//! Aggregated tuning knobs controlling every adjustable aspect of a session.
//!
//! Defaults reproduce the classic lawn: an 800x600 field holding a 9x5 grid of
//! 80 pixel cells, four waves of 3, 5, 7 and 10 enemies, and 500 starting sun.
//! Every table deserializes with `#[serde(default)]` so a configuration file
//! only needs to name the knobs it changes. Durations are carried in
//! milliseconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EnemyKind, LawnGrid, PixelPoint, PlantKind};

/// Aggregated tuning surface for the whole simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Field and grid geometry.
    pub lawn: LawnTuning,
    /// Starting resources.
    pub economy: EconomyTuning,
    /// Plant costs, health and behaviour timers.
    pub plants: PlantTuning,
    /// Enemy stats and attack pacing.
    pub enemies: EnemyTuning,
    /// Projectile speed and damage.
    pub projectile: ProjectileTuning,
    /// Pickup lifetime, falling and natural drop cadence.
    pub pickups: PickupTuning,
    /// Wave sizes and spawn pacing.
    pub waves: WaveTuning,
}

impl Tuning {
    /// Rejects configurations the simulation cannot run.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lawn.columns == 0 || self.lawn.rows == 0 {
            return Err(TuningError::EmptyGrid);
        }
        if !(self.lawn.cell_size > 0.0) {
            return Err(TuningError::NonPositiveCellSize(self.lawn.cell_size));
        }
        if self.waves.kinds.is_empty() && self.waves.counts.iter().any(|count| *count > 0) {
            return Err(TuningError::NoEnemyKinds);
        }
        if self.pickups.generated_fall_min > self.pickups.generated_fall_max {
            return Err(TuningError::InvertedFallRange {
                min: self.pickups.generated_fall_min,
                max: self.pickups.generated_fall_max,
            });
        }
        Ok(())
    }
}

/// Reasons a [`Tuning`] value is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TuningError {
    /// The grid has no cells.
    #[error("the lawn grid needs at least one column and one row")]
    EmptyGrid,
    /// Cells must have a positive size.
    #[error("cell size must be positive, got {0}")]
    NonPositiveCellSize(f32),
    /// Waves spawn enemies but no enemy kind is allowed.
    #[error("waves spawn enemies but no enemy kinds are configured")]
    NoEnemyKinds,
    /// The generator pickup fall range is inverted.
    #[error("generated pickup fall range is inverted ({min} > {max})")]
    InvertedFallRange {
        /// Configured minimum fall distance.
        min: f32,
        /// Configured maximum fall distance.
        max: f32,
    },
}

/// Field and grid geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LawnTuning {
    /// Width of the play field in pixels; projectiles past it are discarded.
    pub field_width: f32,
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Side length of a grid cell in pixels.
    pub cell_size: f32,
    /// Horizontal pixel position of the grid's left edge.
    pub origin_x: f32,
    /// Vertical pixel position of the grid's top edge.
    pub origin_y: f32,
    /// An enemy whose right edge is left of this x ends the session.
    pub loss_threshold_x: f32,
}

impl LawnTuning {
    /// Grid description derived from the geometry knobs.
    #[must_use]
    pub fn grid(&self) -> LawnGrid {
        LawnGrid::new(
            self.columns,
            self.rows,
            self.cell_size,
            PixelPoint::new(self.origin_x, self.origin_y),
        )
    }
}

impl Default for LawnTuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            columns: 9,
            rows: 5,
            cell_size: 80.0,
            origin_x: 0.0,
            origin_y: 80.0,
            loss_threshold_x: 80.0,
        }
    }
}

/// Starting resources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Balance granted when a session starts.
    pub starting_balance: u32,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            starting_balance: 500,
        }
    }
}

/// Cost and health of one plant kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantStats {
    /// Resource cost paid on placement.
    pub cost: u32,
    /// Health at placement.
    pub health: u32,
}

/// Plant tables and behaviour timers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantTuning {
    /// Generator cost and health.
    pub generator: PlantStats,
    /// Shooter cost and health.
    pub shooter: PlantStats,
    /// Blocker cost and health.
    pub blocker: PlantStats,
    /// Side length of a plant's square collision bounds.
    pub footprint: f32,
    /// Interval between generator pickups, in milliseconds.
    pub generator_interval_ms: u64,
    /// Value of each generator pickup.
    pub generator_value: u32,
    /// Minimum interval between shooter shots, in milliseconds.
    pub shooter_interval_ms: u64,
}

impl PlantTuning {
    /// Stats table entry for the provided kind.
    #[must_use]
    pub const fn stats(&self, kind: PlantKind) -> PlantStats {
        match kind {
            PlantKind::Generator => self.generator,
            PlantKind::Shooter => self.shooter,
            PlantKind::Blocker => self.blocker,
        }
    }

    /// Cost of the provided kind.
    #[must_use]
    pub const fn cost(&self, kind: PlantKind) -> u32 {
        self.stats(kind).cost
    }

    /// Interval between generator pickups.
    #[must_use]
    pub const fn generator_interval(&self) -> Duration {
        Duration::from_millis(self.generator_interval_ms)
    }

    /// Minimum interval between shooter shots.
    #[must_use]
    pub const fn shooter_interval(&self) -> Duration {
        Duration::from_millis(self.shooter_interval_ms)
    }
}

impl Default for PlantTuning {
    fn default() -> Self {
        Self {
            generator: PlantStats {
                cost: 50,
                health: 80,
            },
            shooter: PlantStats {
                cost: 100,
                health: 100,
            },
            blocker: PlantStats {
                cost: 50,
                health: 300,
            },
            footprint: 70.0,
            generator_interval_ms: 5_000,
            generator_value: 25,
            shooter_interval_ms: 2_000,
        }
    }
}

/// Health and walking speed of one enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Health at spawn.
    pub health: u32,
    /// Walking speed in pixels per second.
    pub speed: f32,
}

/// Enemy tables and attack pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Normal enemy stats.
    pub normal: EnemyStats,
    /// Armored enemy stats.
    pub armored: EnemyStats,
    /// Damage dealt per bite.
    pub damage: u32,
    /// Interval between bites, in milliseconds.
    pub attack_delay_ms: u64,
    /// Side length of an enemy's square collision bounds.
    pub footprint: f32,
    /// Distance right of the field edge where enemies spawn.
    pub spawn_margin: f32,
}

impl EnemyTuning {
    /// Stats table entry for the provided kind.
    #[must_use]
    pub const fn stats(&self, kind: EnemyKind) -> EnemyStats {
        match kind {
            EnemyKind::Normal => self.normal,
            EnemyKind::Armored => self.armored,
        }
    }

    /// Interval between bites.
    #[must_use]
    pub const fn attack_delay(&self) -> Duration {
        Duration::from_millis(self.attack_delay_ms)
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            normal: EnemyStats {
                health: 100,
                speed: 30.0,
            },
            armored: EnemyStats {
                health: 200,
                speed: 24.0,
            },
            damage: 25,
            attack_delay_ms: 1_000,
            footprint: 60.0,
            spawn_margin: 50.0,
        }
    }
}

/// Projectile speed and damage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Travel speed in pixels per second.
    pub speed: f32,
    /// Damage applied on hit.
    pub damage: u32,
    /// Side length of a projectile's square collision bounds.
    pub footprint: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 420.0,
            damage: 25,
            footprint: 12.0,
        }
    }
}

/// Pickup lifetime, falling and natural drop cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    /// Time a pickup stays collectible, in milliseconds.
    pub lifetime_ms: u64,
    /// Side length of a pickup's square hit region.
    pub footprint: f32,
    /// Falling speed in pixels per second.
    pub fall_speed: f32,
    /// Interval between natural drops, in milliseconds; zero disables them.
    pub natural_interval_ms: u64,
    /// Value of a natural drop.
    pub natural_value: u32,
    /// Horizontal margin kept clear at both field edges for natural drops.
    pub natural_margin: f32,
    /// Vertical position natural drops start falling from.
    pub natural_start_y: f32,
    /// Shortest fall of a generator pickup.
    pub generated_fall_min: f32,
    /// Longest fall of a generator pickup.
    pub generated_fall_max: f32,
}

impl PickupTuning {
    /// Time a pickup stays collectible.
    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }

    /// Interval between natural drops.
    #[must_use]
    pub const fn natural_interval(&self) -> Duration {
        Duration::from_millis(self.natural_interval_ms)
    }
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            lifetime_ms: 5_000,
            footprint: 30.0,
            fall_speed: 120.0,
            natural_interval_ms: 10_000,
            natural_value: 25,
            natural_margin: 50.0,
            natural_start_y: -30.0,
            generated_fall_min: 20.0,
            generated_fall_max: 50.0,
        }
    }
}

/// Wave sizes and spawn pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Delay between session start and the first wave, in milliseconds.
    pub initial_delay_ms: u64,
    /// Minimum interval between two spawns, in milliseconds.
    pub spawn_interval_ms: u64,
    /// Cap on concurrently live enemies.
    pub max_live: usize,
    /// Enemy count of each wave, in order.
    pub counts: Vec<u32>,
    /// Enemy kinds a wave may draw from.
    pub kinds: Vec<EnemyKind>,
}

impl WaveTuning {
    /// Delay between session start and the first wave.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Minimum interval between two spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            initial_delay_ms: 30_000,
            spawn_interval_ms: 3_000,
            max_live: 10,
            counts: vec![3, 5, 7, 10],
            kinds: EnemyKind::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let tuning: Tuning = toml::from_str(
            r#"
            [economy]
            starting_balance = 150

            [waves]
            counts = [1, 2]
            kinds = ["Armored"]
            "#,
        )
        .expect("parse tuning");

        assert_eq!(tuning.economy.starting_balance, 150);
        assert_eq!(tuning.waves.counts, vec![1, 2]);
        assert_eq!(tuning.waves.kinds, vec![EnemyKind::Armored]);
        assert_eq!(tuning.waves.spawn_interval(), Duration::from_secs(3));
        assert_eq!(tuning.lawn, LawnTuning::default());
        assert_eq!(tuning.plants.cost(PlantKind::Shooter), 100);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.lawn.rows = 0;
        assert_eq!(tuning.validate(), Err(TuningError::EmptyGrid));
    }

    #[test]
    fn waves_without_kinds_are_rejected() {
        let mut tuning = Tuning::default();
        tuning.waves.kinds.clear();
        assert_eq!(tuning.validate(), Err(TuningError::NoEnemyKinds));

        tuning.waves.counts = vec![0, 0];
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn default_grid_matches_field_layout() {
        let grid = LawnTuning::default().grid();
        assert_eq!(grid.columns(), 9);
        assert_eq!(grid.rows(), 5);
        assert!((grid.width() - 720.0).abs() < f32::EPSILON);
        assert!((grid.row_center(0) - 120.0).abs() < f32::EPSILON);
    }
}
