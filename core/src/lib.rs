#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lawn Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems and the session submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values.
//! Events that matter to a presentation layer are reduced to payload-free
//! [`Cue`] tags. Systems query immutable views and respond exclusively with new
//! command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod tuning;

pub use tuning::{
    EconomyTuning, EnemyStats, EnemyTuning, LawnTuning, PickupTuning, PlantStats, PlantTuning,
    ProjectileTuning, Tuning, TuningError, WaveTuning,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lawn Defence.";

/// Top-level state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Title menu; nothing is simulated.
    Menu,
    /// A wave run is in progress and ticks advance the world.
    Playing,
    /// An enemy breached the left boundary.
    GameOver,
    /// Every configured wave was cleared.
    Victory,
    /// Informational help screen reachable from the menu.
    Help,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock and updates every entity.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a plant on the provided grid cell.
    PlacePlant {
        /// Kind of plant to construct.
        kind: PlantKind,
        /// Cell that should host the plant.
        cell: CellCoord,
    },
    /// Requests that an enemy enter the lawn on the provided row.
    SpawnEnemy {
        /// Zero-based grid row the enemy walks along.
        row: u32,
        /// Variant of enemy to create.
        kind: EnemyKind,
    },
    /// Requests a natural pickup drop from above the field.
    DropPickup {
        /// Horizontal pixel position of the pickup's center.
        x: f32,
        /// Vertical pixel position where the pickup stops falling.
        rest_y: f32,
    },
    /// Requests collection of the first pickup under the provided point.
    CollectAt {
        /// Pointer position in field pixels.
        point: PixelPoint,
    },
    /// Applies a projectile's damage to an enemy and consumes the projectile.
    ResolveHit {
        /// Projectile that struck.
        projectile: ProjectileId,
        /// Enemy that was struck.
        enemy: EnemyId,
    },
    /// Refreshes an enemy's attack state from the latest overlap test.
    SetEnemyTarget {
        /// Enemy whose attack state is refreshed.
        enemy: EnemyId,
        /// Plant the enemy overlaps, or `None` when it should advance.
        target: Option<PlantId>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a plant was placed on the lawn.
    PlantPlaced {
        /// Identifier assigned to the plant.
        plant: PlantId,
        /// Kind of plant that was placed.
        kind: PlantKind,
        /// Cell the plant occupies.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected without mutating state.
    PlantPlacementRejected {
        /// Kind of plant requested.
        kind: PlantKind,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// An enemy bit a plant without destroying it.
    PlantBitten {
        /// Plant that took the bite.
        plant: PlantId,
        /// Kind of the bitten plant.
        kind: PlantKind,
        /// Enemy responsible for the bite.
        enemy: EnemyId,
    },
    /// A plant ran out of health and left the lawn.
    PlantDestroyed {
        /// Plant that was destroyed.
        plant: PlantId,
        /// Kind of the destroyed plant.
        kind: PlantKind,
        /// Cell the plant vacated.
        cell: CellCoord,
    },
    /// An enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Variant of the enemy.
        kind: EnemyKind,
        /// Row the enemy walks along.
        row: u32,
    },
    /// An enemy stopped to attack a plant.
    EnemyEngaged {
        /// Enemy that started attacking.
        enemy: EnemyId,
        /// Plant under attack.
        plant: PlantId,
    },
    /// A projectile struck an enemy.
    EnemyHit {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Variant of the struck enemy.
        kind: EnemyKind,
        /// Projectile consumed by the hit.
        projectile: ProjectileId,
    },
    /// An enemy ran out of health.
    EnemyDestroyed {
        /// Enemy that was destroyed.
        enemy: EnemyId,
        /// Variant of the destroyed enemy.
        kind: EnemyKind,
    },
    /// A shooter fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Plant that fired.
        plant: PlantId,
    },
    /// A projectile left the play field without hitting anything.
    ProjectileExpired {
        /// Projectile that was removed.
        projectile: ProjectileId,
    },
    /// A pickup appeared, either dropped from above or produced by a plant.
    PickupSpawned {
        /// Identifier assigned to the pickup.
        pickup: PickupId,
        /// Resource value granted on collection.
        value: u32,
    },
    /// A pickup was collected and its value credited.
    PickupCollected {
        /// Pickup that was collected.
        pickup: PickupId,
        /// Resource value credited to the balance.
        value: u32,
    },
    /// A pickup outlived its lifetime and vanished uncollected.
    PickupExpired {
        /// Pickup that vanished.
        pickup: PickupId,
    },
}

impl Event {
    /// Reduces the event to the presentation cue it should trigger, if any.
    #[must_use]
    pub const fn cue(&self) -> Option<Cue> {
        match *self {
            Self::PlantPlaced { kind, .. } => Some(Cue::PlantPlaced(kind)),
            Self::PlantBitten { kind, .. } => Some(Cue::PlantEaten(kind)),
            Self::PlantDestroyed { kind, .. } => Some(Cue::PlantDestroyed(kind)),
            Self::EnemyHit { kind, .. } => Some(Cue::EnemyHit(kind)),
            Self::EnemyDestroyed { kind, .. } => Some(Cue::EnemyDestroyed(kind)),
            Self::ProjectileFired { .. } => Some(Cue::ProjectileFired),
            Self::PickupCollected { .. } => Some(Cue::PickupCollected),
            Self::TimeAdvanced { .. }
            | Self::PlantPlacementRejected { .. }
            | Self::EnemySpawned { .. }
            | Self::EnemyEngaged { .. }
            | Self::ProjectileExpired { .. }
            | Self::PickupSpawned { .. }
            | Self::PickupExpired { .. } => None,
        }
    }
}

/// Payload-free tags consumed by audio and other presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// A plant of the given kind was placed.
    PlantPlaced(PlantKind),
    /// A pickup was collected.
    PickupCollected,
    /// A shooter fired.
    ProjectileFired,
    /// An enemy of the given kind was hit.
    EnemyHit(EnemyKind),
    /// A plant of the given kind was bitten.
    PlantEaten(PlantKind),
    /// A plant of the given kind was destroyed.
    PlantDestroyed(PlantKind),
    /// An enemy of the given kind was destroyed.
    EnemyDestroyed(EnemyKind),
    /// The session was lost.
    GameOver,
    /// The session was won.
    Victory,
    /// A menu transition was confirmed.
    MenuClick,
}

/// Plant variants that can be placed on the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlantKind {
    /// Periodically produces pickups at its own position.
    Generator,
    /// Fires projectiles along its row while an enemy shares the row.
    Shooter,
    /// Passive health pool that stalls enemies.
    Blocker,
}

impl PlantKind {
    /// Every plant kind in presentation order.
    pub const ALL: [Self; 3] = [Self::Generator, Self::Shooter, Self::Blocker];

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Shooter => "shooter",
            Self::Blocker => "blocker",
        }
    }
}

/// Enemy variants produced by the wave scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline enemy.
    Normal,
    /// Tougher and slightly slower enemy.
    Armored,
}

impl EnemyKind {
    /// Every enemy kind.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Armored];

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Armored => "armored",
        }
    }
}

/// Unique identifier assigned to a plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(u32);

impl PlantId {
    /// Creates a new plant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Continuous position on the play field measured in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal coordinate; grows to the right.
    pub x: f32,
    /// Vertical coordinate; grows downward.
    pub y: f32,
}

impl PixelPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in field pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl PixelRect {
    /// Builds a rectangle of the given size centered on `center`.
    #[must_use]
    pub fn centered(center: PixelPoint, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width / 2.0,
            top: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Builds a square of side `side` centered on `center`.
    #[must_use]
    pub fn square(center: PixelPoint, side: f32) -> Self {
        Self::centered(center, side, side)
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.top
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Reports whether the two rectangles share a region of positive area.
    ///
    /// Rectangles that merely touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Reports whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges exclusive.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

/// Describes the discrete cell layout of the lawn.
///
/// This is the single source of truth for pixel and cell conversion; placement,
/// row alignment of enemies, and shooter range checks all go through it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LawnGrid {
    columns: u32,
    rows: u32,
    cell_size: f32,
    origin: PixelPoint,
}

impl LawnGrid {
    /// Creates a new grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_size: f32, origin: PixelPoint) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            origin,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Pixel position of the grid's upper-left corner.
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        self.origin
    }

    /// Total width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Maps a pixel point to the cell underneath it.
    ///
    /// Points outside the grid, including non-finite ones, map to `None`.
    #[must_use]
    pub fn cell_at(&self, point: PixelPoint) -> Option<CellCoord> {
        let column = self.axis_index(point.x - self.origin.x, self.columns)?;
        let row = self.axis_index(point.y - self.origin.y, self.rows)?;
        Some(CellCoord::new(column, row))
    }

    /// Pixel center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> PixelPoint {
        PixelPoint::new(
            self.origin.x + (cell.column() as f32 + 0.5) * self.cell_size,
            self.row_center(cell.row()),
        )
    }

    /// Vertical pixel center of the provided row.
    #[must_use]
    pub fn row_center(&self, row: u32) -> f32 {
        self.origin.y + (row as f32 + 0.5) * self.cell_size
    }

    /// Row containing the vertical pixel position, if it lies on the grid.
    #[must_use]
    pub fn row_of(&self, y: f32) -> Option<u32> {
        self.axis_index(y - self.origin.y, self.rows)
    }

    /// Reports whether two vertical positions fall within half a cell of each other.
    #[must_use]
    pub fn shares_row(&self, first_y: f32, second_y: f32) -> bool {
        (first_y - second_y).abs() < self.cell_size / 2.0
    }

    fn axis_index(&self, offset: f32, count: u32) -> Option<u32> {
        if !(self.cell_size > 0.0) || !(offset >= 0.0) {
            return None;
        }
        let index = (offset / self.cell_size).floor();
        if index < count as f32 {
            Some(index as u32)
        } else {
            None
        }
    }
}

/// Reasons a plant placement request may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The balance does not cover the plant's cost.
    #[error("not enough resources to afford the plant")]
    InsufficientResources,
    /// Another plant already occupies the cell.
    #[error("the cell is already occupied")]
    CellOccupied,
    /// The cell lies outside the grid.
    #[error("the cell is outside the lawn")]
    OutOfBounds,
    /// No plant kind is selected.
    #[error("no plant is selected")]
    NoSelection,
    /// The session is not in the playing state.
    #[error("plants can only be placed while playing")]
    NotPlaying,
}

/// Attack state of an enemy as observed by presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackState {
    /// Walking toward the left boundary.
    Advancing,
    /// Stationary and biting the referenced plant.
    Attacking {
        /// Plant currently under attack.
        target: PlantId,
    },
}

impl AttackState {
    /// Reports whether the enemy is attacking.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        matches!(self, Self::Attacking { .. })
    }

    /// Plant currently targeted, if any.
    #[must_use]
    pub const fn target(&self) -> Option<PlantId> {
        match *self {
            Self::Advancing => None,
            Self::Attacking { target } => Some(target),
        }
    }
}

/// Immutable representation of a single plant's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantSnapshot {
    /// Identifier allocated to the plant.
    pub id: PlantId,
    /// Kind of plant.
    pub kind: PlantKind,
    /// Cell the plant occupies.
    pub cell: CellCoord,
    /// Collision bounds in field pixels.
    pub bounds: PixelRect,
    /// Remaining health.
    pub health: u32,
    /// Health at placement.
    pub max_health: u32,
}

/// Immutable representation of a single enemy's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier allocated to the enemy.
    pub id: EnemyId,
    /// Variant of the enemy.
    pub kind: EnemyKind,
    /// Row the enemy walks along.
    pub row: u32,
    /// Collision bounds in field pixels.
    pub bounds: PixelRect,
    /// Remaining health.
    pub health: u32,
    /// Health at spawn.
    pub max_health: u32,
    /// Whether the enemy is advancing or attacking.
    pub attack: AttackState,
}

/// Immutable representation of a single projectile's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Collision bounds in field pixels.
    pub bounds: PixelRect,
    /// Damage applied on hit.
    pub damage: u32,
}

/// Immutable representation of a single pickup's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Identifier allocated to the pickup.
    pub id: PickupId,
    /// Hit region used for collection.
    pub bounds: PixelRect,
    /// Resource value granted on collection.
    pub value: u32,
    /// Time left before the pickup vanishes.
    pub remaining: Duration,
}

/// Read-only snapshot describing all plants on the lawn.
#[derive(Clone, Debug, Default)]
pub struct PlantView {
    snapshots: Vec<PlantSnapshot>,
}

impl PlantView {
    /// Creates a new plant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlantSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured plant snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantSnapshot> {
        self.snapshots.iter()
    }

    /// Number of plants captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no plants were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlantSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of projectiles captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectiles were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all pickups awaiting collection.
#[derive(Clone, Debug, Default)]
pub struct PickupView {
    snapshots: Vec<PickupSnapshot>,
}

impl PickupView {
    /// Creates a new pickup view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PickupSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured pickup snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &PickupSnapshot> {
        self.snapshots.iter()
    }

    /// Number of pickups captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no pickups were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PickupSnapshot> {
        self.snapshots
    }
}

/// Phase of the wave scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Waiting for the initial delay to elapse.
    Idle,
    /// The one-based wave is spawning or being fought.
    Active {
        /// One-based index of the running wave.
        wave: u32,
    },
    /// Every configured wave spawned in full and was cleared.
    AllCleared,
}

/// Wave information surfaced to presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveProgress {
    /// Current scheduler phase.
    pub phase: WavePhase,
    /// One-based current wave, or zero before the first wave.
    pub wave: u32,
    /// Number of configured waves.
    pub final_wave: u32,
    /// Enemies still to be spawned in the current wave.
    pub remaining_to_spawn: u32,
    /// Time left before the first wave starts; zero once it has.
    pub time_until_first_wave: Duration,
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Session state.
    pub state: SessionState,
    /// Current resource balance.
    pub balance: u32,
    /// Plant kind armed for placement.
    pub selected: Option<PlantKind>,
    /// Session clock.
    pub elapsed: Duration,
    /// Lawn layout.
    pub grid: LawnGrid,
    /// Wave progress.
    pub wave: WaveProgress,
    /// Live plants.
    pub plants: PlantView,
    /// Live enemies.
    pub enemies: EnemyView,
    /// Projectiles in flight.
    pub projectiles: ProjectileView,
    /// Pickups awaiting collection.
    pub pickups: PickupView,
}
