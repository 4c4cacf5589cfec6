#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Play session orchestration for Lawn Defence.
//!
//! A [`Session`] owns the state machine that moves between the menu, play and
//! outcome screens. While playing, each [`Session::tick`] runs the wave
//! scheduler and natural drops, advances the world, resolves combat and then
//! evaluates the loss and victory predicates, in that order. Presentation
//! layers read [`Session::snapshot`] and drain [`Session::drain_cues`].

mod seed;

use std::time::Duration;

use lawn_defence_core::{
    CellCoord, Command, Cue, Event, PixelPoint, PlacementError, PlantId, PlantKind, SessionState,
    Snapshot, Tuning, TuningError, WavePhase,
};
use lawn_defence_system_combat::Combat;
use lawn_defence_system_sun_drop::SunDrop;
use lawn_defence_system_waves::Waves;
use lawn_defence_world::{self as world, query, World};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by session controls.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SessionError {
    /// The requested transition is not allowed from the current state.
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// State the session was in.
        from: SessionState,
        /// State that was requested.
        to: SessionState,
    },
    /// The tuning cannot drive a session.
    #[error("invalid tuning: {0}")]
    InvalidTuning(#[from] TuningError),
}

/// Result of a pointer click on the play field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A pickup under the pointer was collected.
    Collected {
        /// Value credited to the balance.
        value: u32,
    },
    /// The selected plant was placed on the cell under the pointer.
    Placed {
        /// Identifier of the new plant.
        plant: PlantId,
    },
    /// Nothing was under the pointer, or no plant was selected.
    Ignored,
}

/// Live simulation state of one run.
#[derive(Debug)]
struct Run {
    world: World,
    waves: Waves,
    sun_drop: SunDrop,
    combat: Combat,
}

impl Run {
    fn new(tuning: &Tuning, base_seed: u64, index: u64) -> Self {
        let world_seed = seed::derive_run_seed(base_seed, index, seed::WORLD_STREAM);
        let waves_seed = seed::derive_run_seed(base_seed, index, seed::WAVES_STREAM);
        let drop_seed = seed::derive_run_seed(base_seed, index, seed::SUN_DROP_STREAM);
        Self {
            world: World::new(tuning.clone(), world_seed),
            waves: Waves::new(&tuning.waves, tuning.lawn.rows, waves_seed),
            sun_drop: SunDrop::new(&tuning.pickups, &tuning.lawn, drop_seed),
            combat: Combat::new(),
        }
    }
}

/// A single player's session: state machine, active run and cue stream.
#[derive(Debug)]
pub struct Session {
    tuning: Tuning,
    seed: u64,
    runs_started: u64,
    state: SessionState,
    selected: Option<PlantKind>,
    run: Run,
    cues: Vec<Cue>,
    commands: Vec<Command>,
}

impl Session {
    /// Creates a session sitting on the menu.
    ///
    /// Every run started from this session derives its random streams from
    /// `seed`, so identical inputs replay identically.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, SessionError> {
        tuning.validate()?;
        let run = Run::new(&tuning, seed, 0);
        Ok(Self {
            tuning,
            seed,
            runs_started: 0,
            state: SessionState::Menu,
            selected: None,
            run,
            cues: Vec::new(),
            commands: Vec::new(),
        })
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Plant kind armed for placement.
    #[must_use]
    pub const fn selected(&self) -> Option<PlantKind> {
        self.selected
    }

    /// Tuning the session was created with.
    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Leaves the menu and starts a fresh run.
    pub fn start_session(&mut self) -> Result<(), SessionError> {
        self.require(&[SessionState::Menu], SessionState::Playing)?;
        self.cues.push(Cue::MenuClick);
        self.begin_run();
        Ok(())
    }

    /// Starts a fresh run after a loss or a win.
    pub fn restart_session(&mut self) -> Result<(), SessionError> {
        self.require(
            &[SessionState::GameOver, SessionState::Victory],
            SessionState::Playing,
        )?;
        self.begin_run();
        Ok(())
    }

    /// Abandons the current run or leaves the help screen.
    pub fn return_to_menu(&mut self) -> Result<(), SessionError> {
        self.require(&[SessionState::Playing, SessionState::Help], SessionState::Menu)?;
        self.transition(SessionState::Menu);
        self.selected = None;
        Ok(())
    }

    /// Opens the help screen from the menu.
    pub fn show_help(&mut self) -> Result<(), SessionError> {
        self.require(&[SessionState::Menu], SessionState::Help)?;
        self.cues.push(Cue::MenuClick);
        self.transition(SessionState::Help);
        Ok(())
    }

    /// Arms `kind` for placement.
    ///
    /// Selecting the kind that is already armed clears the selection. A kind
    /// the balance cannot cover is rejected.
    pub fn select_plant(&mut self, kind: PlantKind) -> Result<(), PlacementError> {
        if self.state != SessionState::Playing {
            return Err(PlacementError::NotPlaying);
        }
        if self.selected == Some(kind) {
            self.selected = None;
            return Ok(());
        }
        if self.tuning.plants.cost(kind) > query::balance(&self.run.world) {
            return Err(PlacementError::InsufficientResources);
        }
        self.selected = Some(kind);
        Ok(())
    }

    /// Clears the armed plant kind.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Places the armed plant kind on `cell`.
    ///
    /// The selection stays armed after a successful placement.
    pub fn attempt_place(&mut self, cell: CellCoord) -> Result<PlantId, PlacementError> {
        if self.state != SessionState::Playing {
            return Err(PlacementError::NotPlaying);
        }
        let kind = self.selected.ok_or(PlacementError::NoSelection)?;
        let events = self.dispatch(Command::PlacePlant { kind, cell });
        events
            .iter()
            .find_map(|event| match event {
                Event::PlantPlaced { plant, .. } => Some(Ok(*plant)),
                Event::PlantPlacementRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(PlacementError::OutOfBounds))
    }

    /// Collects the pickup under `point`, returning the value credited.
    pub fn attempt_collect(&mut self, point: PixelPoint) -> Option<u32> {
        if self.state != SessionState::Playing {
            return None;
        }
        let events = self.dispatch(Command::CollectAt { point });
        events.iter().find_map(|event| match event {
            Event::PickupCollected { value, .. } => Some(*value),
            _ => None,
        })
    }

    /// Handles a pointer click: pickups take priority over placement.
    pub fn click(&mut self, point: PixelPoint) -> Result<ClickOutcome, PlacementError> {
        if self.state != SessionState::Playing {
            return Err(PlacementError::NotPlaying);
        }
        if let Some(value) = self.attempt_collect(point) {
            return Ok(ClickOutcome::Collected { value });
        }
        let Some(cell) = query::grid(&self.run.world).cell_at(point) else {
            return Ok(ClickOutcome::Ignored);
        };
        if self.selected.is_none() {
            return Ok(ClickOutcome::Ignored);
        }
        self.attempt_place(cell)
            .map(|plant| ClickOutcome::Placed { plant })
    }

    /// Advances the active run by `elapsed_ms` milliseconds.
    ///
    /// Outside of play the call is ignored.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.state != SessionState::Playing {
            return;
        }
        let dt = Duration::from_millis(elapsed_ms);
        let wave_before = self.run.waves.progress().wave;

        let live = query::live_enemy_count(&self.run.world);
        self.commands.clear();
        self.run.waves.handle(dt, live, &mut self.commands);
        self.run.sun_drop.handle(dt, &mut self.commands);
        self.flush_commands();

        let _ = self.dispatch(Command::Tick { dt });

        self.run.combat.handle(
            &query::projectile_view(&self.run.world),
            &query::enemy_view(&self.run.world),
            &query::plant_view(&self.run.world),
            &mut self.commands,
        );
        self.flush_commands();

        let progress = self.run.waves.progress();
        if progress.wave != wave_before && progress.phase != WavePhase::AllCleared {
            info!(
                wave = progress.wave,
                final_wave = progress.final_wave,
                enemies = progress.remaining_to_spawn,
                "wave incoming"
            );
        }

        if query::breached(&self.run.world) {
            self.cues.push(Cue::GameOver);
            info!(elapsed = ?query::clock(&self.run.world), "an enemy reached the house");
            self.transition(SessionState::GameOver);
        } else if progress.phase == WavePhase::AllCleared
            && query::live_enemy_count(&self.run.world) == 0
        {
            self.cues.push(Cue::Victory);
            info!(elapsed = ?query::clock(&self.run.world), "every wave repelled");
            self.transition(SessionState::Victory);
        }
    }

    /// Everything a presentation layer needs to draw the current frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let world = &self.run.world;
        Snapshot {
            state: self.state,
            balance: query::balance(world),
            selected: self.selected,
            elapsed: query::clock(world),
            grid: *query::grid(world),
            wave: self.run.waves.progress(),
            plants: query::plant_view(world),
            enemies: query::enemy_view(world),
            projectiles: query::projectile_view(world),
            pickups: query::pickup_view(world),
        }
    }

    /// Takes every cue produced since the previous drain, oldest first.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    fn require(&self, allowed: &[SessionState], to: SessionState) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.state,
                to,
            })
        }
    }

    fn transition(&mut self, to: SessionState) {
        info!(from = ?self.state, to = ?to, "session state changed");
        self.state = to;
    }

    fn begin_run(&mut self) {
        self.runs_started = self.runs_started.saturating_add(1);
        self.run = Run::new(&self.tuning, self.seed, self.runs_started);
        self.selected = None;
        info!(run = self.runs_started, seed = self.seed, "run started");
        self.transition(SessionState::Playing);
    }

    fn flush_commands(&mut self) {
        let commands = std::mem::take(&mut self.commands);
        for command in commands {
            let _ = self.dispatch(command);
        }
    }

    fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.run.world, command, &mut events);
        for event in &events {
            if let Some(cue) = event.cue() {
                self.cues.push(cue);
            }
            if let Event::PlantPlacementRejected { reason, .. } = event {
                debug!(%reason, "placement rejected");
            }
        }
        events
    }
}
