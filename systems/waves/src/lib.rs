#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduler responsible for emitting enemy spawn commands.
//!
//! The scheduler waits out an initial delay, then runs each configured wave in
//! turn. A wave spawns one enemy per spawn interval while the live cap allows,
//! and ends once every enemy it owes has spawned and the field is clear.

use std::time::Duration;

use lawn_defence_core::{Command, EnemyKind, WavePhase, WaveProgress, WaveTuning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Pure system that schedules waves and emits [`Command::SpawnEnemy`].
#[derive(Debug)]
pub struct Waves {
    initial_delay: Duration,
    spawn_interval: Duration,
    max_live: usize,
    counts: Vec<u32>,
    kinds: Vec<EnemyKind>,
    rows: u32,
    phase: WavePhase,
    elapsed: Duration,
    spawn_accumulator: Duration,
    spawned: u32,
    rng: ChaCha8Rng,
}

impl Waves {
    /// Creates a scheduler for a lawn with `rows` rows.
    #[must_use]
    pub fn new(tuning: &WaveTuning, rows: u32, seed: u64) -> Self {
        Self {
            initial_delay: tuning.initial_delay(),
            spawn_interval: tuning.spawn_interval(),
            max_live: tuning.max_live,
            counts: tuning.counts.clone(),
            kinds: tuning.kinds.clone(),
            rows,
            phase: WavePhase::Idle,
            elapsed: Duration::ZERO,
            spawn_accumulator: Duration::ZERO,
            spawned: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Advances the scheduler by `dt` given the number of enemies currently alive.
    ///
    /// At most one spawn command is emitted per call. Spawns blocked by the live
    /// cap are not queued.
    pub fn handle(&mut self, dt: Duration, live_enemies: usize, out: &mut Vec<Command>) {
        if self.phase == WavePhase::AllCleared {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        self.spawn_accumulator = self.spawn_accumulator.saturating_add(dt);

        if self.phase == WavePhase::Idle {
            if self.elapsed < self.initial_delay {
                return;
            }
            self.begin_wave(1);
        }

        let WavePhase::Active { wave } = self.phase else {
            return;
        };
        let target = self.target(wave);
        if self.spawned >= target && live_enemies == 0 {
            self.begin_wave(wave.saturating_add(1));
        }

        let WavePhase::Active { wave } = self.phase else {
            return;
        };
        if self.spawned >= self.target(wave)
            || live_enemies >= self.max_live
            || self.spawn_accumulator < self.spawn_interval
        {
            return;
        }
        if let Some(command) = self.next_spawn() {
            self.spawned += 1;
            self.spawn_accumulator = Duration::ZERO;
            out.push(command);
        }
    }

    /// Current scheduler phase.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Progress summary for presentation layers.
    #[must_use]
    pub fn progress(&self) -> WaveProgress {
        let final_wave = u32::try_from(self.counts.len()).unwrap_or(u32::MAX);
        let (wave, remaining_to_spawn) = match self.phase {
            WavePhase::Idle => (0, 0),
            WavePhase::Active { wave } => (wave, self.target(wave).saturating_sub(self.spawned)),
            WavePhase::AllCleared => (final_wave, 0),
        };
        let time_until_first_wave = match self.phase {
            WavePhase::Idle => self.initial_delay.saturating_sub(self.elapsed),
            WavePhase::Active { .. } | WavePhase::AllCleared => Duration::ZERO,
        };
        WaveProgress {
            phase: self.phase,
            wave,
            final_wave,
            remaining_to_spawn,
            time_until_first_wave,
        }
    }

    fn begin_wave(&mut self, wave: u32) {
        self.spawned = 0;
        let index = usize::try_from(wave).unwrap_or(usize::MAX);
        if index > self.counts.len() {
            self.phase = WavePhase::AllCleared;
            debug!(waves = self.counts.len(), "all waves cleared");
            return;
        }
        self.phase = WavePhase::Active { wave };
        debug!(wave, enemies = self.target(wave), "wave started");
    }

    fn target(&self, wave: u32) -> u32 {
        usize::try_from(wave)
            .ok()
            .and_then(|wave| wave.checked_sub(1))
            .and_then(|index| self.counts.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn next_spawn(&mut self) -> Option<Command> {
        if self.rows == 0 || self.kinds.is_empty() {
            return None;
        }
        let row = self.rng.gen_range(0..self.rows);
        let kind = self.kinds[self.rng.gen_range(0..self.kinds.len())];
        Some(Command::SpawnEnemy { row, kind })
    }
}
