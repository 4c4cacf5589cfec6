#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Periodic natural pickup drops from above the lawn.

use std::time::Duration;

use lawn_defence_core::{Command, LawnTuning, PickupTuning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Pure system that emits [`Command::DropPickup`] on a fixed cadence.
#[derive(Debug)]
pub struct SunDrop {
    interval: Duration,
    accumulator: Duration,
    min_x: f32,
    max_x: f32,
    min_rest_y: f32,
    max_rest_y: f32,
    rng: ChaCha8Rng,
}

impl SunDrop {
    /// Creates a drop scheduler for the configured field.
    ///
    /// Drops land at a random x inside the horizontal margins and come to rest
    /// somewhere between the centers of the first and last lawn rows.
    #[must_use]
    pub fn new(pickups: &PickupTuning, lawn: &LawnTuning, seed: u64) -> Self {
        let grid = lawn.grid();
        Self {
            interval: pickups.natural_interval(),
            accumulator: Duration::ZERO,
            min_x: pickups.natural_margin,
            max_x: lawn.field_width - pickups.natural_margin,
            min_rest_y: grid.row_center(0),
            max_rest_y: grid.row_center(grid.rows().saturating_sub(1)),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Advances the cadence by `dt`, emitting at most one drop.
    pub fn handle(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if self.interval.is_zero() {
            return;
        }
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.accumulator < self.interval {
            return;
        }
        self.accumulator -= self.interval;

        let x = sample_between(&mut self.rng, self.min_x, self.max_x);
        let rest_y = sample_between(&mut self.rng, self.min_rest_y, self.max_rest_y);
        debug!(x, rest_y, "natural pickup dropped");
        out.push(Command::DropPickup { x, rest_y });
    }
}

/// Uniform sample from `[min, max]`, collapsing to `min` for empty ranges.
fn sample_between(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drops(sun: &mut SunDrop, total: Duration, step: Duration) -> Vec<Command> {
        let mut out = Vec::new();
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            sun.handle(step, &mut out);
            elapsed += step;
        }
        out
    }

    #[test]
    fn drops_once_per_interval_inside_the_field() {
        let mut sun = SunDrop::new(&PickupTuning::default(), &LawnTuning::default(), 11);
        let commands = drops(&mut sun, Duration::from_secs(35), Duration::from_millis(100));
        assert_eq!(commands.len(), 3);
        for command in commands {
            match command {
                Command::DropPickup { x, rest_y } => {
                    assert!((50.0..=750.0).contains(&x), "x {x} outside the margins");
                    assert!((120.0..=440.0).contains(&rest_y), "rest {rest_y} off the lawn");
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn zero_interval_disables_drops() {
        let tuning = PickupTuning {
            natural_interval_ms: 0,
            ..PickupTuning::default()
        };
        let mut sun = SunDrop::new(&tuning, &LawnTuning::default(), 11);
        assert!(drops(&mut sun, Duration::from_secs(60), Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn inverted_range_collapses_to_minimum() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(sample_between(&mut rng, 10.0, 5.0), 10.0);
        assert_eq!(sample_between(&mut rng, 3.0, 3.0), 3.0);
    }
}
