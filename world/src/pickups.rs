//! Collectible resource pickups.

use std::time::Duration;

use glam::Vec2;
use lawn_defence_core::{PickupId, PickupSnapshot, PixelPoint, PixelRect};

/// Pickup stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Pickup {
    pub(crate) id: PickupId,
    position: Vec2,
    rest_y: f32,
    pub(crate) value: u32,
    age: Duration,
    lifetime: Duration,
}

impl Pickup {
    pub(crate) fn new(
        id: PickupId,
        position: Vec2,
        rest_y: f32,
        value: u32,
        lifetime: Duration,
    ) -> Self {
        Self {
            id,
            position,
            rest_y,
            value,
            age: Duration::ZERO,
            lifetime,
        }
    }

    /// Falls toward the resting height and ages the pickup.
    ///
    /// Returns `true` once the pickup has outlived its lifetime.
    pub(crate) fn update(&mut self, dt: Duration, fall_speed: f32) -> bool {
        if self.position.y < self.rest_y {
            self.position.y = (self.position.y + fall_speed * dt.as_secs_f32()).min(self.rest_y);
        }
        self.age = self.age.saturating_add(dt);
        self.age > self.lifetime
    }

    pub(crate) fn bounds(&self, footprint: f32) -> PixelRect {
        PixelRect::square(PixelPoint::new(self.position.x, self.position.y), footprint)
    }

    pub(crate) fn snapshot(&self, footprint: f32) -> PickupSnapshot {
        PickupSnapshot {
            id: self.id,
            bounds: self.bounds(footprint),
            value: self.value,
            remaining: self.lifetime.saturating_sub(self.age),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pickup_falls_and_stops_at_rest_height() {
        let mut pickup = Pickup::new(
            PickupId::new(0),
            Vec2::new(100.0, -30.0),
            60.0,
            25,
            Duration::from_secs(5),
        );
        assert!(!pickup.update(Duration::from_millis(500), 120.0));
        assert!((pickup.bounds(30.0).center().y - 30.0).abs() < 1e-3);
        assert!(!pickup.update(Duration::from_secs(1), 120.0));
        assert!((pickup.bounds(30.0).center().y - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn pickup_expires_strictly_after_its_lifetime() {
        let mut pickup = Pickup::new(
            PickupId::new(0),
            Vec2::ZERO,
            0.0,
            25,
            Duration::from_millis(100),
        );
        assert!(!pickup.update(Duration::from_millis(100), 120.0));
        assert_eq!(pickup.snapshot(30.0).remaining, Duration::ZERO);
        assert!(pickup.update(Duration::from_millis(1), 120.0));
    }
}
