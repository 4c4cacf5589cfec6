//! Projectiles in flight.

use std::time::Duration;

use glam::Vec2;
use lawn_defence_core::{PixelPoint, PixelRect, ProjectileId, ProjectileSnapshot};

/// Projectile stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: Vec2,
    velocity: Vec2,
    pub(crate) damage: u32,
}

impl Projectile {
    pub(crate) fn new(id: ProjectileId, position: Vec2, velocity: Vec2, damage: u32) -> Self {
        Self {
            id,
            position,
            velocity,
            damage,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.position += self.velocity * dt.as_secs_f32();
    }

    /// Reports whether the projectile's left edge has passed the field's right edge.
    pub(crate) fn left_field(&self, footprint: f32, field_width: f32) -> bool {
        self.bounds(footprint).left() > field_width
    }

    pub(crate) fn bounds(&self, footprint: f32) -> PixelRect {
        PixelRect::square(PixelPoint::new(self.position.x, self.position.y), footprint)
    }

    pub(crate) fn snapshot(&self, footprint: f32) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            bounds: self.bounds(footprint),
            damage: self.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectile_travels_along_its_velocity() {
        let mut projectile =
            Projectile::new(ProjectileId::new(3), Vec2::new(100.0, 120.0), Vec2::new(420.0, 0.0), 25);
        projectile.advance(Duration::from_millis(500));
        assert!((projectile.position.x - 310.0).abs() < 1e-3);
        assert!((projectile.position.y - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn projectile_leaves_field_once_fully_past_the_edge() {
        let inside = Projectile::new(ProjectileId::new(0), Vec2::new(805.0, 0.0), Vec2::ZERO, 25);
        let outside = Projectile::new(ProjectileId::new(1), Vec2::new(807.0, 0.0), Vec2::ZERO, 25);
        assert!(!inside.left_field(12.0, 800.0));
        assert!(outside.left_field(12.0, 800.0));
    }
}
