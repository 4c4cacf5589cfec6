//! Enemy state and the advancing/attacking state machine.

use std::time::Duration;

use glam::Vec2;
use lawn_defence_core::{
    AttackState, EnemyId, EnemyKind, EnemySnapshot, EnemyTuning, PixelPoint, PixelRect, PlantId,
};

use crate::plants::{engaged_plant, PlantRegistry};

/// Outcome of a single enemy update that the world must act upon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EnemyAction {
    /// Nothing for the world to do.
    None,
    /// The enemy stopped walking and acquired the plant as its target.
    Engaged(PlantId),
    /// The enemy bites its target for the given damage.
    Bite { target: PlantId, damage: u32 },
}

/// Enemy stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) row: u32,
    pub(crate) position: Vec2,
    health: u32,
    max_health: u32,
    speed: f32,
    damage: u32,
    attack: AttackState,
    bite_cooldown: Duration,
}

impl Enemy {
    pub(crate) fn new(
        id: EnemyId,
        kind: EnemyKind,
        row: u32,
        position: Vec2,
        tuning: &EnemyTuning,
    ) -> Self {
        let stats = tuning.stats(kind);
        Self {
            id,
            kind,
            row,
            position,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: tuning.damage,
            attack: AttackState::Advancing,
            bite_cooldown: Duration::ZERO,
        }
    }

    /// Runs one step of the enemy state machine.
    ///
    /// The bite cooldown counts down in every state, so an enemy that reaches a
    /// fresh plant bites on its next update.
    pub(crate) fn update(
        &mut self,
        dt: Duration,
        tuning: &EnemyTuning,
        plants: &PlantRegistry,
        plant_footprint: f32,
    ) -> EnemyAction {
        self.bite_cooldown = self.bite_cooldown.saturating_sub(dt);

        match self.attack {
            AttackState::Advancing => {
                self.position.x -= self.speed * dt.as_secs_f32();
                let bounds = self.bounds(tuning.footprint);
                match engaged_plant(&bounds, plants, plant_footprint) {
                    Some(target) => {
                        self.attack = AttackState::Attacking { target };
                        EnemyAction::Engaged(target)
                    }
                    None => EnemyAction::None,
                }
            }
            AttackState::Attacking { target } => {
                if !plants.contains(target) {
                    self.attack = AttackState::Advancing;
                    return EnemyAction::None;
                }
                if !self.bite_cooldown.is_zero() {
                    return EnemyAction::None;
                }
                self.bite_cooldown = tuning.attack_delay();
                EnemyAction::Bite {
                    target,
                    damage: self.damage,
                }
            }
        }
    }

    /// Overrides the attack state. Returns `true` when this engages a new target.
    pub(crate) fn set_target(&mut self, target: Option<PlantId>) -> bool {
        let previous = self.attack.target();
        self.attack = match target {
            Some(target) => AttackState::Attacking { target },
            None => AttackState::Advancing,
        };
        target.is_some() && previous != target
    }

    /// Reduces health, saturating at zero. Returns `true` once the enemy is destroyed.
    pub(crate) fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    pub(crate) fn bounds(&self, footprint: f32) -> PixelRect {
        PixelRect::square(PixelPoint::new(self.position.x, self.position.y), footprint)
    }

    pub(crate) fn snapshot(&self, footprint: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            row: self.row,
            bounds: self.bounds(footprint),
            health: self.health,
            max_health: self.max_health,
            attack: self.attack,
        }
    }
}
