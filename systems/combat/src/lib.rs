#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves collisions after entity updates.
//!
//! The first pass pairs projectiles with the enemies they strike. The second
//! refreshes every surviving enemy's attack state from plant overlaps.

use lawn_defence_core::{
    Command, EnemyId, EnemyView, PixelRect, PlantId, PlantView, ProjectileView,
};

/// Combat system that queues hit and targeting commands.
#[derive(Debug, Default)]
pub struct Combat {
    survivors: Vec<Contender>,
    scratch: Vec<Command>,
}

#[derive(Clone, Copy, Debug)]
struct Contender {
    id: EnemyId,
    bounds: PixelRect,
    health: u32,
    target: Option<PlantId>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::ResolveHit` for every projectile that strikes an enemy,
    /// followed by `Command::SetEnemyTarget` for every surviving enemy whose
    /// attack target changed.
    pub fn handle(
        &mut self,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        plants: &PlantView,
        out: &mut Vec<Command>,
    ) {
        if enemies.is_empty() {
            return;
        }

        self.survivors.clear();
        self.survivors.extend(enemies.iter().map(|enemy| Contender {
            id: enemy.id,
            bounds: enemy.bounds,
            health: enemy.health,
            target: enemy.attack.target(),
        }));
        self.scratch.clear();

        for projectile in projectiles.iter() {
            let struck = self
                .survivors
                .iter_mut()
                .find(|enemy| enemy.health > 0 && enemy.bounds.overlaps(&projectile.bounds));
            if let Some(enemy) = struck {
                enemy.health = enemy.health.saturating_sub(projectile.damage);
                self.scratch.push(Command::ResolveHit {
                    projectile: projectile.id,
                    enemy: enemy.id,
                });
            }
        }

        for enemy in self.survivors.iter().filter(|enemy| enemy.health > 0) {
            let target = overlapping_plant(&enemy.bounds, plants);
            if target != enemy.target {
                self.scratch.push(Command::SetEnemyTarget {
                    enemy: enemy.id,
                    target,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

/// Rightmost plant overlapping `bounds`, ties broken by the lowest identifier.
fn overlapping_plant(bounds: &PixelRect, plants: &PlantView) -> Option<PlantId> {
    let mut best: Option<(PlantId, f32)> = None;
    for plant in plants.iter() {
        if !plant.bounds.overlaps(bounds) {
            continue;
        }
        let x = plant.bounds.center().x;
        match best {
            Some((_, best_x)) if best_x >= x => {}
            _ => best = Some((plant.id, x)),
        }
    }
    best.map(|(id, _)| id)
}
