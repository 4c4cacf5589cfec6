//! ASCII rendering of session snapshots.

use std::fmt::Write as _;

use lawn_defence_core::{EnemyKind, PlantKind, Snapshot, WavePhase};

/// Draws the lawn as one text row per grid row plus a status line.
///
/// Plants are `G`, `S` and `B`; enemies are `z` (normal) and `Z` (armored);
/// pickups are `*`. The extra rightmost column shows enemies still walking in
/// from beyond the grid.
pub(crate) fn frame(snapshot: &Snapshot) -> String {
    let grid = snapshot.grid;
    let width = usize::try_from(grid.columns()).unwrap_or(0) + 1;
    let height = usize::try_from(grid.rows()).unwrap_or(0);
    let mut cells = vec![vec!['.'; width]; height];

    for pickup in snapshot.pickups.iter() {
        if let Some(cell) = grid.cell_at(pickup.bounds.center()) {
            put(&mut cells, cell.column(), cell.row(), '*');
        }
    }
    for plant in snapshot.plants.iter() {
        let glyph = match plant.kind {
            PlantKind::Generator => 'G',
            PlantKind::Shooter => 'S',
            PlantKind::Blocker => 'B',
        };
        put(&mut cells, plant.cell.column(), plant.cell.row(), glyph);
    }
    for enemy in snapshot.enemies.iter() {
        let glyph = match enemy.kind {
            EnemyKind::Normal => 'z',
            EnemyKind::Armored => 'Z',
        };
        let center = enemy.bounds.center();
        let column = grid
            .cell_at(center)
            .map_or(grid.columns(), |cell| cell.column());
        put(&mut cells, column, enemy.row, glyph);
    }

    let mut out = status(snapshot);
    for row in cells {
        out.push('\n');
        out.extend(row);
    }
    out
}

fn put(cells: &mut [Vec<char>], column: u32, row: u32, glyph: char) {
    let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
        return;
    };
    if let Some(slot) = cells.get_mut(row).and_then(|line| line.get_mut(column)) {
        *slot = glyph;
    }
}

fn status(snapshot: &Snapshot) -> String {
    let mut line = format!(
        "t={:>6.1}s sun={:<4}",
        snapshot.elapsed.as_secs_f32(),
        snapshot.balance
    );
    let wave = snapshot.wave;
    let _ = match wave.phase {
        WavePhase::Idle => write!(
            line,
            " first wave in {}s",
            wave.time_until_first_wave.as_secs()
        ),
        WavePhase::Active { wave: current } => write!(
            line,
            " wave {current}/{} ({} to spawn)",
            wave.final_wave, wave.remaining_to_spawn
        ),
        WavePhase::AllCleared => write!(line, " all waves cleared"),
    };
    line
}
