//! Scripted player used to drive headless runs.

use std::collections::BTreeSet;

use lawn_defence_core::{CellCoord, LawnGrid, PixelPoint, PlantKind, Snapshot};
use lawn_defence_session::Session;

/// Greedy player: collects every pickup, then works through a fixed build order.
///
/// Rows are fortified from the middle outward. Each row gets a shooter in
/// column 1 backed by a generator in column 0; once every row has both, the
/// bot adds blockers near the right edge and a second shooter column.
#[derive(Debug)]
pub(crate) struct Autoplay {
    build_order: Vec<(PlantKind, CellCoord)>,
}

impl Autoplay {
    pub(crate) fn new(grid: &LawnGrid) -> Self {
        Self {
            build_order: build_order(grid),
        }
    }

    /// Performs this frame's actions and returns how many succeeded.
    pub(crate) fn act(&mut self, session: &mut Session) -> usize {
        let snapshot = session.snapshot();
        let mut actions = 0;

        let pickups: Vec<PixelPoint> = snapshot
            .pickups
            .iter()
            .map(|pickup| pickup.bounds.center())
            .collect();
        for point in pickups {
            if session.attempt_collect(point).is_some() {
                actions += 1;
            }
        }

        if let Some((kind, cell)) = self.next_build(&session.snapshot()) {
            if session.selected() != Some(kind) && session.select_plant(kind).is_err() {
                return actions;
            }
            if session.attempt_place(cell).is_ok() {
                actions += 1;
            }
        }
        actions
    }

    fn next_build(&self, snapshot: &Snapshot) -> Option<(PlantKind, CellCoord)> {
        let occupied: BTreeSet<CellCoord> = snapshot.plants.iter().map(|plant| plant.cell).collect();
        self.build_order
            .iter()
            .copied()
            .find(|(_, cell)| !occupied.contains(cell))
    }
}

fn build_order(grid: &LawnGrid) -> Vec<(PlantKind, CellCoord)> {
    let rows = middle_out(grid.rows());
    let columns = grid.columns();
    let mut order = Vec::new();
    for &row in &rows {
        if columns > 1 {
            order.push((PlantKind::Shooter, CellCoord::new(1, row)));
        }
        order.push((PlantKind::Generator, CellCoord::new(0, row)));
    }
    if columns > 3 {
        for &row in &rows {
            order.push((PlantKind::Blocker, CellCoord::new(columns - 2, row)));
        }
        for &row in &rows {
            order.push((PlantKind::Shooter, CellCoord::new(2, row)));
        }
    }
    order
}

/// Row indices ordered from the center row toward the edges.
fn middle_out(rows: u32) -> Vec<u32> {
    let mut ordered: Vec<u32> = (0..rows).collect();
    let middle = rows / 2;
    ordered.sort_by_key(|row| (row.abs_diff(middle), *row));
    ordered
}
