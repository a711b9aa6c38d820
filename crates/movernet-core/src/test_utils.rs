//! Shared test fixtures for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so downstream
//! crates can enable the `test-utils` feature in their dev-dependencies.

use std::collections::{BTreeMap, BTreeSet};

use crate::cell::{Cell, Direction};
use crate::grid::{HubPower, MoverGrid};
use crate::watts::Watts;

/// Shorthand cell constructor.
pub fn cell(x: i32, z: i32) -> Cell {
    Cell::new(x, z)
}

/// Shorthand watts constructor.
pub fn watts(v: i64) -> Watts {
    Watts::from_num(v)
}

// ===========================================================================
// TestGrid
// ===========================================================================

/// An in-memory grid: mover terrain with facings, plus hub buildings.
#[derive(Debug, Clone, Default)]
pub struct TestGrid {
    movers: BTreeMap<Cell, Direction>,
    hubs: BTreeMap<Cell, Direction>,
}

impl TestGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mover(&mut self, cell: Cell, facing: Direction) {
        self.movers.insert(cell, facing);
    }

    pub fn remove_mover(&mut self, cell: Cell) {
        self.movers.remove(&cell);
    }

    pub fn add_hub(&mut self, cell: Cell) {
        self.hubs.insert(cell, Direction::North);
    }

    pub fn add_hub_facing(&mut self, cell: Cell, facing: Direction) {
        self.hubs.insert(cell, facing);
    }

    pub fn remove_hub(&mut self, cell: Cell) {
        self.hubs.remove(&cell);
    }

    /// Whether anything (mover or hub) occupies this cell.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.movers.contains_key(&cell) || self.hubs.contains_key(&cell)
    }

    /// Lay a straight run of movers from `start`, stepping `dir`,
    /// `len` tiles long, each tile facing `dir`.
    pub fn add_mover_run(&mut self, start: Cell, dir: Direction, len: u32) {
        let mut c = start;
        for _ in 0..len {
            self.add_mover(c, dir);
            c = c.offset(dir);
        }
    }
}

impl MoverGrid for TestGrid {
    fn is_mover_terrain(&self, cell: Cell) -> bool {
        self.movers.contains_key(&cell)
    }

    fn is_hub_at(&self, cell: Cell) -> bool {
        self.hubs.contains_key(&cell)
    }

    fn mover_direction(&self, cell: Cell) -> Option<Direction> {
        self.movers
            .get(&cell)
            .or_else(|| self.hubs.get(&cell))
            .copied()
    }
}

// ===========================================================================
// TestPower
// ===========================================================================

/// Records desired-draw writes per hub; every hub is powered unless
/// explicitly switched off.
#[derive(Debug, Clone, Default)]
pub struct TestPower {
    draws: BTreeMap<Cell, Watts>,
    switched_off: BTreeSet<Cell>,
}

impl TestPower {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last desired draw written for this hub, or zero if none.
    pub fn draw(&self, hub: Cell) -> Watts {
        self.draws.get(&hub).copied().unwrap_or(Watts::ZERO)
    }

    pub fn switch_off(&mut self, hub: Cell) {
        self.switched_off.insert(hub);
    }

    pub fn switch_on(&mut self, hub: Cell) {
        self.switched_off.remove(&hub);
    }
}

impl HubPower for TestPower {
    fn set_desired_draw(&mut self, hub: Cell, watts: Watts) {
        self.draws.insert(hub, watts);
    }

    fn is_powered(&self, hub: Cell) -> bool {
        !self.switched_off.contains(&hub)
    }
}
