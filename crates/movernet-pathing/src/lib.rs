//! Path cost adjustment over powered mover cells.
//!
//! The pathfinding layer consults this crate when stepping into a cell:
//! powered mover cells are cheaper to walk along their facing and more
//! expensive to walk against it, which steers route searches onto
//! conveyor runs in the right direction. Cells that are not powered
//! mover cells pass through with their cost untouched.
//!
//! Two cost surfaces exist, matching how a host typically splits them:
//!
//! - [`MoverCostModel::movement_cost_into`] replaces a tile's terrain
//!   cost with the mover movespeed cost (how fast you actually walk).
//! - [`MoverCostModel::search_bias_into`] biases a pathfinder's running
//!   cost for a candidate step (how much the search prefers the tile).
//!
//! Any engine mounts the model through the [`CostHook`] trait rather
//! than being patched; the hook is the pluggable seam.

use movernet_core::cell::{Cell, Direction};
use movernet_core::grid::{HubPower, MoverGrid};
use movernet_core::settings::MoverSettings;
use movernet_network::NetworkRegistry;

/// Pluggable per-step cost adjustment for a pathfinding engine.
pub trait CostHook {
    /// Adjusted cost of stepping from `from` into `to`, given the
    /// engine's unadjusted cost `base`.
    fn cost_into(&self, base: i32, from: Cell, to: Cell) -> i32;
}

/// Apply the directional discount or penalty to a base cost.
///
/// A step whose component along `facing` is non-negative (with the
/// belt, or perpendicular to it) is discounted; a step against the
/// facing is penalized. `omni` discounts every step. Never negative.
pub fn directional_cost(
    base: i32,
    increment: i32,
    facing: Direction,
    from: Cell,
    to: Cell,
    omni: bool,
) -> i32 {
    if omni {
        return (base - increment).max(0);
    }
    let (fx, fz) = facing.delta();
    let along = (to.x - from.x) * fx + (to.z - from.z) * fz;
    let cost = if along >= 0 {
        base - increment
    } else {
        base + increment
    };
    cost.max(0)
}

/// A per-query view over the settings, registry, and host collaborators.
///
/// Cheap to construct; build one per pathfinding request so it observes
/// current settings and network state.
pub struct MoverCostModel<'a, G, P> {
    settings: &'a MoverSettings,
    registry: &'a NetworkRegistry,
    grid: &'a G,
    power: &'a P,
}

impl<'a, G: MoverGrid, P: HubPower> MoverCostModel<'a, G, P> {
    pub fn new(
        settings: &'a MoverSettings,
        registry: &'a NetworkRegistry,
        grid: &'a G,
        power: &'a P,
    ) -> Self {
        Self {
            settings,
            registry,
            grid,
            power,
        }
    }

    /// Is `cell` a mover surface (terrain or hub) in a powered network?
    /// Mover terrain outside any network gives no bonus.
    fn is_powered_mover(&self, cell: Cell) -> bool {
        (self.grid.is_mover_terrain(cell) || self.grid.is_hub_at(cell))
            && self.registry.is_powered(self.power, cell)
    }

    /// Movement cost of stepping from `from` into `to`. Powered mover
    /// cells replace `terrain_cost` with the direction-adjusted
    /// movespeed cost; everything else keeps `terrain_cost`.
    pub fn movement_cost_into(&self, from: Cell, to: Cell, terrain_cost: i32) -> i32 {
        if !self.is_powered_mover(to) {
            return terrain_cost;
        }
        let facing = self.grid.mover_direction(to).unwrap_or_default();
        directional_cost(
            self.settings.movespeed_path_cost,
            self.settings.cost_increment(true),
            facing,
            from,
            to,
            self.settings.omni_mover,
        )
    }

    /// Search bias for a candidate step from `from` into `to`, applied
    /// on top of the pathfinder's `running_cost`. Identity for cells
    /// that are not powered movers.
    pub fn search_bias_into(&self, from: Cell, to: Cell, running_cost: i32) -> i32 {
        if !self.is_powered_mover(to) {
            return running_cost;
        }
        let facing = self.grid.mover_direction(to).unwrap_or_default();
        directional_cost(
            running_cost,
            self.settings.cost_increment(false),
            facing,
            from,
            to,
            self.settings.omni_mover,
        )
    }
}

impl<G: MoverGrid, P: HubPower> CostHook for MoverCostModel<'_, G, P> {
    fn cost_into(&self, base: i32, from: Cell, to: Cell) -> i32 {
        self.search_bias_into(from, to, base)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
