//! External collaborator seams.
//!
//! The network registry never owns terrain or buildings. The host world
//! implements these two traits and passes them into every mutating or
//! power-querying registry call; the registry keeps no references into
//! host state between calls.

use crate::cell::{Cell, Direction};
use crate::watts::Watts;

/// Read access to the host grid: which cells carry mover terrain, which
/// carry a hub building, and which way a mover faces.
///
/// Neighbor enumeration is on [`Cell::cardinal_neighbors`] rather than
/// here, since it does not depend on host state; its N, E, S, W order is
/// the order the registry scans in.
pub trait MoverGrid {
    /// Is this cell flagged as mover (conveyor) terrain?
    fn is_mover_terrain(&self, cell: Cell) -> bool;

    /// Does this cell hold a hub building?
    fn is_hub_at(&self, cell: Cell) -> bool;

    /// The facing of the mover terrain or hub building at this cell,
    /// if it has one.
    fn mover_direction(&self, cell: Cell) -> Option<Direction>;
}

/// Write/read access to hub power sinks, keyed by the hub's cell.
///
/// The registry only ever sets the desired draw and reads the powered
/// flag; all other sink state belongs to the host.
pub trait HubPower {
    /// Set the wattage the hub at `hub` requests from its power grid.
    fn set_desired_draw(&mut self, hub: Cell, watts: Watts);

    /// Is the hub at `hub` currently powered (switched on and connected
    /// to a grid that satisfies it)?
    fn is_powered(&self, hub: Cell) -> bool;
}
