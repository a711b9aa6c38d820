//! Movernet Core -- shared primitives for the mover network system.
//!
//! Mover terrain is directional conveyor surface laid out on a 2D grid.
//! Contiguous runs of mover cells form transport networks, each anchored
//! by exactly one powered hub. This crate provides the pieces every other
//! movernet crate builds on:
//!
//! - [`cell::Cell`] and [`cell::Direction`] -- grid coordinates and the
//!   four cardinal facings, with a fixed, documented neighbor order.
//! - [`watts::Watts`] -- Q32.32 fixed-point wattage for deterministic
//!   power bookkeeping.
//! - [`grid::MoverGrid`] and [`grid::HubPower`] -- the two external
//!   collaborator seams: terrain/building queries and hub power sinks.
//! - [`settings::MoverSettings`] -- runtime-mutable tuning (path costs,
//!   wattage), optionally loadable from JSON behind `settings-io`.

pub mod cell;
pub mod grid;
pub mod settings;
pub mod watts;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
