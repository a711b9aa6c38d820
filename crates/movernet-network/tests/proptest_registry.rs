//! Property-based tests for the network registry.
//!
//! Drives random place/remove sequences over a small grid and checks
//! the structural invariants after every single mutation: disjoint
//! membership, one hub per network, hub reachability, and exact
//! desired-draw bookkeeping.

use std::collections::{BTreeSet, VecDeque};

use movernet_core::cell::{Cell, Direction};
use movernet_core::grid::MoverGrid;
use movernet_core::settings::WattageConfig;
use movernet_core::test_utils::{TestGrid, TestPower, watts};
use movernet_network::NetworkRegistry;
use proptest::prelude::*;

const GRID_SIZE: i32 = 6;

/// World edits the host can make, mirrored into the registry the way
/// the terrain/building hooks would do it: grid first, registry second.
#[derive(Debug, Clone, Copy)]
enum WorldOp {
    PlaceMover(Cell, Direction),
    RemoveMover(Cell),
    PlaceHub(Cell),
    RemoveHub(Cell),
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    (0..GRID_SIZE, 0..GRID_SIZE).prop_map(|(x, z)| Cell::new(x, z))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::North),
        Just(Direction::East),
        Just(Direction::South),
        Just(Direction::West),
    ]
}

fn arb_op() -> impl Strategy<Value = WorldOp> {
    prop_oneof![
        3 => (arb_cell(), arb_direction()).prop_map(|(c, d)| WorldOp::PlaceMover(c, d)),
        2 => arb_cell().prop_map(WorldOp::RemoveMover),
        2 => arb_cell().prop_map(WorldOp::PlaceHub),
        1 => arb_cell().prop_map(WorldOp::RemoveHub),
    ]
}

/// A world under test: grid, power sinks, and the registry kept in sync.
struct World {
    grid: TestGrid,
    power: TestPower,
    registry: NetworkRegistry,
}

impl World {
    fn new() -> Self {
        Self {
            grid: TestGrid::new(),
            power: TestPower::new(),
            registry: NetworkRegistry::new(WattageConfig {
                hub_base: watts(10),
                per_tile: watts(10),
            }),
        }
    }

    fn apply(&mut self, op: WorldOp) {
        match op {
            WorldOp::PlaceMover(cell, dir) => {
                if self.grid.is_occupied(cell) {
                    return;
                }
                self.grid.add_mover(cell, dir);
                self.registry.register(&self.grid, &mut self.power, cell, false);
            }
            WorldOp::RemoveMover(cell) => {
                if !self.grid.is_mover_terrain(cell) {
                    return;
                }
                self.grid.remove_mover(cell);
                self.registry.deregister(&self.grid, &mut self.power, cell, false);
            }
            WorldOp::PlaceHub(cell) => {
                if self.grid.is_occupied(cell) {
                    return;
                }
                self.grid.add_hub(cell);
                self.registry.register(&self.grid, &mut self.power, cell, true);
            }
            WorldOp::RemoveHub(cell) => {
                if !self.grid.is_hub_at(cell) {
                    return;
                }
                self.grid.remove_hub(cell);
                self.registry.deregister(&self.grid, &mut self.power, cell, true);
            }
        }
    }

    /// Check every registry invariant. Returns a description of the
    /// first violation found.
    fn check_invariants(&self) -> Result<(), String> {
        let reg = &self.registry;
        let mut seen_cells: BTreeSet<Cell> = BTreeSet::new();
        let mut total_members = 0usize;

        for (id, network) in reg.networks() {
            if network.members.is_empty() {
                return Err(format!("network {id:?} is empty"));
            }
            total_members += network.members.len();

            // Exactly one hub item, matching the hub index.
            let hubs: Vec<Cell> = network
                .members
                .iter()
                .copied()
                .filter(|&c| reg.item_at(c).is_some_and(|item| item.is_hub))
                .collect();
            if hubs.len() != 1 {
                return Err(format!("network {id:?} has {} hub items", hubs.len()));
            }
            if reg.hub_of(id) != Some(hubs[0]) || network.hub != hubs[0] {
                return Err(format!("network {id:?} hub index mismatch"));
            }

            // Disjointness and index consistency.
            for &member in &network.members {
                if !seen_cells.insert(member) {
                    return Err(format!("cell {member:?} appears in two networks"));
                }
                if reg.network_at(member) != Some(id) {
                    return Err(format!("cell index disagrees for {member:?}"));
                }
            }

            // Every member reachable from the hub through same-network
            // members only.
            let members: BTreeSet<Cell> = network.members.iter().copied().collect();
            let mut reached = BTreeSet::from([network.hub]);
            let mut queue = VecDeque::from([network.hub]);
            while let Some(cell) = queue.pop_front() {
                for neighbor in cell.cardinal_neighbors() {
                    if members.contains(&neighbor) && reached.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            if reached.len() != members.len() {
                return Err(format!(
                    "network {id:?}: {} of {} members reachable from hub",
                    reached.len(),
                    members.len()
                ));
            }

            // Desired draw pushed to the sink: base + per_tile * (n - 1).
            let expected = watts(10) + watts(10) * watts(network.member_count() as i64 - 1);
            if self.power.draw(network.hub) != expected {
                return Err(format!(
                    "network {id:?}: draw {} != expected {expected}",
                    self.power.draw(network.hub)
                ));
            }
        }

        if total_members != reg.cell_count() {
            return Err(format!(
                "cell index has {} entries but networks hold {total_members} members",
                reg.cell_count()
            ));
        }
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// All structural invariants hold after every mutation in a random
    /// edit sequence.
    #[test]
    fn invariants_hold_under_random_edits(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut world = World::new();
        for op in ops {
            world.apply(op);
            if let Err(violation) = world.check_invariants() {
                prop_assert!(false, "after {op:?}: {violation}");
            }
        }
    }

    /// Registered membership never exceeds what the grid could support,
    /// and every registered non-hub cell is mover terrain.
    #[test]
    fn registered_cells_are_backed_by_the_grid(ops in proptest::collection::vec(arb_op(), 1..80)) {
        let mut world = World::new();
        for op in ops {
            world.apply(op);
        }
        for (_, network) in world.registry.networks() {
            for &member in &network.members {
                let item = world.registry.item_at(member).unwrap();
                if item.is_hub {
                    prop_assert!(world.grid.is_hub_at(member));
                } else {
                    prop_assert!(world.grid.is_mover_terrain(member));
                }
            }
        }
    }

    /// Tearing every edit back down leaves the registry empty.
    #[test]
    fn full_teardown_leaves_nothing_registered(ops in proptest::collection::vec(arb_op(), 1..60)) {
        let mut world = World::new();
        for op in ops {
            world.apply(op);
        }
        for x in 0..GRID_SIZE {
            for z in 0..GRID_SIZE {
                let cell = Cell::new(x, z);
                if world.grid.is_mover_terrain(cell) {
                    world.apply(WorldOp::RemoveMover(cell));
                }
                if world.grid.is_hub_at(cell) {
                    world.apply(WorldOp::RemoveHub(cell));
                }
            }
        }
        prop_assert_eq!(world.registry.network_count(), 0);
        prop_assert_eq!(world.registry.cell_count(), 0);
    }
}
