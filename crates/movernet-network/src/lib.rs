//! Mover Network Registry for the movernet system.
//!
//! Maintains the dynamic set of disjoint transport networks on one grid:
//! contiguous runs of mover terrain, each rooted at exactly one powered
//! hub. Terrain and building edits drive [`NetworkRegistry::register`] /
//! [`NetworkRegistry::deregister`]; the pathfinding layer calls
//! [`NetworkRegistry::is_powered`] on its hot path, which is a direct
//! index lookup and never a traversal.
//!
//! # Design
//!
//! - Networks live in a [`SlotMap`], so removing one network never
//!   renumbers the ids stored in the cell index or the hub index.
//! - One registry per grid. Multiple maps each own an independent
//!   registry; there is no process-wide state.
//! - The registry holds no references into host state. The host passes
//!   its [`MoverGrid`] and [`HubPower`] implementations into each call.
//! - Mutating calls return [`NetworkEvent`]s describing network
//!   formation and teardown; these are the observable boundary.
//!
//! # Invariants
//!
//! - Each cell belongs to at most one network.
//! - Every network has exactly one hub, and every member is reachable
//!   from it by cardinal adjacency through same-network members.
//! - A hub's desired draw is `hub_base + per_tile * (members - 1)`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap, new_key_type};

use movernet_core::cell::Cell;
use movernet_core::grid::{HubPower, MoverGrid};
use movernet_core::settings::WattageConfig;
use movernet_core::watts::Watts;

new_key_type! {
    /// Identifies a mover network. Stable for the network's lifetime;
    /// slots are reused only after removal, never renumbered.
    pub struct NetworkId;
}

// ---------------------------------------------------------------------------
// Per-cell and per-network data
// ---------------------------------------------------------------------------

/// One grid cell participating in a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkItem {
    /// The cell's position.
    pub cell: Cell,
    /// The owning network.
    pub network: NetworkId,
    /// True iff this cell is the network's unique power source.
    pub is_hub: bool,
}

/// A maximal run of cardinally-connected mover cells plus its one hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Network identifier.
    pub id: NetworkId,
    /// The hub's cell. Always a member.
    pub hub: Cell,
    /// Every member cell, hub included, in discovery order.
    pub members: Vec<Cell>,
}

impl Network {
    /// Total member count, hub included.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by mutating registry calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    /// A new network came into existence, anchored at `hub`.
    NetworkFormed { network: NetworkId, hub: Cell },
    /// A network was torn down; its members are no longer registered.
    /// A `NetworkFormed` in the same batch means it was rebuilt under a
    /// fresh id after a member was removed.
    NetworkDissolved { network: NetworkId, hub: Cell },
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Per-grid owner of all mover networks and their indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRegistry {
    /// All live networks. Slot reuse keeps stored ids valid.
    networks: SlotMap<NetworkId, Network>,
    /// Network -> hub cell, so power bookkeeping never scans members.
    hub_by_network: SecondaryMap<NetworkId, Cell>,
    /// Cell -> membership, the O(1) query path.
    cell_index: BTreeMap<Cell, NetworkItem>,
    /// Current wattage constants. Updated via [`Self::set_wattage_config`].
    wattage: WattageConfig,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new(WattageConfig::default())
    }
}

impl NetworkRegistry {
    /// Create an empty registry with the given wattage constants.
    pub fn new(wattage: WattageConfig) -> Self {
        Self {
            networks: SlotMap::with_key(),
            hub_by_network: SecondaryMap::new(),
            cell_index: BTreeMap::new(),
            wattage,
        }
    }

    // -- Queries --

    /// The network this cell belongs to, if any. O(log n) index lookup,
    /// never a traversal.
    pub fn network_at(&self, cell: Cell) -> Option<NetworkId> {
        self.cell_index.get(&cell).map(|item| item.network)
    }

    /// Full membership record for a cell, if registered.
    pub fn item_at(&self, cell: Cell) -> Option<NetworkItem> {
        self.cell_index.get(&cell).copied()
    }

    /// A network by id.
    pub fn network(&self, id: NetworkId) -> Option<&Network> {
        self.networks.get(id)
    }

    /// Iterate all live networks.
    pub fn networks(&self) -> impl Iterator<Item = (NetworkId, &Network)> {
        self.networks.iter()
    }

    /// The hub cell of a network.
    pub fn hub_of(&self, id: NetworkId) -> Option<Cell> {
        self.hub_by_network.get(id).copied()
    }

    /// Number of live networks.
    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    /// Number of registered cells across all networks.
    pub fn cell_count(&self) -> usize {
        self.cell_index.len()
    }

    /// Whether the network owning `cell` is currently powered. False for
    /// unregistered cells; otherwise mirrors the hub's powered flag.
    pub fn is_powered<P: HubPower>(&self, power: &P, cell: Cell) -> bool {
        let Some(item) = self.cell_index.get(&cell) else {
            return false;
        };
        let Some(&hub) = self.hub_by_network.get(item.network) else {
            debug_assert!(false, "cell index references a network with no hub entry");
            return false;
        };
        power.is_powered(hub)
    }

    /// The draw the hub of `id` should currently request.
    pub fn desired_draw(&self, id: NetworkId) -> Option<Watts> {
        self.networks
            .get(id)
            .map(|n| self.draw_for_members(n.member_count()))
    }

    // -- Registration --

    /// Insert `cell` into the network fabric.
    ///
    /// No-op if the cell is already registered. A hub founds a new
    /// singleton network; a non-hub joins the first cardinally adjacent
    /// mover/hub cell that already has a network (scanned in the fixed
    /// N, E, S, W order -- first match wins, so a tile touching two
    /// networks joins the northmost-first one and does not merge them).
    /// Either way, every unregistered mover-terrain cell transitively
    /// reachable from the touched network is then absorbed into it.
    pub fn register<G: MoverGrid, P: HubPower>(
        &mut self,
        grid: &G,
        power: &mut P,
        cell: Cell,
        is_hub: bool,
    ) -> Vec<NetworkEvent> {
        let mut events = Vec::new();
        let Some(id) = self.register_single(grid, power, cell, is_hub) else {
            return events;
        };
        if is_hub {
            events.push(NetworkEvent::NetworkFormed { network: id, hub: cell });
        }
        self.expand(grid, power, id);
        events
    }

    /// Remove `cell` from its network. No-op if unregistered.
    ///
    /// The whole network is torn down. When the removed cell was not the
    /// hub, the network is rebuilt from the surviving hub; the removed
    /// cell must no longer report as mover terrain by the time this is
    /// called, so the rebuild re-absorbs exactly the members still
    /// cardinally reachable from the hub.
    pub fn deregister<G: MoverGrid, P: HubPower>(
        &mut self,
        grid: &G,
        power: &mut P,
        cell: Cell,
        is_hub: bool,
    ) -> Vec<NetworkEvent> {
        let mut events = Vec::new();
        let Some(&item) = self.cell_index.get(&cell) else {
            return events;
        };

        let id = item.network;
        let hub = self.clear_network(power, id);
        if let Some(hub) = hub {
            events.push(NetworkEvent::NetworkDissolved { network: id, hub });
            if !is_hub {
                events.extend(self.register(grid, power, hub, true));
            }
        }
        events
    }

    // -- Wattage --

    /// Push each hub's desired draw to the power layer. `Some(id)`
    /// recomputes one network, `None` all of them. Needed after wattage
    /// constants change; registration keeps draws current on its own.
    pub fn recompute_wattage<P: HubPower>(&self, power: &mut P, network: Option<NetworkId>) {
        match network {
            Some(id) => self.recompute_one(power, id),
            None => {
                for id in self.networks.keys() {
                    self.recompute_one(power, id);
                }
            }
        }
    }

    /// Replace the wattage constants and retroactively apply them to
    /// every live network.
    pub fn set_wattage_config<P: HubPower>(&mut self, power: &mut P, wattage: WattageConfig) {
        self.wattage = wattage;
        self.recompute_wattage(power, None);
    }

    /// The wattage constants currently in effect.
    pub fn wattage_config(&self) -> WattageConfig {
        self.wattage
    }

    // -- Internals --

    /// Insert one cell without expansion. Returns the network it ended
    /// up in, or `None` if it was already registered or nothing adjacent
    /// offered a network.
    fn register_single<G: MoverGrid, P: HubPower>(
        &mut self,
        grid: &G,
        power: &mut P,
        cell: Cell,
        is_hub: bool,
    ) -> Option<NetworkId> {
        if self.cell_index.contains_key(&cell) {
            return None;
        }

        if is_hub {
            let id = self.networks.insert_with_key(|id| Network {
                id,
                hub: cell,
                members: vec![cell],
            });
            self.hub_by_network.insert(id, cell);
            self.cell_index.insert(
                cell,
                NetworkItem {
                    cell,
                    network: id,
                    is_hub: true,
                },
            );
            power.set_desired_draw(cell, self.wattage.hub_base);
            return Some(id);
        }

        for neighbor in cell.cardinal_neighbors() {
            if !grid.is_mover_terrain(neighbor) && !grid.is_hub_at(neighbor) {
                continue;
            }
            let Some(&neighbor_item) = self.cell_index.get(&neighbor) else {
                continue;
            };
            let id = neighbor_item.network;
            let Some(network) = self.networks.get_mut(id) else {
                debug_assert!(false, "cell index references a network that no longer exists");
                continue;
            };
            network.members.push(cell);
            self.cell_index.insert(
                cell,
                NetworkItem {
                    cell,
                    network: id,
                    is_hub: false,
                },
            );
            self.recompute_one(power, id);
            return Some(id);
        }
        None
    }

    /// Breadth-first absorption of every unregistered mover-terrain cell
    /// reachable from the network's current members.
    fn expand<G: MoverGrid, P: HubPower>(&mut self, grid: &G, power: &mut P, id: NetworkId) {
        let mut queue: VecDeque<Cell> = match self.networks.get(id) {
            Some(network) => network.members.iter().copied().collect(),
            None => return,
        };
        let mut visited: BTreeSet<Cell> = BTreeSet::new();

        while let Some(cell) = queue.pop_front() {
            if !visited.insert(cell) {
                continue;
            }
            for neighbor in cell.cardinal_neighbors() {
                if !grid.is_mover_terrain(neighbor) || self.cell_index.contains_key(&neighbor) {
                    continue;
                }
                // Joins via its own neighbor scan; `cell` guarantees a hit.
                if self.register_single(grid, power, neighbor, false).is_some() {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    /// Tear down a network: unindex every member, reset the hub's draw
    /// to base, drop the hub entry and the network itself. Returns the
    /// former hub cell.
    fn clear_network<P: HubPower>(&mut self, power: &mut P, id: NetworkId) -> Option<Cell> {
        let network = self.networks.remove(id)?;
        for member in &network.members {
            self.cell_index.remove(member);
        }
        let hub = self.hub_by_network.remove(id);
        debug_assert!(hub.is_some(), "network existed without a hub entry");
        if let Some(hub) = hub {
            power.set_desired_draw(hub, self.wattage.hub_base);
        }
        hub
    }

    fn recompute_one<P: HubPower>(&self, power: &mut P, id: NetworkId) {
        let Some(network) = self.networks.get(id) else {
            return;
        };
        let Some(&hub) = self.hub_by_network.get(id) else {
            debug_assert!(false, "network {id:?} has no hub entry");
            return;
        };
        power.set_desired_draw(hub, self.draw_for_members(network.member_count()));
    }

    fn draw_for_members(&self, member_count: usize) -> Watts {
        let tiles = member_count.saturating_sub(1) as u32;
        self.wattage.hub_base + self.wattage.per_tile * Watts::from_num(tiles)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
