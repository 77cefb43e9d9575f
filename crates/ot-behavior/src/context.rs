//! Read-only simulation state passed to every behavior callback.

use ot_agent::AgentStore;
use ot_core::{AgentId, Cell, Tick};
use ot_grid::{FloorPlan, Walkability};

/// A read-only snapshot of the simulation state for one tick's intent phase.
///
/// Built once per tick by `ot-sim` and shared (immutably) across all agent
/// callbacks.  Occupancy is never cached: every walkability query scans the
/// live agent positions, so the answer is exactly as fresh as the store.
pub struct WorldView<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Static terrain.
    pub floor: &'a FloorPlan,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,
}

impl<'a> WorldView<'a> {
    #[inline]
    pub fn new(tick: Tick, floor: &'a FloorPlan, agents: &'a AgentStore) -> Self {
        Self { tick, floor, agents }
    }

    /// Full walkability for `agent`: passable terrain and not occupied by
    /// anyone else.  The agent's own cell counts as walkable so that
    /// planning from (or through) one's current position works.
    pub fn is_walkable_for(&self, agent: AgentId, cell: Cell) -> bool {
        if !self.floor.is_passable(cell) {
            return false;
        }
        match self.agents.occupant_of(cell) {
            None => true,
            Some(occupant) => occupant == agent,
        }
    }

    /// An excluding walkability view suitable for handing to the planner.
    pub fn walkability_for(&self, agent: AgentId) -> AgentWalkability<'a, '_> {
        AgentWalkability { view: self, agent }
    }
}

/// [`Walkability`] adapter that excludes the moving agent's own cell from
/// the occupancy check.
pub struct AgentWalkability<'a, 'v> {
    view: &'v WorldView<'a>,
    agent: AgentId,
}

impl Walkability for AgentWalkability<'_, '_> {
    #[inline]
    fn is_walkable(&self, cell: Cell) -> bool {
        self.view.is_walkable_for(self.agent, cell)
    }
}
