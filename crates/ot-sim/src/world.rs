//! The `World` aggregate.

use ot_agent::{AgentRngs, AgentStore};
use ot_behavior::WorldView;
use ot_core::Tick;
use ot_grid::FloorPlan;

/// Everything the simulation owns by value: the floor plan, the analysts,
/// and their RNGs.
///
/// Components never reach for ambient state — they receive `&World` (or a
/// [`WorldView`] derived from it) explicitly.  The agent store is the only
/// mutable shared surface, and the tick loop in [`Sim`][crate::Sim] is its
/// only writer; renderers get `&World` and cannot mutate anything.
pub struct World {
    pub floor: FloorPlan,
    pub agents: AgentStore,
    pub rngs: AgentRngs,
}

impl World {
    pub fn new(floor: FloorPlan, agents: AgentStore, rngs: AgentRngs) -> Self {
        Self { floor, agents, rngs }
    }

    /// A read-only view for the intent phase (and for tests).
    pub fn view(&self, tick: Tick) -> WorldView<'_> {
        WorldView::new(tick, &self.floor, &self.agents)
    }
}
