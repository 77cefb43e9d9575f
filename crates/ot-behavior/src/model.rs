//! The `BehaviorModel` trait — the extension point for agent decision logic.

use ot_core::{AgentId, AgentRng};

use crate::{Intent, WorldView};

/// Pluggable agent behavior.
///
/// Called once per agent per tick.  Implementations read the world through
/// the immutable [`WorldView`] and draw randomness from the agent's own
/// [`AgentRng`], so a run is deterministic for a given seed regardless of
/// how the caller orders its loops.
///
/// # Contract
///
/// - Must not assume its intents succeed: the apply phase may reject a step
///   or a talk attempt, and the model observes the outcome next tick.
/// - Must not error.  Anything infeasible (no reachable destination, partner
///   gone) degrades to a safe intent — the agent's desk or plain `Idle`.
pub trait BehaviorModel {
    /// Decide what `agent` wants to do this tick.
    ///
    /// An empty `Vec` means "do nothing"; the agent stays as it is.
    fn replan(
        &self,
        agent: AgentId,
        view: &WorldView<'_>,
        rng: &mut AgentRng,
    ) -> Vec<Intent>;
}
