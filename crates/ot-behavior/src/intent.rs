//! Agent intents — the actions an agent can request each tick.

use ot_agent::{BehaviorState, Facing};
use ot_core::{AgentId, Cell};

/// An action an agent wants to perform during the current tick.
///
/// Intents are produced by [`BehaviorModel::replan`][crate::BehaviorModel::replan]
/// and consumed by the simulation's sequential apply phase, which is the
/// sole authority on whether they succeed: a `Step` onto a cell someone just
/// took is rerouted, a `BeginTalk` with a now-busy partner is cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Advance one cell along the stored path.
    ///
    /// The apply phase re-checks walkability at step time; if the cell was
    /// taken since planning, the stale path is discarded and replanned
    /// toward the stored goal.
    Step,

    /// Plan a route to `goal` and start walking.
    ///
    /// `partner` marks this as an approach for a conversation: the pending
    /// partner reference is recorded so arrival can attempt the talk
    /// transition.  An unreachable goal still enters `Walking` with an empty
    /// path — the next tick classifies "arrival" at the current cell.
    Travel {
        goal: Cell,
        partner: Option<AgentId>,
    },

    /// Enter a state in place (`Working`, `Resting`, …, or back to `Idle`).
    Enter(BehaviorState),

    /// Put a line in the agent's speech bubble.
    Say(String),

    /// Turn the sprite.
    Face(Facing),

    /// Attempt the mutual-consent talk transition with the pending partner.
    ///
    /// Succeeds only if the partner is adjacent and neither talking nor
    /// being serviced; on refusal the pending reference is dropped and the
    /// agent returns to `Idle`.
    BeginTalk { partner: AgentId },

    /// Drop the pending partner reference.
    CancelTalk,
}
