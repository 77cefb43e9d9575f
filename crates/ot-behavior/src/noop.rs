//! A no-op behavior model — agents never produce intents.

use ot_core::{AgentId, AgentRng};

use crate::{BehaviorModel, Intent, WorldView};

/// A [`BehaviorModel`] that always returns an empty intent list.
///
/// Useful in tests where only the scheduler or the apply machinery is under
/// observation and agents should hold still unless poked directly.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn replan(
        &self,
        _agent: AgentId,
        _view: &WorldView<'_>,
        _rng: &mut AgentRng,
    ) -> Vec<Intent> {
        vec![]
    }
}
