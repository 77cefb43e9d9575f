//! Fluent builder for constructing a [`Sim`].

use ot_agent::{AgentRngs, AgentStore};
use ot_behavior::BehaviorModel;
use ot_core::SimConfig;
use ot_grid::{FloorPlan, PathPlanner};
use ot_sched::{AnalysisFetcher, AnalysisScheduler, DisplaySink, FreshnessSource};

use crate::{Sim, SimError, SimResult, World};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, tick duration
/// - [`FloorPlan`] + [`AgentStore`] + [`AgentRngs`] — the world
/// - `B: BehaviorModel` — agent decision logic (e.g. `AnalystBehavior`)
/// - `P: PathPlanner` — the search algorithm (e.g. `AStarPlanner`)
/// - the scheduler, wrapping the three injected collaborators
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(seed)
///     .analyst("Analyst Biton", Ticker::Btc, btc_desk)
///     .build()?;
/// let scheduler = AnalysisScheduler::new(SchedConfig::default(), source, fetcher, sink);
/// let mut sim = SimBuilder::new(config, floor, store, rngs, AnalystBehavior, AStarPlanner::default(), scheduler)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<B, P, S, F, D>
where
    B: BehaviorModel,
    P: PathPlanner,
    S: FreshnessSource,
    F: AnalysisFetcher,
    D: DisplaySink,
{
    config: SimConfig,
    floor: FloorPlan,
    agents: AgentStore,
    rngs: AgentRngs,
    behavior: B,
    planner: P,
    scheduler: AnalysisScheduler<S, F, D>,
}

impl<B, P, S, F, D> SimBuilder<B, P, S, F, D>
where
    B: BehaviorModel,
    P: PathPlanner,
    S: FreshnessSource,
    F: AnalysisFetcher,
    D: DisplaySink,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: SimConfig,
        floor: FloorPlan,
        agents: AgentStore,
        rngs: AgentRngs,
        behavior: B,
        planner: P,
        scheduler: AnalysisScheduler<S, F, D>,
    ) -> Self {
        Self { config, floor, agents, rngs, behavior, planner, scheduler }
    }

    /// Validate the placement invariants and return a ready-to-run [`Sim`].
    ///
    /// Every desk seat and every starting position must be on passable
    /// terrain: an agent wedged into a wall at tick 0 would violate the
    /// "current cell is always walkable" invariant before the loop starts.
    pub fn build(self) -> SimResult<Sim<B, P, S, F, D>> {
        for agent in self.agents.agent_ids() {
            let desk = self.agents.desk[agent.index()];
            if !self.floor.is_passable(desk) {
                return Err(SimError::DeskBlocked { agent, cell: desk });
            }
            let start = self.agents.pos[agent.index()];
            if !self.floor.is_passable(start) {
                return Err(SimError::StartBlocked { agent, cell: start });
            }
        }

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            world: World::new(self.floor, self.agents, self.rngs),
            behavior: self.behavior,
            planner: self.planner,
            scheduler: self.scheduler,
        })
    }
}
