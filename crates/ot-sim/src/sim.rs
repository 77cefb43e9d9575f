//! The `Sim` struct and its tick loop.

use ot_agent::{BehaviorState, Facing};
use ot_behavior::{BehaviorModel, Intent, WorldView};
use ot_core::{AgentId, Cell, SimClock, SimConfig, Tick};
use ot_grid::PathPlanner;
use ot_sched::{AnalysisFetcher, AnalysisScheduler, DisplaySink, FreshnessSource};

use crate::{SimObserver, World};

/// The main simulation runner.
///
/// Holds all state by value and drives the five-phase tick described in the
/// [crate docs](crate).  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B, P, S, F, D>
where
    B: BehaviorModel,
    P: PathPlanner,
    S: FreshnessSource,
    F: AnalysisFetcher,
    D: DisplaySink,
{
    /// Global configuration (total ticks, seed, tick duration).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick.
    pub clock: SimClock,

    /// Floor plan, agents, and per-agent RNGs.
    pub world: World,

    /// The behavior model, called once per agent per tick.
    pub behavior: B,

    /// The path planner used by the apply phase.
    pub planner: P,

    /// The single-flight analysis scheduler, driven once per tick.
    pub scheduler: AnalysisScheduler<S, F, D>,
}

impl<B, P, S, F, D> Sim<B, P, S, F, D>
where
    B: BehaviorModel,
    P: PathPlanner,
    S: FreshnessSource,
    F: AnalysisFetcher,
    D: DisplaySink,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        tracing::debug!(
            total_ticks = self.config.total_ticks,
            agents = self.world.agents.count,
            "simulation run starting"
        );
        while self.clock.current_tick < self.config.end_tick() {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            self.process_tick(now);
            observer.on_frame(now, &self.world);
            observer.on_tick_end(now);
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            self.process_tick(now);
            observer.on_frame(now, &self.world);
            observer.on_tick_end(now);
            self.clock.advance();
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) {
        // ── Phase 1: housekeeping ─────────────────────────────────────────
        self.world.agents.tick_messages();

        // ── Phase 2: intent phase (read-only) ─────────────────────────────
        //
        // Split borrows: the view reads floor+agents while each agent's own
        // RNG is borrowed mutably from the sibling struct.
        let intents: Vec<(AgentId, Vec<Intent>)> = {
            let World { floor, agents, rngs } = &mut self.world;
            let view = WorldView::new(now, floor, agents);
            let behavior = &self.behavior;
            view.agents
                .agent_ids()
                .map(|agent| (agent, behavior.replan(agent, &view, rngs.get_mut(agent))))
                .collect()
        };

        // ── Phase 3: apply phase (sequential, ascending AgentId) ──────────
        //
        // The ordering is the conflict-resolution policy: when two agents
        // race for one cell, the lower ID commits first and the other
        // replans against the updated occupancy.
        for (agent, agent_intents) in intents {
            for intent in agent_intents {
                self.apply_intent(agent, intent, now);
            }
        }

        // Everyone has been in their (possibly new) state for one more tick.
        for i in 0..self.world.agents.count {
            self.world.agents.state_ticks[i] += 1;
        }

        // ── Phase 4: scheduler timers ─────────────────────────────────────
        self.scheduler.tick(now, &mut self.world.agents);
    }

    // ── Intent application ────────────────────────────────────────────────

    fn apply_intent(&mut self, agent: AgentId, intent: Intent, now: Tick) {
        match intent {
            Intent::Step => self.apply_step(agent, now),
            Intent::Travel { goal, partner } => self.apply_travel(agent, goal, partner, now),
            Intent::Enter(state) => self.world.agents.enter_state(agent, state),
            Intent::Say(text) => self.world.agents.speak(agent, &text),
            Intent::Face(facing) => self.world.agents.facing[agent.index()] = facing,
            Intent::BeginTalk { partner } => self.apply_begin_talk(agent, partner),
            Intent::CancelTalk => self.world.agents.partner[agent.index()] = AgentId::INVALID,
        }
    }

    /// Advance one path cell — or, if someone took it first, replan toward
    /// the stored goal against current occupancy.
    fn apply_step(&mut self, agent: AgentId, now: Tick) {
        let i = agent.index();
        let Some(next) = self.world.agents.path[i].peek() else {
            return;
        };

        let free = self.world.view(now).is_walkable_for(agent, next);
        if free {
            let from = self.world.agents.pos[i];
            self.world.agents.facing[i] = Facing::toward(from, next);
            self.world.agents.pos[i] = next;
            self.world.agents.path[i].take_step();
            if self.world.agents.path[i].is_empty() {
                self.world.agents.goal[i] = None;
            }
            return;
        }

        // Lost the race for the cell: the path is stale.
        tracing::trace!(agent = %agent, cell = %next, "step blocked, replanning");
        match self.world.agents.goal[i] {
            Some(goal) => {
                let path = self.plan(agent, goal, now);
                if path.is_empty() {
                    // Nowhere to go for now; idle and let the next decision
                    // (or the servicing override) try again.
                    self.world.agents.clear_route(agent);
                    self.world.agents.enter_state(agent, BehaviorState::Idle);
                } else {
                    self.world.agents.path[i] = path;
                }
            }
            None => {
                self.world.agents.clear_route(agent);
                self.world.agents.enter_state(agent, BehaviorState::Idle);
            }
        }
    }

    fn apply_travel(
        &mut self,
        agent: AgentId,
        goal: Cell,
        partner: Option<AgentId>,
        now: Tick,
    ) {
        let i = agent.index();
        if let Some(p) = partner {
            self.world.agents.partner[i] = p;
        }
        let path = self.plan(agent, goal, now);
        self.world.agents.path[i] = path;
        self.world.agents.goal[i] = Some(goal);
        self.world.agents.enter_state(agent, BehaviorState::Walking);
    }

    /// Mutual consent: both sides must still be adjacent and available at
    /// apply time, or the attempt dissolves silently.
    fn apply_begin_talk(&mut self, agent: AgentId, partner: AgentId) {
        let agents = &mut self.world.agents;
        let (i, j) = (agent.index(), partner.index());

        let adjacent = agents.pos[i].is_adjacent4(agents.pos[j]);
        if !adjacent || agents.is_engaged(partner) || agents.servicing[i] {
            agents.partner[i] = AgentId::INVALID;
            agents.enter_state(agent, BehaviorState::Idle);
            return;
        }

        agents.enter_state(agent, BehaviorState::Talking);
        agents.enter_state(partner, BehaviorState::Talking);
        agents.partner[i] = partner;
        agents.partner[j] = agent;
        agents.clear_route(agent);
        agents.clear_route(partner);
        let toward = Facing::toward(agents.pos[i], agents.pos[j]);
        agents.facing[i] = toward;
        agents.facing[j] = toward.opposite();
    }

    fn plan(&self, agent: AgentId, goal: Cell, now: Tick) -> ot_grid::Path {
        let view = self.world.view(now);
        let from = self.world.agents.pos[agent.index()];
        self.planner.find_path(&view.walkability_for(agent), from, goal)
    }
}
