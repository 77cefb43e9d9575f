//! `AnalystBehavior` — the office-floor state machine.
//!
//! # Shape
//!
//! Every analyst cycles between idling at some spot, walking somewhere, and
//! a handful of timed in-place activities (desk work, conversations, table
//! breaks, coffee, window gazing).  After a fixed idle period the agent
//! rolls a weighted destination; path exhaustion classifies the arrival
//! cell into the matching activity.
//!
//! One condition outranks everything: while the scheduler has flagged the
//! agent as *servicing* a remote fetch, the machine ignores its state and
//! drives the agent to its desk, re-planning every tick it is blocked, and
//! freezes it facing the screen once seated.
//!
//! All durations are in ticks and mirror the cadence of the floor: idle
//! decisions every 10, desk work 15, conversations 10, breaks 12.

use ot_agent::{BehaviorState, Facing};
use ot_core::{AgentId, AgentRng, Cell};
use ot_grid::Tile;

use crate::lines;
use crate::{BehaviorModel, Intent, WorldView};

// ── Durations (ticks) ─────────────────────────────────────────────────────────

const IDLE_DECIDE_TICKS: u32 = 10;
const WORK_TICKS: u32 = 15;
const TALK_TICKS: u32 = 10;
const REST_TICKS: u32 = 12;
const COFFEE_TICKS: u32 = 12;
const WINDOW_TICKS: u32 = 12;

/// When the responder in a conversation gets its line in.
const TALK_REPLY_AT: u32 = 2;
/// Mid-break flavor-line moments.
const REST_MID_AT: u32 = 6;
const COFFEE_BREWING_AT: u32 = 4;
const COFFEE_READY_AT: u32 = 8;
const WINDOW_MID_AT: u32 = 5;

/// Attempts at sampling a random walkable wander target before giving up.
const WANDER_TRIES: usize = 10;

// ── AnalystBehavior ───────────────────────────────────────────────────────────

/// The default behavior for office analysts.  Stateless: all per-agent state
/// lives in the `AgentStore`, so one instance serves the whole floor.
#[derive(Default)]
pub struct AnalystBehavior;

impl BehaviorModel for AnalystBehavior {
    fn replan(
        &self,
        agent: AgentId,
        view: &WorldView<'_>,
        rng: &mut AgentRng,
    ) -> Vec<Intent> {
        let s = view.agents;
        let i = agent.index();

        // Servicing override: outranks every normal transition.  A reserved
        // agent must make progress toward its desk on every tick it can, so
        // any route not already headed home is replaced by a fresh plan that
        // takes its first step immediately.
        if s.servicing[i] {
            if s.at_desk(agent) {
                return vec![Intent::Face(Facing::Up)];
            }
            let heading_home = s.goal[i] == Some(s.desk[i]) && !s.path[i].is_empty();
            return if heading_home {
                vec![Intent::Step]
            } else {
                vec![
                    Intent::Travel { goal: s.desk[i], partner: None },
                    Intent::Step,
                ]
            };
        }

        match s.state[i] {
            BehaviorState::Idle => self.idle(agent, view, rng),
            BehaviorState::Walking => {
                if s.path[i].is_empty() {
                    self.classify_arrival(agent, view, rng)
                } else {
                    vec![Intent::Step]
                }
            }
            BehaviorState::Working => expire(s.state_ticks[i], WORK_TICKS, vec![]),
            BehaviorState::Talking => self.talking(agent, view, rng),
            BehaviorState::Resting => self.resting(agent, view, rng),
            BehaviorState::AtCoffee => self.at_coffee(agent, view, rng),
            BehaviorState::AtWindow => self.at_window(agent, view, rng),
        }
    }
}

/// `Enter(Idle)` plus `extra` once `ticks` have elapsed; nothing before.
fn expire(ticks: u32, after: u32, extra: Vec<Intent>) -> Vec<Intent> {
    if ticks >= after {
        let mut out = vec![Intent::Enter(BehaviorState::Idle)];
        out.extend(extra);
        out
    } else {
        vec![]
    }
}

impl AnalystBehavior {
    // ── Idle: weighted destination pick ───────────────────────────────────

    fn idle(&self, agent: AgentId, view: &WorldView<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        if view.agents.state_ticks[agent.index()] < IDLE_DECIDE_TICKS {
            return vec![];
        }

        let roll: f64 = rng.random();
        if roll < 0.15 {
            self.go_to_desk(agent, view)
        } else if roll < 0.30 {
            self.wander(agent, view, rng)
        } else if roll < 0.50 {
            self.find_interaction(agent, view, rng)
        } else if roll < 0.65 {
            self.go_beside(agent, view, rng, Tile::Table, "Going to take a break at the table")
        } else if roll < 0.80 {
            self.go_beside(agent, view, rng, Tile::Coffee, "Need some coffee to stay focused")
        } else {
            self.go_beside(agent, view, rng, Tile::Window, "Going to get some fresh air")
        }
    }

    fn go_to_desk(&self, agent: AgentId, view: &WorldView<'_>) -> Vec<Intent> {
        vec![
            Intent::Travel { goal: view.agents.desk[agent.index()], partner: None },
            Intent::Say("Going to my station".to_string()),
        ]
    }

    /// Sample random cells until one is walkable; fall back to the desk so
    /// the agent never wedges itself into "no destination".
    fn wander(&self, agent: AgentId, view: &WorldView<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        for _ in 0..WANDER_TRIES {
            let cell = Cell::new(
                rng.gen_range(0..view.floor.cols()),
                rng.gen_range(0..view.floor.rows()),
            );
            if view.is_walkable_for(agent, cell) {
                return vec![
                    Intent::Travel { goal: cell, partner: None },
                    Intent::Say("Taking a walk".to_string()),
                ];
            }
        }
        self.go_to_desk(agent, view)
    }

    /// Pick a colleague and walk to the free adjacent cell closest to us.
    fn find_interaction(
        &self,
        agent: AgentId,
        view: &WorldView<'_>,
        rng: &mut AgentRng,
    ) -> Vec<Intent> {
        let s = view.agents;
        let candidates: Vec<AgentId> = s
            .agent_ids()
            .filter(|&other| other != agent && !s.servicing[other.index()])
            .collect();
        let Some(&partner) = rng.choose(&candidates) else {
            return self.wander(agent, view, rng);
        };

        let here = s.pos[agent.index()];
        let target = s.pos[partner.index()]
            .neighbors4()
            .into_iter()
            .filter(|&c| view.is_walkable_for(agent, c))
            .min_by_key(|&c| here.manhattan(c));
        match target {
            Some(goal) => vec![
                Intent::Travel { goal, partner: Some(partner) },
                Intent::Say(format!("Going to talk to {}", s.name[partner.index()])),
            ],
            // Nobody can stand next to them right now; go stretch instead.
            None => self.wander(agent, view, rng),
        }
    }

    /// Walk to a random free cell beside an amenity tile, desk as fallback.
    fn go_beside(
        &self,
        agent: AgentId,
        view: &WorldView<'_>,
        rng: &mut AgentRng,
        tile: Tile,
        line: &str,
    ) -> Vec<Intent> {
        let spots: Vec<Cell> = view
            .floor
            .cells_beside(tile)
            .into_iter()
            .filter(|&c| view.is_walkable_for(agent, c))
            .collect();
        match rng.choose(&spots) {
            Some(&goal) => vec![
                Intent::Travel { goal, partner: None },
                Intent::Say(line.to_string()),
            ],
            None => self.go_to_desk(agent, view),
        }
    }

    // ── Arrival classification ────────────────────────────────────────────

    /// The path ran out: decide what this spot means.
    fn classify_arrival(
        &self,
        agent: AgentId,
        view: &WorldView<'_>,
        _rng: &mut AgentRng,
    ) -> Vec<Intent> {
        let s = view.agents;
        let i = agent.index();
        let here = s.pos[i];

        if here == s.desk[i] {
            return vec![
                Intent::Enter(BehaviorState::Working),
                Intent::Say("Reviewing data".to_string()),
            ];
        }

        let pending = s.partner[i];
        if pending != AgentId::INVALID {
            let adjacent = here.is_adjacent4(s.pos[pending.index()]);
            return if adjacent && !s.is_engaged(pending) {
                vec![Intent::BeginTalk { partner: pending }]
            } else {
                // Partner moved on or got pulled into a fetch: drop it.
                vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)]
            };
        }

        for (tile, state, line) in [
            (Tile::Table, BehaviorState::Resting, "Taking a breather"),
            (Tile::Coffee, BehaviorState::AtCoffee, "Making a coffee"),
            (Tile::Window, BehaviorState::AtWindow, "Enjoying the view"),
        ] {
            if view.floor.is_beside(here, tile) {
                let mut out = vec![Intent::Enter(state), Intent::Say(line.to_string())];
                if let Some(f) = face_toward_tile(view, here, tile) {
                    out.push(Intent::Face(f));
                }
                return out;
            }
        }

        vec![Intent::Enter(BehaviorState::Idle)]
    }

    // ── Timed in-place states ─────────────────────────────────────────────

    fn talking(&self, agent: AgentId, view: &WorldView<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let s = view.agents;
        let i = agent.index();
        let partner = s.partner[i];

        // The partner may have been pulled away (serviced, expired first).
        let broken = partner == AgentId::INVALID
            || s.partner[partner.index()] != agent
            || s.state[partner.index()] != BehaviorState::Talking;
        if broken {
            return vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)];
        }

        if s.state_ticks[i] >= TALK_TICKS {
            return vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)];
        }

        // Each side exchanges one line, a beat after facing each other.
        if s.state_ticks[i] == TALK_REPLY_AT {
            return vec![Intent::Say(talk_line(s.ticker[i], rng))];
        }

        vec![]
    }

    fn resting(&self, agent: AgentId, view: &WorldView<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let ticks = view.agents.state_ticks[agent.index()];
        if ticks == REST_MID_AT && rng.gen_bool(0.4) {
            return vec![Intent::Say(pick(lines::REST_MID, rng))];
        }
        let extra = if ticks >= REST_TICKS && rng.gen_bool(0.6) {
            vec![Intent::Say(pick(lines::REST_END, rng))]
        } else {
            vec![]
        };
        expire(ticks, REST_TICKS, extra)
    }

    fn at_coffee(&self, agent: AgentId, view: &WorldView<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let ticks = view.agents.state_ticks[agent.index()];
        if ticks == COFFEE_BREWING_AT {
            return vec![Intent::Say("Coffee brewing...".to_string())];
        }
        if ticks == COFFEE_READY_AT {
            return vec![Intent::Say(pick(lines::COFFEE_READY, rng))];
        }
        let extra = if ticks >= COFFEE_TICKS && rng.gen_bool(0.5) {
            vec![Intent::Say(pick(lines::COFFEE_END, rng))]
        } else {
            vec![]
        };
        expire(ticks, COFFEE_TICKS, extra)
    }

    fn at_window(&self, agent: AgentId, view: &WorldView<'_>, rng: &mut AgentRng) -> Vec<Intent> {
        let ticks = view.agents.state_ticks[agent.index()];
        if ticks == WINDOW_MID_AT {
            return vec![Intent::Say(pick(lines::WINDOW_MID, rng))];
        }
        let extra = if ticks >= WINDOW_TICKS && rng.gen_bool(0.4) {
            vec![Intent::Say(pick(lines::WINDOW_END, rng))]
        } else {
            vec![]
        };
        expire(ticks, WINDOW_TICKS, extra)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pick(table: &[&str], rng: &mut AgentRng) -> String {
    rng.choose(table).copied().unwrap_or_default().to_string()
}

/// Half the time generic chatter, half the time a line about one's own
/// symbol.
fn talk_line(ticker: ot_core::Ticker, rng: &mut AgentRng) -> String {
    if rng.gen_bool(0.5) {
        pick(lines::SMALL_TALK, rng)
    } else {
        pick(lines::ticker_talk(ticker), rng)
    }
}

/// Face the nearest axis-adjacent amenity tile, if there is one; diagonal
/// neighbors give no preference.
fn face_toward_tile(view: &WorldView<'_>, here: Cell, tile: Tile) -> Option<Facing> {
    here.neighbors4()
        .into_iter()
        .find(|&n| view.floor.tile(n) == Some(tile))
        .map(|n| Facing::toward(here, n))
}
