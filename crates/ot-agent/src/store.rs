//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The behavior layer needs `&AgentStore` (a read-only view of everyone) and
//! `&mut AgentRng` (the deciding agent's own randomness) at the same time.
//! Keeping RNGs in a separate struct lets the tick loop borrow both without
//! fighting the borrow checker.

use ot_core::{AgentId, AgentRng, Cell, Ticker};
use ot_grid::Path;

use crate::{BehaviorState, Facing};

/// How many ticks a speech bubble stays visible.
pub const MESSAGE_TICKS: u32 = 10;

/// Speech is clipped to this many words; the rest becomes an ellipsis.
pub const SPEECH_WORD_CAP: usize = 20;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] so the
/// tick loop can hold `&AgentStore` and `&mut AgentRng` simultaneously.
pub struct AgentRngs {
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all analysts.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is
/// the index into all of them:
///
/// ```ignore
/// let here = store.pos[agent.index()];  // O(1)
/// ```
///
/// The store is plain data.  The behavior layer reads it through a view and
/// proposes intents; the simulation's apply phase is the only writer, except
/// for the scheduler's narrow servicing hooks ([`begin_service`] /
/// [`release_from_service`]).
///
/// [`begin_service`]: AgentStore::begin_service
/// [`release_from_service`]: AgentStore::release_from_service
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Identity ──────────────────────────────────────────────────────────
    /// The market symbol each analyst covers.  Unique across the store.
    pub ticker: Vec<Ticker>,
    /// Display name, e.g. "Analyst Biton".
    pub name: Vec<String>,

    // ── Spatial state ─────────────────────────────────────────────────────
    /// Current cell.  Only the apply phase moves an agent, and only onto a
    /// cell that was walkable at step time.
    pub pos: Vec<Cell>,
    /// The agent's own workstation seat.  Fixed after construction.
    pub desk: Vec<Cell>,
    /// Remaining planned route; empty when not traveling.
    pub path: Vec<Path>,
    /// Where the current path was headed.  Kept while walking so a blocked
    /// step can replan; `None` otherwise.
    pub goal: Vec<Option<Cell>>,

    // ── Behavior state ────────────────────────────────────────────────────
    /// FSM tag.
    pub state: Vec<BehaviorState>,
    /// Whole ticks spent in the current state.
    pub state_ticks: Vec<u32>,
    /// Conversation partner — pending while walking over, confirmed while
    /// talking.  `AgentId::INVALID` when none.
    pub partner: Vec<AgentId>,
    /// External-controller override: the agent is reserved for a remote
    /// fetch and must sit at its desk until released.
    pub servicing: Vec<bool>,

    // ── Presentation state ────────────────────────────────────────────────
    /// Current speech-bubble text; empty when silent.
    pub message: Vec<String>,
    /// Remaining ticks the message stays visible.
    pub message_ticks: Vec<u32>,
    /// Sprite orientation.
    pub facing: Vec<Facing>,
}

impl AgentStore {
    pub(crate) fn new(rows: Vec<(String, Ticker, Cell)>) -> Self {
        let count = rows.len();
        let mut name = Vec::with_capacity(count);
        let mut ticker = Vec::with_capacity(count);
        let mut desk = Vec::with_capacity(count);
        for (n, t, d) in rows {
            name.push(n);
            ticker.push(t);
            desk.push(d);
        }
        Self {
            count,
            pos: desk.clone(), // everyone starts seated
            desk,
            ticker,
            name,
            path: vec![Path::empty(); count],
            goal: vec![None; count],
            state: vec![BehaviorState::Idle; count],
            state_ticks: vec![0; count],
            partner: vec![AgentId::INVALID; count],
            servicing: vec![false; count],
            message: vec![String::new(); count],
            message_ticks: vec![0; count],
            facing: vec![Facing::Down; count],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// The agent covering `ticker`, if any desk is assigned to it.
    pub fn agent_for_ticker(&self, ticker: Ticker) -> Option<AgentId> {
        self.ticker
            .iter()
            .position(|&t| t == ticker)
            .map(|i| AgentId(i as u32))
    }

    /// The agent standing on `cell`, if any.
    pub fn occupant_of(&self, cell: Cell) -> Option<AgentId> {
        self.pos
            .iter()
            .position(|&p| p == cell)
            .map(|i| AgentId(i as u32))
    }

    /// `true` if the agent is seated at its own workstation.
    #[inline]
    pub fn at_desk(&self, agent: AgentId) -> bool {
        self.pos[agent.index()] == self.desk[agent.index()]
    }

    /// `true` if the agent cannot accept a conversation right now.
    #[inline]
    pub fn is_engaged(&self, agent: AgentId) -> bool {
        self.servicing[agent.index()] || self.state[agent.index()] == BehaviorState::Talking
    }

    // ── State transitions (apply-phase helpers) ───────────────────────────

    /// Enter `state` and reset the duration counter.
    pub fn enter_state(&mut self, agent: AgentId, state: BehaviorState) {
        self.state[agent.index()] = state;
        self.state_ticks[agent.index()] = 0;
    }

    /// Drop any planned route and its goal.
    pub fn clear_route(&mut self, agent: AgentId) {
        self.path[agent.index()].clear();
        self.goal[agent.index()] = None;
    }

    /// Put `text` in the agent's speech bubble, clipped to
    /// [`SPEECH_WORD_CAP`] words.
    pub fn speak(&mut self, agent: AgentId, text: &str) {
        let words: Vec<&str> = text.split_whitespace().collect();
        let clipped = if words.len() > SPEECH_WORD_CAP {
            format!("{}...", words[..SPEECH_WORD_CAP].join(" "))
        } else {
            text.to_string()
        };
        self.message[agent.index()] = clipped;
        self.message_ticks[agent.index()] = MESSAGE_TICKS;
    }

    /// Age speech bubbles by one tick, clearing expired ones.
    pub fn tick_messages(&mut self) {
        for i in 0..self.count {
            if self.message_ticks[i] > 0 {
                self.message_ticks[i] -= 1;
                if self.message_ticks[i] == 0 {
                    self.message[i].clear();
                }
            }
        }
    }

    // ── Servicing hooks (scheduler-facing) ────────────────────────────────

    /// Reserve the agent for a remote fetch.  The behavior override walks it
    /// to its desk on subsequent ticks; any pending conversation is dropped.
    pub fn begin_service(&mut self, agent: AgentId) {
        self.servicing[agent.index()] = true;
        self.partner[agent.index()] = AgentId::INVALID;
    }

    /// Release a serviced agent back to the floor: flag cleared, route and
    /// state reset so the FSM resumes from `Idle` next tick.
    pub fn release_from_service(&mut self, agent: AgentId) {
        self.servicing[agent.index()] = false;
        self.clear_route(agent);
        self.enter_state(agent, BehaviorState::Idle);
    }
}
