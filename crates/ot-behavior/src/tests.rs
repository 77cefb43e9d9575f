//! Unit tests for the analyst state machine.

use ot_agent::{AgentStoreBuilder, BehaviorState, Facing};
use ot_core::{AgentId, AgentRng, Cell, Tick, Ticker};
use ot_grid::{FloorPlan, Path, Tile};

use crate::{AnalystBehavior, BehaviorModel, Intent, WorldView};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A walled 20×20 room with two desks.
fn floor() -> FloorPlan {
    let mut plan = FloorPlan::new(20, 20).unwrap();
    plan.border(Tile::Wall);
    plan
}

fn two_agents() -> (ot_agent::AgentStore, ot_agent::AgentRngs) {
    AgentStoreBuilder::new(42)
        .analyst("Analyst Biton", Ticker::Btc, Cell::new(6, 6))
        .analyst("Analyst Ethan", Ticker::Eth, Cell::new(6, 16))
        .build()
        .unwrap()
}

fn rng() -> AgentRng {
    AgentRng::new(7, AgentId(0))
}

fn replan(store: &ot_agent::AgentStore, plan: &FloorPlan, agent: AgentId) -> Vec<Intent> {
    let view = WorldView::new(Tick(0), plan, store);
    AnalystBehavior.replan(agent, &view, &mut rng())
}

fn has_travel_to(intents: &[Intent], goal: Cell) -> bool {
    intents
        .iter()
        .any(|i| matches!(i, Intent::Travel { goal: g, .. } if *g == goal))
}

// ── Servicing override ────────────────────────────────────────────────────────

#[cfg(test)]
mod servicing_tests {
    use super::*;

    #[test]
    fn seated_agent_freezes_facing_up() {
        let (mut store, _) = two_agents();
        store.begin_service(AgentId(0));
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(intents, vec![Intent::Face(Facing::Up)]);
    }

    #[test]
    fn away_agent_plans_toward_desk() {
        let (mut store, _) = two_agents();
        store.begin_service(AgentId(0));
        store.pos[0] = Cell::new(6, 10);
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(has_travel_to(&intents, Cell::new(6, 6)));
        assert!(
            intents.contains(&Intent::Step),
            "a reserved agent steps the same tick it plans"
        );
    }

    #[test]
    fn away_agent_already_heading_home_keeps_stepping() {
        let (mut store, _) = two_agents();
        store.begin_service(AgentId(0));
        store.pos[0] = Cell::new(6, 10);
        store.path[0] = Path::from_cells(vec![Cell::new(6, 9)]);
        store.goal[0] = Some(Cell::new(6, 6));
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(intents, vec![Intent::Step]);
    }

    #[test]
    fn stale_wander_route_is_replaced_by_a_desk_plan() {
        // Flagged mid-walk toward somewhere else: the old route is dropped.
        let (mut store, _) = two_agents();
        store.begin_service(AgentId(0));
        store.pos[0] = Cell::new(6, 10);
        store.path[0] = Path::from_cells(vec![Cell::new(7, 10), Cell::new(8, 10)]);
        store.goal[0] = Some(Cell::new(8, 10));
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(has_travel_to(&intents, Cell::new(6, 6)));
        assert!(intents.contains(&Intent::Step));
    }

    #[test]
    fn override_outranks_engaged_states() {
        // A talking agent that gets flagged must head for the desk, not
        // keep chatting.
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 10);
        store.enter_state(AgentId(0), BehaviorState::Talking);
        store.begin_service(AgentId(0));
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(has_travel_to(&intents, Cell::new(6, 6)));
    }
}

// ── Idle decisions ────────────────────────────────────────────────────────────

#[cfg(test)]
mod idle_tests {
    use super::*;

    #[test]
    fn waits_out_the_idle_period() {
        let (mut store, _) = two_agents();
        store.state_ticks[0] = 9;
        assert!(replan(&store, &floor(), AgentId(0)).is_empty());
    }

    #[test]
    fn decides_a_destination_after_the_idle_period() {
        let (mut store, _) = two_agents();
        store.state_ticks[0] = 10;
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(
            intents.iter().any(|i| matches!(i, Intent::Travel { .. })),
            "an idle decision always produces a Travel: {intents:?}"
        );
    }

    #[test]
    fn falls_back_to_desk_when_nowhere_is_walkable() {
        // Single agent on a floor that is wall everywhere except its own
        // cell: every destination branch must degrade to the desk.
        let mut plan = FloorPlan::new(20, 20).unwrap();
        plan.fill_rect(0, 0, 19, 19, Tile::Wall).unwrap();
        plan.set(Cell::new(6, 6), Tile::Chair).unwrap();
        let (mut store, _) = AgentStoreBuilder::new(1)
            .analyst("Analyst Biton", Ticker::Btc, Cell::new(6, 6))
            .build()
            .unwrap();
        store.state_ticks[0] = 10;
        for seed in 0..20u64 {
            let view = WorldView::new(Tick(0), &plan, &store);
            let mut rng = AgentRng::new(seed, AgentId(0));
            let intents = AnalystBehavior.replan(AgentId(0), &view, &mut rng);
            assert!(
                has_travel_to(&intents, Cell::new(6, 6)),
                "seed {seed}: expected desk fallback, got {intents:?}"
            );
        }
    }
}

// ── Walking and arrival classification ────────────────────────────────────────

#[cfg(test)]
mod arrival_tests {
    use super::*;

    #[test]
    fn walking_with_cells_left_steps() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::Walking);
        store.path[0] = Path::from_cells(vec![Cell::new(6, 7)]);
        assert_eq!(replan(&store, &floor(), AgentId(0)), vec![Intent::Step]);
    }

    #[test]
    fn arriving_at_desk_starts_working() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(intents.contains(&Intent::Enter(BehaviorState::Working)));
    }

    #[test]
    fn arriving_beside_the_table_starts_resting() {
        let mut plan = floor();
        plan.set(Cell::new(10, 10), Tile::Table).unwrap();
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 11);
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &plan, AgentId(0));
        assert!(intents.contains(&Intent::Enter(BehaviorState::Resting)));
        assert!(intents.contains(&Intent::Face(Facing::Up)), "faces the table");
    }

    #[test]
    fn arriving_beside_coffee_starts_a_coffee_break() {
        let mut plan = floor();
        plan.set(Cell::new(12, 3), Tile::Coffee).unwrap();
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(11, 3);
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &plan, AgentId(0));
        assert!(intents.contains(&Intent::Enter(BehaviorState::AtCoffee)));
    }

    #[test]
    fn arriving_nowhere_special_goes_idle() {
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 10);
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(intents, vec![Intent::Enter(BehaviorState::Idle)]);
    }

    #[test]
    fn arriving_next_to_pending_partner_begins_talk() {
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 10);
        store.pos[1] = Cell::new(10, 11);
        store.partner[0] = AgentId(1);
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(intents, vec![Intent::BeginTalk { partner: AgentId(1) }]);
    }

    #[test]
    fn busy_partner_cancels_the_approach() {
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 10);
        store.pos[1] = Cell::new(10, 11);
        store.partner[0] = AgentId(1);
        store.servicing[1] = true;
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(
            intents,
            vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)]
        );
    }

    #[test]
    fn departed_partner_cancels_the_approach() {
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 10);
        store.pos[1] = Cell::new(4, 4); // wandered off
        store.partner[0] = AgentId(1);
        store.enter_state(AgentId(0), BehaviorState::Walking);
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(
            intents,
            vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)]
        );
    }
}

// ── Timed in-place states ─────────────────────────────────────────────────────

#[cfg(test)]
mod duration_tests {
    use super::*;

    #[test]
    fn working_runs_its_course() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::Working);
        store.state_ticks[0] = 14;
        assert!(replan(&store, &floor(), AgentId(0)).is_empty());
        store.state_ticks[0] = 15;
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(intents.contains(&Intent::Enter(BehaviorState::Idle)));
    }

    #[test]
    fn talk_expires_and_clears_the_partner() {
        let (mut store, _) = two_agents();
        store.pos[0] = Cell::new(10, 10);
        store.pos[1] = Cell::new(10, 11);
        store.enter_state(AgentId(0), BehaviorState::Talking);
        store.enter_state(AgentId(1), BehaviorState::Talking);
        store.partner[0] = AgentId(1);
        store.partner[1] = AgentId(0);
        store.state_ticks[0] = 10;
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(
            intents,
            vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)]
        );
    }

    #[test]
    fn talk_collapses_when_partner_stops_talking() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::Talking);
        store.partner[0] = AgentId(1);
        // Partner is idle and no longer points back.
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(
            intents,
            vec![Intent::CancelTalk, Intent::Enter(BehaviorState::Idle)]
        );
    }

    #[test]
    fn responder_gets_a_line_in() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::Talking);
        store.enter_state(AgentId(1), BehaviorState::Talking);
        store.partner[0] = AgentId(1);
        store.partner[1] = AgentId(0);
        store.state_ticks[0] = 2;
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(matches!(intents.as_slice(), [Intent::Say(_)]));
    }

    #[test]
    fn coffee_phases_brew_then_sip() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::AtCoffee);
        store.state_ticks[0] = 4;
        let intents = replan(&store, &floor(), AgentId(0));
        assert_eq!(intents, vec![Intent::Say("Coffee brewing...".to_string())]);
        store.state_ticks[0] = 8;
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(matches!(intents.as_slice(), [Intent::Say(_)]));
        store.state_ticks[0] = 12;
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(intents.contains(&Intent::Enter(BehaviorState::Idle)));
    }

    #[test]
    fn window_break_expires() {
        let (mut store, _) = two_agents();
        store.enter_state(AgentId(0), BehaviorState::AtWindow);
        store.state_ticks[0] = 12;
        let intents = replan(&store, &floor(), AgentId(0));
        assert!(intents.contains(&Intent::Enter(BehaviorState::Idle)));
    }
}
