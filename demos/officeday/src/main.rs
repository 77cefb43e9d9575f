//! officeday — one simulated office day, no network required.
//!
//! Four analysts share a floor with a break table and a coffee machine.
//! A scripted "chain" advances its height every few polls; the scheduler
//! notices, queues one analysis job per ticker, and walks each analyst to
//! their desk in turn.  Everything the scheduler would normally say to the
//! site's terminal widget is printed to stdout instead.

mod layout;

use std::time::Instant;

use anyhow::Result;

use ot_agent::AgentStoreBuilder;
use ot_behavior::AnalystBehavior;
use ot_core::{SimConfig, Tick, Ticker};
use ot_grid::AStarPlanner;
use ot_sched::{
    AnalysisFetcher, AnalysisScheduler, DisplaySink, FetchError, FreshnessSource, SchedConfig,
};
use ot_sim::{SimBuilder, SimObserver, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const TICK_DURATION_MS: u32 = 500;
/// One "day" at two ticks per second.
const TOTAL_TICKS: u64 = 2_000;
/// The scripted chain grows on every third poll.
const CHAIN_GROWTH_PERIOD: u32 = 3;

// ── Scripted collaborators ────────────────────────────────────────────────────

/// A pretend blockchain whose height advances every few polls.
struct ScriptedChain {
    height: u64,
    polls: u32,
}

impl FreshnessSource for ScriptedChain {
    fn watermark(&mut self) -> Result<u64, FetchError> {
        self.polls += 1;
        if self.polls % CHAIN_GROWTH_PERIOD == 0 {
            self.height += 1;
        }
        Ok(self.height)
    }
}

/// Canned per-ticker analysis text, stamped with the watermark it was
/// "computed" at.
struct CannedAnalysis;

impl AnalysisFetcher for CannedAnalysis {
    fn fetch(&mut self, ticker: Ticker, watermark: u64) -> Result<Option<String>, FetchError> {
        let summary = match ticker {
            Ticker::Btc => "dominance steady, on-chain volume climbing",
            Ticker::Eth => "gas fees easing, L2 settlement share up",
            Ticker::Sol => "throughput at highs, validator set stable",
            Ticker::Doge => "social volume spiking, volatility elevated",
        };
        Ok(Some(format!("[block {watermark}] {ticker}: {summary}")))
    }
}

/// Prints what the site's terminal widget would show.
struct StdoutTerminal;

impl DisplaySink for StdoutTerminal {
    fn analysis(&mut self, ticker: Ticker, text: &str) {
        println!("  [analysis] {ticker}: {text}");
    }
    fn status(&mut self, text: &str) {
        println!("  [status]   {text}");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints a one-line floor snapshot every couple of minutes of sim time.
struct FloorTicker {
    every: u64,
}

impl SimObserver for FloorTicker {
    fn on_frame(&mut self, tick: Tick, world: &World) {
        if tick.0 == 0 || tick.0 % self.every != 0 {
            return;
        }
        let line: Vec<String> = world
            .agents
            .agent_ids()
            .map(|a| {
                let i = a.index();
                format!(
                    "{}@{} {}",
                    world.agents.ticker[i],
                    world.agents.pos[i],
                    world.agents.state[i]
                )
            })
            .collect();
        println!("{tick}: {}", line.join(" | "));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== officeday ===");
    println!("Analysts: {}  |  Ticks: {TOTAL_TICKS}  |  Seed: {SEED}", Ticker::ALL.len());
    println!();

    // 1. Floor plan.
    let floor = layout::build()?;
    println!("Floor: {}×{} cells", floor.cols(), floor.rows());

    // 2. Analysts, one per ticker, seated at their desks.
    let mut agents = AgentStoreBuilder::new(SEED);
    for ticker in Ticker::ALL {
        agents = agents.analyst(layout::analyst_name(ticker), ticker, layout::desk_for(ticker));
    }
    let (store, rngs) = agents.build()?;

    // 3. Scheduler over the scripted collaborators.
    let scheduler = AnalysisScheduler::new(
        SchedConfig { seed: SEED, ..SchedConfig::default() },
        ScriptedChain { height: 100, polls: 0 },
        CannedAnalysis,
        StdoutTerminal,
    );

    // 4. Simulation.
    let config = SimConfig {
        tick_duration_ms: TICK_DURATION_MS,
        total_ticks: TOTAL_TICKS,
        seed: SEED,
    };
    let mut sim = SimBuilder::new(
        config,
        floor,
        store,
        rngs,
        AnalystBehavior,
        AStarPlanner::default(),
        scheduler,
    )
    .build()?;

    // 5. Run the day.
    sim.scheduler.start(Tick(0));
    let t0 = Instant::now();
    sim.run(&mut FloorTicker { every: 240 });
    let elapsed = t0.elapsed();

    // 6. Final floor state.
    println!();
    println!("Day complete in {:.3} s", elapsed.as_secs_f64());
    println!("{:<8} {:<16} {:<10} {:<10}", "Ticker", "Analyst", "Cell", "State");
    println!("{}", "-".repeat(48));
    for agent in sim.world.agents.agent_ids() {
        let i = agent.index();
        println!(
            "{:<8} {:<16} {:<10} {:<10}",
            sim.world.agents.ticker[i].to_string(),
            sim.world.agents.name[i],
            sim.world.agents.pos[i].to_string(),
            sim.world.agents.state[i].to_string(),
        );
    }

    Ok(())
}
