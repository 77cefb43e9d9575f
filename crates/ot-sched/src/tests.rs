//! Unit tests for the timer queue and the scheduler cycle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ot_agent::{AgentStore, AgentStoreBuilder};
use ot_core::{Cell, Tick, Ticker};

use crate::{
    AnalysisFetcher, AnalysisScheduler, DisplaySink, FetchError, FreshnessSource, SchedConfig,
    TimerQueue,
};

// ── Doubles ───────────────────────────────────────────────────────────────────

/// Scripted watermark source: pops queued results, then repeats `fallback`.
struct FakeSource {
    script: VecDeque<Result<u64, FetchError>>,
    fallback: u64,
    polls: Rc<RefCell<usize>>,
}

impl FakeSource {
    fn steady(watermark: u64) -> Self {
        Self { script: VecDeque::new(), fallback: watermark, polls: Rc::new(RefCell::new(0)) }
    }

    fn scripted(script: Vec<Result<u64, FetchError>>, fallback: u64) -> Self {
        Self { script: script.into(), fallback, polls: Rc::new(RefCell::new(0)) }
    }
}

impl FreshnessSource for FakeSource {
    fn watermark(&mut self) -> Result<u64, FetchError> {
        *self.polls.borrow_mut() += 1;
        self.script.pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Records every fetch; answers with one fixed response.
struct FakeFetcher {
    response: Result<Option<String>, FetchError>,
    calls: Rc<RefCell<Vec<(Ticker, u64)>>>,
}

impl FakeFetcher {
    fn returning(response: Result<Option<String>, FetchError>) -> (Self, Rc<RefCell<Vec<(Ticker, u64)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (Self { response, calls: Rc::clone(&calls) }, calls)
    }

    fn text() -> (Self, Rc<RefCell<Vec<(Ticker, u64)>>>) {
        Self::returning(Ok(Some("analysis text".to_string())))
    }
}

impl AnalysisFetcher for FakeFetcher {
    fn fetch(&mut self, ticker: Ticker, watermark: u64) -> Result<Option<String>, FetchError> {
        self.calls.borrow_mut().push((ticker, watermark));
        self.response.clone()
    }
}

#[derive(Default)]
struct SinkLog {
    analyses: Vec<(Ticker, String)>,
    statuses: Vec<String>,
}

struct RecordingSink(Rc<RefCell<SinkLog>>);

impl RecordingSink {
    fn new() -> (Self, Rc<RefCell<SinkLog>>) {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        (Self(Rc::clone(&log)), log)
    }
}

impl DisplaySink for RecordingSink {
    fn analysis(&mut self, ticker: Ticker, text: &str) {
        self.0.borrow_mut().analyses.push((ticker, text.to_string()));
    }
    fn status(&mut self, text: &str) {
        self.0.borrow_mut().statuses.push(text.to_string());
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn full_floor() -> AgentStore {
    AgentStoreBuilder::new(42)
        .analyst("Analyst Biton", Ticker::Btc, Cell::new(6, 6))
        .analyst("Analyst Ethan", Ticker::Eth, Cell::new(6, 16))
        .analyst("Analyst Solar", Ticker::Sol, Cell::new(20, 6))
        .analyst("Analyst Dodge", Ticker::Doge, Cell::new(20, 16))
        .build()
        .unwrap()
        .0
}

/// Tight intervals so cycles complete in a handful of ticks.
fn fast_config() -> SchedConfig {
    SchedConfig {
        poll_interval_ticks: 2,
        task_interval_ticks: 1,
        arrival_check_ticks: 1,
        display_hold_ticks: 2,
        wrapup_delay_ticks: 1,
        revision_min_ticks: 1,
        revision_max_ticks: 1,
        seed: 9,
    }
}

/// Drive `n` ticks, asserting the single-flight invariant the whole way.
fn run<S, F, D>(
    sched: &mut AnalysisScheduler<S, F, D>,
    agents: &mut AgentStore,
    from: Tick,
    n: u64,
) -> Tick
where
    S: FreshnessSource,
    F: AnalysisFetcher,
    D: DisplaySink,
{
    let mut now = from;
    for _ in 0..n {
        sched.tick(now, agents);
        let serviced = agents.servicing.iter().filter(|&&s| s).count();
        assert!(serviced <= 1, "at most one agent may be reserved");
        if sched.in_flight().is_none() {
            assert_eq!(serviced, 0, "no reservation without an in-flight job");
        }
        now = now + 1;
    }
    now
}

// ── Timer queue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer_tests {
    use super::*;

    #[test]
    fn fires_in_tick_order() {
        let mut q = TimerQueue::new();
        q.schedule(Tick(5), "b");
        q.schedule(Tick(2), "a");
        q.schedule(Tick(5), "c");
        assert_eq!(q.next_tick(), Some(Tick(2)));
        assert_eq!(q.pop_due(Tick(5)), vec!["a", "b", "c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn only_due_timers_fire() {
        let mut q = TimerQueue::new();
        q.schedule(Tick(1), 1);
        q.schedule(Tick(10), 2);
        assert_eq!(q.pop_due(Tick(5)), vec![1]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(Tick(10)), vec![2]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut q = TimerQueue::new();
        let keep = q.schedule(Tick(3), "keep");
        let drop = q.schedule(Tick(3), "drop");
        assert!(q.cancel(drop));
        assert!(!q.cancel(drop), "double cancel is a no-op");
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(Tick(3)), vec!["keep"]);
        assert!(!q.cancel(keep), "fired timers cannot be cancelled");
    }

    #[test]
    fn next_tick_skips_fully_cancelled_ticks() {
        let mut q = TimerQueue::new();
        let early = q.schedule(Tick(1), ());
        q.schedule(Tick(4), ());
        q.cancel(early);
        assert_eq!(q.next_tick(), Some(Tick(4)));
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(Tick(1), ());
        q.schedule(Tick(2), ());
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop_due(Tick(100)), Vec::<()>::new());
    }
}

// ── Scheduler cycle ───────────────────────────────────────────────────────────

#[cfg(test)]
mod cycle_tests {
    use super::*;

    #[test]
    fn fresh_data_fetches_every_ticker_once() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, log) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(5), fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 40);

        let mut fetched: Vec<Ticker> = calls.borrow().iter().map(|&(t, _)| t).collect();
        fetched.truncate(Ticker::ALL.len());
        fetched.sort_unstable();
        let mut all = Ticker::ALL.to_vec();
        all.sort_unstable();
        assert_eq!(fetched, all, "every ticker fetched exactly once per cycle");
        assert!(calls.borrow().iter().all(|&(_, w)| w == 5));
        assert_eq!(log.borrow().analyses.len(), 4);
    }

    #[test]
    fn queue_rebuild_is_a_permutation_of_all_tickers() {
        let (fetcher, _) = FakeFetcher::text();
        let (sink, _) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(1), fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        sched.tick(Tick(0), &mut agents); // poll fires, queue rebuilt

        let mut queued = sched.queued_tickers();
        assert_eq!(queued.len(), Ticker::ALL.len());
        queued.sort_unstable();
        queued.dedup();
        assert_eq!(queued.len(), Ticker::ALL.len(), "no duplicates");
    }

    #[test]
    fn unchanged_watermark_revises_without_fetching() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, log) = RecordingSink::new();
        // Watermark 0 == initial last_seen: nothing new.
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(0), fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 30);

        assert!(calls.borrow().is_empty(), "revision cycles never hit the backend");
        assert!(
            log.borrow().statuses.iter().any(|s| s.contains("revised analysis")),
            "revision status lines expected"
        );
    }

    #[test]
    fn watermark_regression_counts_as_nothing_new() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, _) = RecordingSink::new();
        let source = FakeSource::scripted(vec![Ok(5)], 3); // then regresses to 3
        let mut sched = AnalysisScheduler::new(fast_config(), source, fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 120);

        // Only the first cycle (watermark 5) fetched; the regressed cycles
        // ran as revisions.
        assert_eq!(calls.borrow().len(), 4);
        assert!(calls.borrow().iter().all(|&(_, w)| w == 5));
    }

    #[test]
    fn fetch_failure_never_wedges_the_cycle() {
        let (fetcher, calls) = FakeFetcher::returning(Err(FetchError::Network("boom".into())));
        let (sink, log) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(7), fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 40);

        assert_eq!(calls.borrow().len(), 4, "all four jobs attempted");
        assert!(sched.in_flight().is_none(), "slot released after failures");
        assert!(log.borrow().statuses.iter().any(|s| s.starts_with("Error during")));
        assert!(log.borrow().analyses.is_empty());
    }

    #[test]
    fn empty_result_is_not_a_failure() {
        let (fetcher, calls) = FakeFetcher::returning(Ok(None));
        let (sink, log) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(2), fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 40);

        assert_eq!(calls.borrow().len(), 4);
        assert!(log.borrow().analyses.is_empty());
        assert!(
            log.borrow().statuses.iter().any(|s| s.contains("found nothing new")),
        );
    }

    #[test]
    fn poll_error_retries_and_recovers() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, log) = RecordingSink::new();
        let source =
            FakeSource::scripted(vec![Err(FetchError::Timeout), Err(FetchError::Timeout)], 4);
        let polls = Rc::clone(&source.polls);
        let mut sched = AnalysisScheduler::new(fast_config(), source, fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 40);

        assert!(*polls.borrow() >= 3, "poll retried after errors");
        assert!(log.borrow().statuses.iter().any(|s| s.contains("Error checking")));
        assert_eq!(calls.borrow().len(), 4, "recovered and ran the cycle");
    }

    #[test]
    fn fetch_waits_until_the_analyst_is_seated() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, _) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(3), fetcher, sink);
        let mut agents = full_floor();

        // Everyone is away from their desk.
        for i in 0..agents.count {
            agents.pos[i] = Cell::new(2, 2 + i as i32);
        }

        sched.start(Tick(0));
        let now = run(&mut sched, &mut agents, Tick(0), 5);
        let ticker = sched.in_flight().expect("a job should be in flight");
        let agent = agents.agent_for_ticker(ticker).unwrap();
        assert!(agents.servicing[agent.index()]);
        assert!(calls.borrow().is_empty(), "fetch deferred until arrival");

        // Seat the analyst; the next arrival check fires the fetch.
        agents.pos[agent.index()] = agents.desk[agent.index()];
        run(&mut sched, &mut agents, now, 3);
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(calls.borrow()[0].0, ticker);
    }

    #[test]
    fn display_hold_keeps_the_slot_until_it_elapses() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, _) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(9), fetcher, sink);
        let mut agents = full_floor();

        sched.start(Tick(0));
        // T0: poll; T1: dispatch + immediate fetch (agents seated).
        sched.tick(Tick(0), &mut agents);
        sched.tick(Tick(1), &mut agents);
        assert_eq!(calls.borrow().len(), 1);
        let held = sched.in_flight().expect("slot held for display");

        // Still held one tick later (display_hold_ticks = 2)…
        sched.tick(Tick(2), &mut agents);
        assert_eq!(sched.in_flight(), Some(held));
        // …released once the hold elapses.
        sched.tick(Tick(3), &mut agents);
        assert_eq!(sched.in_flight(), None);
        let agent = agents.agent_for_ticker(held).unwrap();
        assert!(!agents.servicing[agent.index()]);
    }

    #[test]
    fn missing_analyst_fails_the_job_and_moves_on() {
        let (fetcher, calls) = FakeFetcher::text();
        let (sink, log) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(6), fetcher, sink);
        // Three desks only — nobody covers DOGE.
        let mut agents = AgentStoreBuilder::new(42)
            .analyst("Analyst Biton", Ticker::Btc, Cell::new(6, 6))
            .analyst("Analyst Ethan", Ticker::Eth, Cell::new(6, 16))
            .analyst("Analyst Solar", Ticker::Sol, Cell::new(20, 6))
            .build()
            .unwrap()
            .0;

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 40);

        assert_eq!(calls.borrow().len(), 3, "covered tickers still fetched");
        assert!(
            log.borrow().statuses.iter().any(|s| s.contains("No analyst available for DOGE")),
        );
        assert!(sched.in_flight().is_none());
    }

    #[test]
    fn stop_wipes_all_transient_state() {
        let (fetcher, _) = FakeFetcher::text();
        let (sink, _) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(8), fetcher, sink);
        let mut agents = full_floor();

        // Park everyone away from their desks so a job stays mid-service.
        for i in 0..agents.count {
            agents.pos[i] = Cell::new(2, 2 + i as i32);
        }
        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 5);
        assert!(sched.in_flight().is_some());

        sched.stop(&mut agents);
        assert!(!sched.is_running());
        assert_eq!(sched.in_flight(), None);
        assert!(!sched.task_in_progress());
        assert!(sched.queued_tickers().is_empty());
        assert_eq!(sched.pending_timers(), 0);
        assert!(agents.servicing.iter().all(|&s| !s), "no agent left reserved");

        // Restarting begins a clean poll cycle.
        sched.start(Tick(100));
        sched.tick(Tick(100), &mut agents);
        assert_eq!(sched.queued_tickers().len(), Ticker::ALL.len());
    }

    #[test]
    fn dispatch_reserves_exactly_one_agent() {
        let (fetcher, _) = FakeFetcher::text();
        let (sink, _) = RecordingSink::new();
        let mut sched =
            AnalysisScheduler::new(fast_config(), FakeSource::steady(4), fetcher, sink);
        let mut agents = full_floor();
        for i in 0..agents.count {
            agents.pos[i] = Cell::new(2, 2 + i as i32);
        }

        sched.start(Tick(0));
        run(&mut sched, &mut agents, Tick(0), 6);

        let ticker = sched.in_flight().unwrap();
        let agent = agents.agent_for_ticker(ticker).unwrap();
        for other in agents.agent_ids() {
            assert_eq!(agents.servicing[other.index()], other == agent);
        }
    }
}
