//! `AnalysisScheduler` — serializes remote analysis fetches.
//!
//! # Cycle
//!
//! ```text
//! Poll ──► rebuild queue (one job per ticker, shuffled) ─► Dispatch
//!   ▲                                                        │
//!   │                                   reserve agent, walk to desk,
//!   │                                   fetch once seated
//!   │                                                        │
//!   └───────────── Finish (release agent, clear slot) ◄──────┘
//! ```
//!
//! Exactly one continuation timer is pending at any moment, and exactly one
//! job can hold the `in_flight` slot.  Every completion path — displayed
//! analysis, empty result, fetch failure, missing agent — converges on the
//! same `Finish` step, so the slot can never leak.
//!
//! Failure is routine here: a poll error re-arms the poll, a fetch error
//! releases the slot after a short delay, and both leave a status line
//! behind.  Nothing in this module aborts the cycle.

use std::collections::VecDeque;

use tracing::{debug, warn};

use ot_agent::AgentStore;
use ot_core::{SimRng, Tick, Ticker};

use crate::{AnalysisFetcher, DisplaySink, FreshnessSource, Job, SchedConfig, TimerQueue};

// ── Cycle steps ───────────────────────────────────────────────────────────────

/// A pending continuation in the scheduler's timer queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    /// Re-poll the freshness source (or skip ahead if work is pending).
    Poll,
    /// Pop the queue head and route it to its analyst.
    Dispatch,
    /// Re-check whether the reserved analyst reached its desk.
    CheckArrival,
    /// Release the in-flight slot and schedule the next cycle step.
    Finish(FinishKind),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FinishKind {
    /// Fresh analysis was displayed; the hold time has elapsed.
    Displayed,
    /// The backend had nothing new for this ticker.
    FoundNothing,
    /// The local revision pass (no new watermark) wrapped up.
    Revised,
    /// The fetch failed; already logged.
    Failed,
}

// ── AnalysisScheduler ─────────────────────────────────────────────────────────

/// Owns the job queue, the single in-flight slot, and the collaborator
/// endpoints.  Driven by [`tick`][Self::tick] from the simulation loop.
pub struct AnalysisScheduler<S, F, D> {
    config: SchedConfig,
    source: S,
    fetcher: F,
    sink: D,

    running: bool,
    queue: VecDeque<Job>,
    in_flight: Option<Job>,
    task_in_progress: bool,

    /// Latest watermark reported by the source.
    watermark: u64,
    /// Watermark as of the last cycle that saw new data.
    last_seen: u64,

    timers: TimerQueue<Step>,
    rng: SimRng,
}

impl<S, F, D> AnalysisScheduler<S, F, D>
where
    S: FreshnessSource,
    F: AnalysisFetcher,
    D: DisplaySink,
{
    pub fn new(config: SchedConfig, source: S, fetcher: F, sink: D) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            source,
            fetcher,
            sink,
            running: false,
            queue: VecDeque::new(),
            in_flight: None,
            task_in_progress: false,
            watermark: 0,
            last_seen: 0,
            timers: TimerQueue::new(),
            rng,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin scheduling: the first poll fires on the next tick.
    pub fn start(&mut self, now: Tick) {
        if self.running {
            return;
        }
        debug!("scheduler starting");
        self.running = true;
        self.timers.schedule(now, Step::Poll);
    }

    /// Stop scheduling and wipe all transient state: timers, queue, the
    /// in-flight slot, and every agent's servicing flag.  A later
    /// [`start`][Self::start] begins a fresh cycle with no memory of this
    /// one.
    pub fn stop(&mut self, agents: &mut AgentStore) {
        debug!("scheduler stopping");
        self.running = false;
        self.timers.clear();
        self.queue.clear();
        self.in_flight = None;
        self.task_in_progress = false;
        for agent in agents.agent_ids().collect::<Vec<_>>() {
            if agents.servicing[agent.index()] {
                agents.release_from_service(agent);
            }
        }
    }

    /// Run every cycle step that has come due at `now`.
    pub fn tick(&mut self, now: Tick, agents: &mut AgentStore) {
        for step in self.timers.pop_due(now) {
            if !self.running {
                return;
            }
            match step {
                Step::Poll => self.poll(now, agents),
                Step::Dispatch => self.dispatch(now, agents),
                Step::CheckArrival => self.check_arrival(now, agents),
                Step::Finish(kind) => self.finish(now, agents, kind),
            }
        }
    }

    // ── Inspection (used by tests and the embedding app) ──────────────────

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The ticker currently holding the single-flight slot, if any.
    pub fn in_flight(&self) -> Option<Ticker> {
        self.in_flight.map(|job| job.ticker)
    }

    pub fn task_in_progress(&self) -> bool {
        self.task_in_progress
    }

    /// Tickers still queued this cycle, head first.
    pub fn queued_tickers(&self) -> Vec<Ticker> {
        self.queue.iter().map(|job| job.ticker).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Read access to the display sink (for apps that own richer sinks).
    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut D {
        &mut self.sink
    }

    // ── Step: poll ────────────────────────────────────────────────────────

    fn poll(&mut self, now: Tick, agents: &mut AgentStore) {
        // A cycle is still winding through the queue; check back later.
        if self.task_in_progress || !self.queue.is_empty() {
            self.schedule_next(now);
            return;
        }

        self.sink.status("Checking source for new data...");
        match self.source.watermark() {
            Ok(watermark) => {
                self.watermark = watermark;
                let has_new = watermark > self.last_seen;
                if has_new {
                    self.sink.status("New data found!");
                    self.last_seen = watermark;
                } else {
                    self.sink.status("No new data.");
                }
                self.rebuild_queue(has_new, agents);
                self.schedule_next(now);
            }
            Err(err) => {
                // Non-fatal: leave the queue alone and re-arm the poll.
                warn!(error = %err, "freshness poll failed");
                self.sink.status("Error checking for new data");
                self.timers
                    .schedule(now + self.config.poll_interval_ticks, Step::Poll);
            }
        }
    }

    /// One job per known ticker, shuffled so no symbol monopolizes the head
    /// of the queue across cycles.
    fn rebuild_queue(&mut self, has_new_data: bool, agents: &mut AgentStore) {
        if let Some(stale) = self.in_flight.take() {
            // Poll only runs between cycles, so a populated slot here means
            // an earlier cycle leaked; recover rather than wedge.
            warn!(ticker = %stale.ticker, "clearing stale in-flight job");
            if let Some(agent) = agents.agent_for_ticker(stale.ticker) {
                agents.release_from_service(agent);
            }
        }

        let mut tickers = Ticker::ALL;
        self.rng.shuffle(&mut tickers);
        self.queue = tickers
            .into_iter()
            .map(|ticker| Job { ticker, has_new_data })
            .collect();
        debug!(
            order = ?self.queue.iter().map(|j| j.ticker).collect::<Vec<_>>(),
            has_new_data,
            "queue rebuilt"
        );
    }

    // ── Step: dispatch ────────────────────────────────────────────────────

    fn dispatch(&mut self, now: Tick, agents: &mut AgentStore) {
        if self.task_in_progress || self.in_flight.is_some() || self.queue.is_empty() {
            debug!(
                task_in_progress = self.task_in_progress,
                queued = self.queue.len(),
                "dispatch skipped"
            );
            self.schedule_next(now);
            return;
        }

        // Checked-then-set within this one step: the single-flight gate.
        let Some(job) = self.queue.pop_front() else {
            return;
        };
        self.task_in_progress = true;
        self.in_flight = Some(job);
        debug!(ticker = %job.ticker, has_new_data = job.has_new_data, "job dispatched");

        match agents.agent_for_ticker(job.ticker) {
            None => {
                // No seated analyst: fail this job, keep the cycle moving.
                warn!(ticker = %job.ticker, "no analyst covers ticker");
                self.sink
                    .status(&format!("No analyst available for {}", job.ticker));
                self.release(agents);
                self.schedule_next(now);
            }
            Some(agent) => {
                agents.begin_service(agent);
                agents.speak(agent, "Analyzing the market");
                self.sink
                    .status(&format!("{} performing analysis...", agents.name[agent.index()]));
                if agents.at_desk(agent) {
                    self.perform_fetch(now, agents);
                } else {
                    self.timers
                        .schedule(now + self.config.arrival_check_ticks, Step::CheckArrival);
                }
            }
        }
    }

    // ── Step: wait for the analyst to sit down ────────────────────────────

    fn check_arrival(&mut self, now: Tick, agents: &mut AgentStore) {
        let Some(job) = self.in_flight else {
            return; // stale timer after a recovery path
        };
        match agents.agent_for_ticker(job.ticker) {
            Some(agent) if agents.at_desk(agent) => self.perform_fetch(now, agents),
            Some(_) => {
                self.timers
                    .schedule(now + self.config.arrival_check_ticks, Step::CheckArrival);
            }
            None => {
                self.release(agents);
                self.schedule_next(now);
            }
        }
    }

    // ── The fetch itself ──────────────────────────────────────────────────

    fn perform_fetch(&mut self, now: Tick, agents: &mut AgentStore) {
        let Some(job) = self.in_flight else {
            return;
        };

        if !job.has_new_data {
            // Watermark unchanged: revise the existing analysis locally and
            // report in after a believable working pause.
            debug!(ticker = %job.ticker, "revising analysis, no new data expected");
            let hold = self
                .rng
                .gen_range(self.config.revision_min_ticks..=self.config.revision_max_ticks);
            self.timers.schedule(now + hold, Step::Finish(FinishKind::Revised));
            return;
        }

        let name = agents
            .agent_for_ticker(job.ticker)
            .map(|a| agents.name[a.index()].clone())
            .unwrap_or_else(|| format!("{} desk", job.ticker));

        match self.fetcher.fetch(job.ticker, self.watermark) {
            Ok(Some(text)) => {
                self.sink.analysis(job.ticker, &text);
                self.sink
                    .status(&format!("{name} finished analysis and found something new!"));
                if let Some(agent) = agents.agent_for_ticker(job.ticker) {
                    agents.speak(agent, "Analysis complete");
                }
                self.timers.schedule(
                    now + self.config.display_hold_ticks,
                    Step::Finish(FinishKind::Displayed),
                );
            }
            Ok(None) => {
                self.sink
                    .status(&format!("{name} finished analysis and found nothing new."));
                self.timers.schedule(
                    now + self.config.wrapup_delay_ticks,
                    Step::Finish(FinishKind::FoundNothing),
                );
            }
            Err(err) => {
                warn!(ticker = %job.ticker, error = %err, "analysis fetch failed");
                self.sink.status(&format!("Error during {name}'s analysis"));
                self.timers.schedule(
                    now + self.config.wrapup_delay_ticks,
                    Step::Finish(FinishKind::Failed),
                );
            }
        }
    }

    // ── Step: finish ──────────────────────────────────────────────────────

    fn finish(&mut self, now: Tick, agents: &mut AgentStore, kind: FinishKind) {
        let Some(job) = self.in_flight else {
            return;
        };
        if kind == FinishKind::Revised {
            let name = agents
                .agent_for_ticker(job.ticker)
                .map(|a| {
                    agents.speak(a, "Analysis revision complete");
                    agents.name[a.index()].clone()
                })
                .unwrap_or_else(|| format!("{} desk", job.ticker));
            self.sink
                .status(&format!("{name} revised analysis and found nothing new."));
        }
        debug!(ticker = %job.ticker, ?kind, "job finished");
        self.release(agents);
        self.schedule_next(now);
    }

    /// Clear the in-flight slot and hand the analyst back to the floor.
    fn release(&mut self, agents: &mut AgentStore) {
        if let Some(job) = self.in_flight.take()
            && let Some(agent) = agents.agent_for_ticker(job.ticker)
        {
            agents.release_from_service(agent);
        }
        self.task_in_progress = false;
    }

    /// Arm the single continuation timer: more jobs → dispatch, otherwise
    /// poll again.  Either way the cycle keeps breathing.
    fn schedule_next(&mut self, now: Tick) {
        let step = if self.queue.is_empty() {
            Step::Poll
        } else {
            Step::Dispatch
        };
        self.timers
            .schedule(now + self.config.task_interval_ticks, step);
    }
}
