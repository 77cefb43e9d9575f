//! Scheduler timing configuration.

/// All scheduler delays, in ticks.
///
/// Defaults assume the standard 500 ms tick: a 10 s poll/task cadence, a
/// half-second arrival check, a 5 s display hold, and a 5–8 s simulated
/// revision pass.
#[derive(Clone, Debug)]
pub struct SchedConfig {
    /// Delay before re-polling the freshness source when the queue is empty.
    pub poll_interval_ticks: u64,

    /// Delay between finishing one job and dispatching the next.
    pub task_interval_ticks: u64,

    /// How often to re-check whether a dispatched agent reached its desk.
    pub arrival_check_ticks: u64,

    /// How long a fresh analysis stays "in flight" after display, so the
    /// visible state matches the data on screen.
    pub display_hold_ticks: u64,

    /// Short wrap-up delay after an empty result or a fetch failure.
    pub wrapup_delay_ticks: u64,

    /// Bounds for the simulated no-new-data revision pass.
    pub revision_min_ticks: u64,
    pub revision_max_ticks: u64,

    /// Seed for the scheduler's own RNG (queue shuffling, revision timing).
    pub seed: u64,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            poll_interval_ticks: 20,
            task_interval_ticks: 20,
            arrival_check_ticks: 1,
            display_hold_ticks: 10,
            wrapup_delay_ticks: 2,
            revision_min_ticks: 10,
            revision_max_ticks: 16,
            seed: 0,
        }
    }
}
