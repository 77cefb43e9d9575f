//! `ot-sched` — the single-flight analysis scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`timer`]     | `TimerQueue<T>` — tick-keyed timers with cancellable handles |
//! | [`collab`]    | `FreshnessSource`, `AnalysisFetcher`, `DisplaySink` traits |
//! | [`job`]       | `Job` — one unit of fetch work                            |
//! | [`config`]    | `SchedConfig` — intervals and delays, in ticks            |
//! | [`scheduler`] | `AnalysisScheduler` — the poll/dispatch/complete cycle    |
//! | [`error`]     | `FetchError`                                              |
//!
//! # The single-flight discipline
//!
//! The office shares one remote analysis backend, and at most one fetch may
//! be outstanding at any instant.  The scheduler enforces this structurally:
//! a single `in_flight` slot is checked and set within one timer step, and
//! every completion path — success, empty result, failure, missing agent —
//! funnels through the same release step before the next dispatch is even
//! scheduled.  There is no lock; the whole crate is driven from one
//! cooperative tick loop.

pub mod collab;
pub mod config;
pub mod error;
pub mod job;
pub mod scheduler;
pub mod timer;

#[cfg(test)]
mod tests;

pub use collab::{AnalysisFetcher, DisplaySink, FreshnessSource};
pub use config::SchedConfig;
pub use error::FetchError;
pub use job::Job;
pub use scheduler::AnalysisScheduler;
pub use timer::TimerQueue;
