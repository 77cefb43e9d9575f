//! One unit of scheduled fetch work.

use ot_core::Ticker;

/// A queued fetch job, created during a poll cycle and consumed exactly
/// once by dispatch.
///
/// `has_new_data` is decided at queue-rebuild time for the whole cycle: when
/// the watermark did not advance, the job runs as a local "revision" without
/// touching the remote backend.  Jobs are never re-queued — a failed or
/// stale job simply ends its cycle and the next poll decides again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub ticker: Ticker,
    pub has_new_data: bool,
}
