//! Injected collaborator traits.
//!
//! The scheduler never talks to a network itself: freshness polling, the
//! analysis fetch, and the outward display surface are all supplied by the
//! embedding application.  This keeps the whole cycle testable with scripted
//! doubles and keeps wire formats out of the core.

use ot_core::Ticker;

use crate::FetchError;

/// Reports the freshest known data watermark (e.g. a chain height).
///
/// The scheduler compares successive values: a strictly increasing watermark
/// means new analysis may exist for every ticker.
pub trait FreshnessSource {
    fn watermark(&mut self) -> Result<u64, FetchError>;
}

/// Fetches the analysis text for one ticker at a given watermark.
///
/// `Ok(None)` means the backend had nothing new for this ticker — a normal
/// outcome, not a failure.
pub trait AnalysisFetcher {
    fn fetch(&mut self, ticker: Ticker, watermark: u64) -> Result<Option<String>, FetchError>;
}

/// Outward surface for completed analyses and transient status lines.
///
/// Implementations format and present however they like (terminal widget,
/// log file, nothing); the scheduler only supplies plain text and the
/// distinction between durable analysis content and ephemeral status.
pub trait DisplaySink {
    /// A completed analysis for `ticker`.
    fn analysis(&mut self, ticker: Ticker, text: &str);

    /// A short-lived status line ("X performing analysis…").
    fn status(&mut self, text: &str);
}

/// A [`DisplaySink`] that discards everything.
pub struct NullSink;

impl DisplaySink for NullSink {
    fn analysis(&mut self, _ticker: Ticker, _text: &str) {}
    fn status(&mut self, _text: &str) {}
}
