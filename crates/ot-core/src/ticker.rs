//! The closed set of market symbols the office tracks.
//!
//! Each ticker owns exactly one workstation and one analyst.  Keeping the
//! set as an enum (rather than free-form strings) makes "unknown ticker"
//! unrepresentable: job routing, desk lookup, and uniform/flavor tables are
//! all total functions over `Ticker`.

use std::fmt;

/// A tracked market symbol.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ticker {
    Btc,
    Eth,
    Sol,
    Doge,
}

impl Ticker {
    /// Every tracked ticker, in declaration order.  The scheduler rebuilds
    /// its job queue from this list (shuffled) on each poll.
    pub const ALL: [Ticker; 4] = [Ticker::Btc, Ticker::Eth, Ticker::Sol, Ticker::Doge];

    /// Canonical uppercase symbol, as sent to the fetch collaborator.
    pub fn symbol(self) -> &'static str {
        match self {
            Ticker::Btc => "BTC",
            Ticker::Eth => "ETH",
            Ticker::Sol => "SOL",
            Ticker::Doge => "DOGE",
        }
    }

    /// Parse a case-insensitive symbol.  `None` for anything outside the
    /// tracked set.
    pub fn from_symbol(s: &str) -> Option<Ticker> {
        match s.to_ascii_uppercase().as_str() {
            "BTC" => Some(Ticker::Btc),
            "ETH" => Some(Ticker::Eth),
            "SOL" => Some(Ticker::Sol),
            "DOGE" => Some(Ticker::Doge),
            _ => None,
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
