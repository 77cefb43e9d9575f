//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ot_agent::AgentStoreBuilder;
//! use ot_core::{Cell, Ticker};
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .analyst("Analyst Biton", Ticker::Btc, Cell::new(6, 6))
//!     .analyst("Analyst Ethan", Ticker::Eth, Cell::new(6, 16))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use std::collections::HashSet;

use ot_core::{Cell, Ticker};

use crate::error::{AgentError, AgentResult};
use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    seed: u64,
    rows: Vec<(String, Ticker, Cell)>,
}

impl AgentStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, rows: Vec::new() }
    }

    /// Add one analyst: display name, the ticker they cover, and their desk
    /// seat.  Insertion order fixes the `AgentId` assignment.
    pub fn analyst(mut self, name: &str, ticker: Ticker, desk: Cell) -> Self {
        self.rows.push((name.to_string(), ticker, desk));
        self
    }

    /// Validate and construct the store.  Agents start seated at their
    /// desks, idle, silent, and unserviced.
    ///
    /// # Errors
    ///
    /// Each ticker and each desk seat may appear at most once: two analysts
    /// covering one symbol would break 1:1 job routing, and two agents
    /// cannot share a cell.
    pub fn build(self) -> AgentResult<(AgentStore, AgentRngs)> {
        let mut tickers = HashSet::new();
        let mut desks = HashSet::new();
        for (_, ticker, desk) in &self.rows {
            if !tickers.insert(*ticker) {
                return Err(AgentError::DuplicateTicker(*ticker));
            }
            if !desks.insert(*desk) {
                return Err(AgentError::DeskCollision(*desk));
            }
        }

        let count = self.rows.len();
        let store = AgentStore::new(self.rows);
        let rngs = AgentRngs::new(count, self.seed);
        Ok((store, rngs))
    }
}
