//! Flavor-line tables for speech bubbles.
//!
//! Purely cosmetic: a skipped line never affects state transitions.

use ot_core::Ticker;

/// Generic market chatter, used by either side of a conversation.
pub const SMALL_TALK: &[&str] = &[
    "Market looks volatile today",
    "Have you seen the latest trend?",
    "Bullish or bearish?",
    "Major resistance ahead",
    "Support levels are holding",
];

/// Symbol-specific conversation lines.
pub fn ticker_talk(ticker: Ticker) -> &'static [&'static str] {
    match ticker {
        Ticker::Btc => &[
            "Bitcoin's dominance is strong",
            "Hash rate is increasing",
            "On-chain metrics look positive",
        ],
        Ticker::Eth => &[
            "ETH gas fees are dropping",
            "Smart contract activity is up",
            "Layer 2 adoption growing",
        ],
        Ticker::Sol => &[
            "Solana TPS hitting new highs",
            "DeFi on SOL expanding",
            "Low latency is key",
        ],
        Ticker::Doge => &[
            "Meme coins gaining traction",
            "Community engagement is high",
            "Social metrics moving",
        ],
    }
}

/// Said partway through a break at the table.
pub const REST_MID: &[&str] = &[
    "This market never sleeps",
    "Sometimes you need a moment to think",
    "The office view is nice today",
    "I should grab coffee next",
    "I've been tracking some interesting patterns",
];

/// Said when a table break ends.
pub const REST_END: &[&str] = &[
    "That was refreshing",
    "Back to work now",
    "Feeling recharged",
    "That was a good break",
    "Time to be productive again",
];

/// Said when the coffee is ready.
pub const COFFEE_READY: &[&str] = &[
    "Ah, that's the good stuff",
    "Perfect! Just what I needed",
    "Nothing like a fresh cup of coffee",
    "This coffee is excellent",
    "Caffeine boost initiated",
];

/// Said when a coffee break ends.
pub const COFFEE_END: &[&str] = &[
    "Now I can focus better",
    "Ready to analyze some data",
    "That cleared my mind",
    "Now back to crypto analysis",
    "Coffee really helps with the market patterns",
];

/// Said while looking out of a window.
pub const WINDOW_MID: &[&str] = &[
    "The fresh air feels nice",
    "What a beautiful day outside",
    "Taking a moment to clear my thoughts",
    "The view helps with perspective",
    "Sometimes you need to look outside to see clearly",
];

/// Said when a window break ends.
pub const WINDOW_END: &[&str] = &[
    "I just had a new insight about the market",
    "I think I see a pattern now",
    "Sometimes distance brings clarity",
    "Back to work with a fresh perspective",
];
