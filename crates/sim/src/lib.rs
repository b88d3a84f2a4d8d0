//! Headless seeded batch runner over the core engine: plays complete
//! bot-only games and aggregates loser statistics.

mod config;
mod error;
mod runner;
mod trace;

pub use config::*;
pub use error::*;
pub use runner::*;
pub use trace::*;
