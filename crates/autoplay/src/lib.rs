//! Seeded headless rounds driven through the core tick API.

mod config;
mod error;
mod runner;
mod simulator;
mod trace;

pub use config::*;
pub use error::*;
pub use runner::*;
pub use simulator::*;
pub use trace::*;
