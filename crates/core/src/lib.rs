//! Rules and turn engine for a four-seat shedding card game. Keep this crate
//! free of IO and platform concerns; presentation hangs off the event bus.

pub mod cards;
pub mod combo;
pub mod config;
pub mod deck;
pub mod events;
pub mod hand;
pub mod policy;
pub mod rng;
pub mod round;
pub mod rules;

pub use cards::*;
pub use combo::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use hand::*;
pub use policy::*;
pub use rng::*;
pub use round::*;
pub use rules::*;
