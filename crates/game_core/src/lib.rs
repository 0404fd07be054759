//! Round controller for the match-cards game.
//!
//! The controller is a pure state machine: every input (a tile click, a
//! restart request, a timer fire) goes through [`RoundController::handle`]
//! and comes back out as a list of [`Effect`]s. Front ends apply those
//! effects to their display, scheduler and score store through the traits
//! in [`ports`].

pub mod config;
pub mod deck;
pub mod ports;
pub mod round;
pub mod scoring;
pub mod timers;

pub use config::GameConfig;
pub use deck::Deck;
pub use ports::{apply_effects, DisplaySurface, Scheduler, ScoreSink};
pub use round::{RoundController, RoundState};
pub use scoring::{classify, format_time, is_new_best};
pub use shared::protocol::{Effect, RoundInput, RoundReport, TimerId, TimerKind};
pub use timers::TimerQueue;
