//! Number-guessing game
//!
//! The user thinks of a number and the bot finds it by binary search. The
//! user answers each guess with `Over` (the guess is too high) or `Under`
//! (the guess is too low), and sends the win marker once the bot is right.
//!
//! Everything in this module is pure: [`engine::step`] maps the current
//! session and an incoming text to the next session, the messages to send,
//! and what should happen to the restart timer.

pub mod commands;
pub mod engine;
pub mod rules;
pub mod state;

pub use commands::Command;
pub use engine::{Action, SessionChange, TimerDirective, Transition};
pub use rules::GameRules;
pub use state::GameSession;
