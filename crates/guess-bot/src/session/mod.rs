//! Session storage for bot users
//!
//! One entry per user: the game state plus the restart timer armed after a
//! win. The store owns the timers so that replacing or deleting a session
//! always cancels the timer that belonged to it.

pub mod store;
pub mod timer;

pub use store::{SessionEntry, SessionStore, SessionsGuard};
pub use timer::RestartTimer;
