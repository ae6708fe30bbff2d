//! Per-user game state

use crate::game::GameRules;
use chrono::{DateTime, TimeDelta, Utc};

/// One user's guessing game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// Smallest number still possible
    pub lower_bound: i32,

    /// Largest number still possible
    pub upper_bound: i32,

    /// Number most recently proposed to the user
    pub last_guess: Option<i32>,

    /// Over/Under answers processed so far
    pub guess_count: u32,

    /// Set between a win and the automatic restart
    pub awaiting_restart: bool,

    /// When the game started
    pub started_at: DateTime<Utc>,
}

impl GameSession {
    /// Fresh session spanning the full range, with no guess made yet
    pub fn new(rules: &GameRules) -> Self {
        Self {
            lower_bound: rules.lower_bound,
            upper_bound: rules.upper_bound,
            last_guess: None,
            guess_count: 0,
            awaiting_restart: false,
            started_at: Utc::now(),
        }
    }

    /// Floor of the midpoint of the current range
    pub fn midpoint(&self) -> i32 {
        // i64 so extreme bounds cannot overflow; the result lies between them
        let sum = i64::from(self.lower_bound) + i64::from(self.upper_bound);
        sum.div_euclid(2) as i32
    }

    /// Propose the midpoint and remember it
    pub fn make_guess(&mut self) -> i32 {
        let guess = self.midpoint();
        self.last_guess = Some(guess);
        guess
    }

    /// Size of the remaining candidate range minus one
    pub fn range_width(&self) -> i64 {
        i64::from(self.upper_bound) - i64::from(self.lower_bound)
    }

    /// How long the game has been running at `now`
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        (now - self.started_at).max(TimeDelta::zero())
    }

    /// Whether only one candidate is left
    pub fn is_narrowed_down(&self) -> bool {
        self.lower_bound == self.upper_bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(&GameRules::default());
        assert_eq!(session.lower_bound, 1);
        assert_eq!(session.upper_bound, 1000);
        assert_eq!(session.last_guess, None);
        assert_eq!(session.guess_count, 0);
        assert!(!session.awaiting_restart);
    }

    #[test]
    fn test_midpoint_floors() {
        let mut session = GameSession::new(&GameRules::default());
        assert_eq!(session.make_guess(), 500);
        assert_eq!(session.last_guess, Some(500));

        session.lower_bound = 1;
        session.upper_bound = 499;
        assert_eq!(session.midpoint(), 250);

        session.lower_bound = 4;
        session.upper_bound = 5;
        assert_eq!(session.midpoint(), 4);
    }

    #[test]
    fn test_elapsed() {
        let session = GameSession::new(&GameRules::default());
        let later = session.started_at + TimeDelta::seconds(95);
        assert_eq!(session.elapsed(later).num_seconds(), 95);

        // Clock skew never yields a negative duration
        let earlier = session.started_at - TimeDelta::seconds(5);
        assert_eq!(session.elapsed(earlier), TimeDelta::zero());
    }

    #[test]
    fn test_midpoint_with_crossed_bounds() {
        let mut session = GameSession::new(&GameRules::default());
        session.lower_bound = 1;
        session.upper_bound = -2;
        assert_eq!(session.midpoint(), -1);
        assert_eq!(session.range_width(), -3);
    }
}
