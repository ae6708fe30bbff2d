//! Game state transitions
//!
//! [`step`] is a pure function over the current session and one incoming
//! message. Applying the result (storing the session, arming or cancelling
//! the restart timer, delivering messages) is left to the caller.

use crate::game::{Command, GameRules, GameSession};

/// Messages produced by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to send
    Silent,
    /// Send these texts, in order
    Send(Vec<String>),
}

/// What happens to the stored session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// Leave the store alone
    Unchanged,
    /// Create or replace the session from scratch
    Started(GameSession),
    /// Replace the session data of an ongoing game
    Updated(GameSession),
    /// Delete the session
    Ended,
}

/// What happens to the pending restart timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Leave any pending timer as it is
    Keep,
    /// Arm a new timer, replacing any pending one
    Schedule,
    /// Cancel any pending timer
    Cancel,
}

/// Result of feeding one message to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// How the message was classified
    pub command: Command,
    /// Session update
    pub change: SessionChange,
    /// Outbound messages
    pub action: Action,
    /// Restart timer update
    pub timer: TimerDirective,
}

impl Transition {
    fn ignore(command: Command) -> Self {
        Self {
            command,
            change: SessionChange::Unchanged,
            action: Action::Silent,
            timer: TimerDirective::Keep,
        }
    }

    /// The session after this transition, given the one before it
    pub fn resulting_session<'a>(
        &'a self,
        before: Option<&'a GameSession>,
    ) -> Option<&'a GameSession> {
        match &self.change {
            SessionChange::Unchanged => before,
            SessionChange::Started(session) | SessionChange::Updated(session) => Some(session),
            SessionChange::Ended => None,
        }
    }
}

/// Fresh game: greeting followed by the first guess
pub fn start(rules: &GameRules) -> Transition {
    let mut session = GameSession::new(rules);
    let guess = session.make_guess();

    Transition {
        command: Command::Start,
        change: SessionChange::Started(session),
        action: Action::Send(vec![rules.greeting(), guess.to_string()]),
        timer: TimerDirective::Cancel,
    }
}

/// Feed one message to the game
pub fn step(rules: &GameRules, session: Option<&GameSession>, text: &str) -> Transition {
    let text = text.trim();
    let command = Command::classify(text, rules);

    // Start wins over everything, including a pending restart
    if command == Command::Start {
        return start(rules);
    }

    let Some(session) = session else {
        return Transition::ignore(command);
    };

    // Any message interrupts the restart countdown and is otherwise dropped
    if session.awaiting_restart {
        let mut next = session.clone();
        next.awaiting_restart = false;
        return Transition {
            command,
            change: SessionChange::Updated(next),
            action: Action::Silent,
            timer: TimerDirective::Cancel,
        };
    }

    match command {
        Command::End => Transition {
            command,
            change: SessionChange::Ended,
            action: Action::Send(vec![rules.farewell()]),
            timer: TimerDirective::Cancel,
        },
        Command::Win => {
            let mut next = session.clone();
            next.awaiting_restart = true;
            Transition {
                command,
                change: SessionChange::Updated(next),
                action: Action::Silent,
                timer: TimerDirective::Schedule,
            }
        }
        Command::Over | Command::Under => answer(session, command),
        Command::Start | Command::Other => Transition::ignore(command),
    }
}

/// The restart timer went off
///
/// Restarts only if the session is still waiting for it.
pub fn restart_due(rules: &GameRules, session: Option<&GameSession>) -> Transition {
    match session {
        Some(session) if session.awaiting_restart => start(rules),
        _ => Transition::ignore(Command::Other),
    }
}

fn answer(session: &GameSession, command: Command) -> Transition {
    let Some(last_guess) = session.last_guess else {
        return Transition::ignore(command);
    };

    let mut next = session.clone();
    next.guess_count += 1;
    if command == Command::Over {
        next.upper_bound = last_guess.saturating_sub(1);
    } else {
        next.lower_bound = last_guess.saturating_add(1);
    }
    let guess = next.make_guess();

    Transition {
        command,
        change: SessionChange::Updated(next),
        action: Action::Send(vec![guess.to_string()]),
        timer: TimerDirective::Keep,
    }
}
