//! Classification of incoming text
//!
//! The start command is matched on the whole message ignoring ASCII case.
//! Everything else is a substring match, and `Over`/`Under` are matched
//! case-sensitively: lowercase `over` is not an answer.

use crate::game::GameRules;
use crate::game::rules::{OVER_TOKEN, UNDER_TOKEN};

/// What an incoming message asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new game
    Start,
    /// End the current game
    End,
    /// The last guess was right
    Win,
    /// The last guess was too high
    Over,
    /// The last guess was too low
    Under,
    /// Anything else
    Other,
}

impl Command {
    /// Classify an already-trimmed message
    ///
    /// Earlier variants win when a message matches several of them.
    pub fn classify(input: &str, rules: &GameRules) -> Self {
        if rules.is_start(input) {
            Command::Start
        } else if rules.is_end(input) {
            Command::End
        } else if rules.is_win(input) {
            Command::Win
        } else if input.contains(OVER_TOKEN) {
            Command::Over
        } else if input.contains(UNDER_TOKEN) {
            Command::Under
        } else {
            Command::Other
        }
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Start a new game",
            Command::End => "End the game",
            Command::Win => "Correct guess",
            Command::Over => "Guess too high",
            Command::Under => "Guess too low",
            Command::Other => "Unrecognized message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(input: &str) -> Command {
        Command::classify(input, &GameRules::default())
    }

    #[test]
    fn test_classify_start() {
        assert_eq!(classify("start"), Command::Start);
        assert_eq!(classify("sTaRt"), Command::Start);
    }

    #[test]
    fn test_classify_answers() {
        assert_eq!(classify("Over"), Command::Over);
        assert_eq!(classify("Under"), Command::Under);
        assert_eq!(classify("It's Over 9000"), Command::Over);
        assert_eq!(classify("Over or Under"), Command::Over);
    }

    #[test]
    fn test_lowercase_answers_are_not_commands() {
        assert_eq!(classify("over"), Command::Other);
        assert_eq!(classify("under"), Command::Other);
        assert_eq!(classify("OVER"), Command::Other);
    }

    #[test]
    fn test_classify_end_and_win() {
        assert_eq!(classify("終了"), Command::End);
        assert_eq!(classify("クリア！"), Command::Win);
        assert_eq!(classify("クリアしたので終了"), Command::End);
    }

    #[test]
    fn test_description() {
        assert_eq!(Command::Over.description(), "Guess too high");
        assert_eq!(Command::Other.description(), "Unrecognized message");
    }
}
