//! Fixed game parameters and bot phrasing

/// Default lower end of the guessing range
pub const DEFAULT_LOWER_BOUND: i32 = 1;

/// Default upper end of the guessing range
pub const DEFAULT_UPPER_BOUND: i32 = 1000;

/// Command that starts (or restarts) a game, matched case-insensitively
pub const START_COMMAND: &str = "start";

/// Substring the client sends once the bot guessed right
pub const DEFAULT_WIN_MARKER: &str = "クリア";

/// Substrings that end the current game
pub const DEFAULT_END_SYNONYMS: &[&str] = &["終了", "終わり", "おわり", "やめる", "bye"];

/// Token meaning "your guess is too high"
pub const OVER_TOKEN: &str = "Over";

/// Token meaning "your guess is too low"
pub const UNDER_TOKEN: &str = "Under";

/// Game parameters shared by every session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    /// Smallest number the user may pick
    pub lower_bound: i32,

    /// Largest number the user may pick
    pub upper_bound: i32,

    /// Substring signalling a correct guess
    pub win_marker: String,

    /// Substrings that end the game
    pub end_synonyms: Vec<String>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            win_marker: DEFAULT_WIN_MARKER.to_string(),
            end_synonyms: DEFAULT_END_SYNONYMS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl GameRules {
    /// Greeting sent when a game starts
    pub fn greeting(&self) -> String {
        format!(
            "数当てゲームを始めます！\n\
             {lower}から{upper}までの数字をひとつ思い浮かべてください。私が当てます。\n\
             私の予想が大きすぎたら「{OVER_TOKEN}」、小さすぎたら「{UNDER_TOKEN}」と送ってください。\n\
             当たったら「{marker}」と送ってね。",
            lower = self.lower_bound,
            upper = self.upper_bound,
            marker = self.win_marker,
        )
    }

    /// Message sent when the user ends the game
    pub fn farewell(&self) -> String {
        format!("ゲームを終了しました。また遊んでね！「{START_COMMAND}」でいつでも始められます。")
    }

    /// Whether `text` is the start command
    pub fn is_start(&self, text: &str) -> bool {
        text.eq_ignore_ascii_case(START_COMMAND)
    }

    /// Whether `text` contains any end synonym
    pub fn is_end(&self, text: &str) -> bool {
        self.end_synonyms
            .iter()
            .any(|synonym| !synonym.is_empty() && text.contains(synonym.as_str()))
    }

    /// Whether `text` contains the win marker
    pub fn is_win(&self, text: &str) -> bool {
        !self.win_marker.is_empty() && text.contains(self.win_marker.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = GameRules::default();
        assert_eq!(rules.lower_bound, 1);
        assert_eq!(rules.upper_bound, 1000);
        assert!(rules.greeting().contains("1から1000まで"));
        assert!(rules.greeting().contains("Over"));
    }

    #[test]
    fn test_start_is_case_insensitive() {
        let rules = GameRules::default();
        assert!(rules.is_start("start"));
        assert!(rules.is_start("START"));
        assert!(rules.is_start("Start"));
        assert!(!rules.is_start("restart"));
        assert!(!rules.is_start("start now"));
    }

    #[test]
    fn test_end_matches_substring() {
        let rules = GameRules::default();
        assert!(rules.is_end("もう終了"));
        assert!(rules.is_end("やめる！"));
        assert!(!rules.is_end("Under"));
    }

    #[test]
    fn test_empty_markers_never_match() {
        let rules = GameRules {
            win_marker: String::new(),
            end_synonyms: vec![String::new()],
            ..GameRules::default()
        };
        assert!(!rules.is_win("anything"));
        assert!(!rules.is_end("anything"));
    }
}
