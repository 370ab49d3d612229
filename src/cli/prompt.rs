use crate::domain::Direction;

pub const PROMPT_HELP: &str =
    "n = next set, p = previous set, <number> = open article, w = weather, q = quit";

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Rotate(Direction),
    /// Open the article shown under this number (1-based)
    Open(usize),
    Weather,
    Help,
    Quit,
    Unknown(String),
}

impl PromptAction {
    pub fn parse(line: &str) -> Self {
        let input = line.trim();

        match input.to_lowercase().as_str() {
            "n" | "next" | ">" => return PromptAction::Rotate(Direction::Next),
            "p" | "prev" | "previous" | "<" => return PromptAction::Rotate(Direction::Previous),
            "w" | "weather" => return PromptAction::Weather,
            "h" | "help" | "?" => return PromptAction::Help,
            "q" | "quit" | "exit" => return PromptAction::Quit,
            _ => {}
        }

        match input.parse::<usize>() {
            Ok(number) if number > 0 => PromptAction::Open(number),
            _ => PromptAction::Unknown(input.to_string()),
        }
    }
}
