//! Interactive input lines.

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    /// A question for the agent
    Question(String),
    Stop,
    Clear,
    Datasets,
    Help,
    Quit,
    /// Blank line
    Empty,
    /// A slash command we do not know
    Unknown(String),
}

/// Classify one input line.
pub fn parse_input(line: &str) -> ChatInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ChatInput::Empty;
    }

    match trimmed {
        "/stop" => ChatInput::Stop,
        "/clear" | "/new" => ChatInput::Clear,
        "/datasets" => ChatInput::Datasets,
        "/help" => ChatInput::Help,
        "/quit" | "/exit" => ChatInput::Quit,
        cmd if cmd.starts_with('/') && !cmd.contains(char::is_whitespace) => {
            ChatInput::Unknown(cmd.to_string())
        }
        _ => ChatInput::Question(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("/stop\n"), ChatInput::Stop);
        assert_eq!(parse_input("  /clear "), ChatInput::Clear);
        assert_eq!(parse_input("/datasets"), ChatInput::Datasets);
        assert_eq!(parse_input("/quit"), ChatInput::Quit);
        assert_eq!(parse_input("/exit"), ChatInput::Quit);
    }

    #[test]
    fn test_questions() {
        assert_eq!(
            parse_input("Which region sold most?\n"),
            ChatInput::Question("Which region sold most?".to_string())
        );
        // A path-like question is still a question
        assert_eq!(
            parse_input("/data/sales.csv has how many rows?"),
            ChatInput::Question("/data/sales.csv has how many rows?".to_string())
        );
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(parse_input("   "), ChatInput::Empty);
        assert_eq!(parse_input("/frobnicate"), ChatInput::Unknown("/frobnicate".to_string()));
    }
}
