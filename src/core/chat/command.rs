//! Inbound text is decided into a command exactly once, at the boundary;
//! everything downstream dispatches on the enumeration.

/// Recognized chat intents. Anything else is free text, which only the
/// dialogue machine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Login,
    Signup,
    Logout,
    Quit,
    Back,
    Analysis,
    Graph,
    RealTime,
    Text(String),
}

impl Command {
    pub fn parse(text: &str) -> Command {
        let trimmed = text.trim();
        match trimmed {
            "/start" => Command::Start,
            "/help" => Command::Help,
            "/logout" => Command::Logout,
            "/quit" => Command::Quit,
            "Back!" => Command::Back,
            "Login" => Command::Login,
            "Sign Up" => Command::Signup,
            "Send me a data analysis" => Command::Analysis,
            "Send me a graph of current fullness!" => Command::Graph,
            "Send me to real-time" => Command::RealTime,
            _ => Command::Text(trimmed.to_string()),
        }
    }

    /// True for recognized trigger words. Used by the dialogue machine to
    /// refuse them as usernames.
    pub fn is_trigger(&self) -> bool {
        !matches!(self, Command::Text(_))
    }
}
