//! Typed commands accepted from the terminal

use std::{fmt, str::FromStr};

/// Actions a user can take on the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start when paused, pause when running
    Toggle,
    /// Throw away the current session and start over
    Next,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "" | " " | "space" | "s" | "p" | "toggle" => Ok(Command::Toggle),
            "n" | "next" => Ok(Command::Next),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: {:?}", other)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Toggle => "toggle",
            Command::Next => "next",
            Command::Quit => "quit",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("  space ".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("P".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("next".parse::<Command>(), Ok(Command::Next));
        assert_eq!("N\n".parse::<Command>(), Ok(Command::Next));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_unknown_command() {
        let err = "rewind".parse::<Command>().unwrap_err();
        assert!(err.contains("rewind"));
    }
}
