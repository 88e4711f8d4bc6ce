use cat_chase_core::{Actor, Direction};

/// Help text printed when an interactive session starts.
pub(crate) const HELP: &str = "\
Commands:
  up, down, left, right   Move the cat one cell
  w, a, s, d              Same as up, left, down, right
  state                   Show the current grid
  moves cat|mouse         List the cells an actor may step to
  new, restart            Start a new game
  scores                  Show the leaderboard
  help                    Show this help
  quit, exit              End the session";

/// A single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Move the cat.
    Move(Direction),
    /// Print the current snapshot.
    State,
    /// List the legal destinations of an actor.
    Moves(Actor),
    /// Discard the current game and generate a fresh layout.
    NewGame,
    /// Print the leaderboard.
    Scores,
    /// Print the command reference.
    Help,
    /// Leave the session.
    Quit,
}

impl Command {
    /// Interprets a line of input, returning `None` when nothing matches.
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let token = line.trim();
        if let Some(direction) = arrow_key(token) {
            return Some(Self::Move(direction));
        }

        if let Some(actor) = token.strip_prefix("moves ") {
            return actor.parse().ok().map(Self::Moves);
        }

        match token.to_ascii_lowercase().as_str() {
            "state" => Some(Self::State),
            "new" | "restart" => Some(Self::NewGame),
            "scores" | "leaderboard" => Some(Self::Scores),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Move),
        }
    }
}

/// Terminals echo arrow keys as ANSI escape sequences when read line by line.
fn arrow_key(token: &str) -> Option<Direction> {
    match token {
        "\x1b[A" | "\x1bOA" => Some(Direction::Up),
        "\x1b[B" | "\x1bOB" => Some(Direction::Down),
        "\x1b[D" | "\x1bOD" => Some(Direction::Left),
        "\x1b[C" | "\x1bOC" => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directions_and_aliases() {
        assert_eq!(Command::parse("up"), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::parse("  LEFT "), Some(Command::Move(Direction::Left)));
        assert_eq!(Command::parse("s"), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::parse("D"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn parses_arrow_escape_sequences() {
        assert_eq!(Command::parse("\x1b[A"), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::parse("\x1bOB\n"), Some(Command::Move(Direction::Down)));
        assert_eq!(Command::parse("\x1b[D"), Some(Command::Move(Direction::Left)));
        assert_eq!(Command::parse("\x1b[C"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(Command::parse("state"), Some(Command::State));
        assert_eq!(Command::parse("restart"), Some(Command::NewGame));
        assert_eq!(Command::parse("New"), Some(Command::NewGame));
        assert_eq!(Command::parse("scores"), Some(Command::Scores));
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("QUIT"), Some(Command::Quit));
    }

    #[test]
    fn parses_actor_queries() {
        assert_eq!(Command::parse("moves cat"), Some(Command::Moves(Actor::Cat)));
        assert_eq!(
            Command::parse(" moves  Mouse "),
            Some(Command::Moves(Actor::Mouse))
        );
        assert_eq!(Command::parse("moves dog"), None);
        assert_eq!(Command::parse("moves"), None);
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("jump"), None);
        assert_eq!(Command::parse("\x1b[Z"), None);
    }
}
