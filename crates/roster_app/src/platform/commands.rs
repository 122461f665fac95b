//! Line-oriented command surface standing in for the menu UI.

use roster_core::{Msg, SortMode, UnknownSortMode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (try: filter, sort, coords, show, quit)")]
    Unknown(String),
    #[error(transparent)]
    Sort(#[from] UnknownSortMode),
    #[error("coords expects three numbers, got {0:?}")]
    Coords(String),
}

/// Parses one input line. `None` for blank lines.
pub fn parse_command(line: &str) -> Option<Result<Command, CommandError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb.to_ascii_lowercase().as_str() {
        "filter" => Ok(Command::Dispatch(Msg::FilterChanged(rest.to_string()))),
        "sort" => rest
            .parse::<SortMode>()
            .map(|mode| Command::Dispatch(Msg::SortChanged(mode)))
            .map_err(CommandError::from),
        "coords" => parse_coords(rest).map(|xyz| Command::Dispatch(Msg::ObserverMoved(xyz))),
        "show" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(verb.to_string())),
    };
    Some(command)
}

fn parse_coords(rest: &str) -> Result<[f64; 3], CommandError> {
    let values = rest
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| CommandError::Coords(rest.to_string()))?;
    <[f64; 3]>::try_from(values).map_err(|_| CommandError::Coords(rest.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_takes_rest_of_line() {
        assert_eq!(
            parse_command("filter  big bob "),
            Some(Ok(Command::Dispatch(Msg::FilterChanged("big bob".to_string()))))
        );
        assert_eq!(
            parse_command("filter"),
            Some(Ok(Command::Dispatch(Msg::FilterChanged(String::new()))))
        );
    }

    #[test]
    fn sort_parses_mode_names() {
        assert_eq!(
            parse_command("sort distanceFarthest"),
            Some(Ok(Command::Dispatch(Msg::SortChanged(
                SortMode::DistanceFarthest
            ))))
        );
        assert!(matches!(
            parse_command("sort sideways"),
            Some(Err(CommandError::Sort(_)))
        ));
    }

    #[test]
    fn coords_accept_spaces_or_commas() {
        assert_eq!(
            parse_command("coords 1.5, -2 3"),
            Some(Ok(Command::Dispatch(Msg::ObserverMoved([1.5, -2.0, 3.0]))))
        );
        assert!(matches!(
            parse_command("coords 1 2"),
            Some(Err(CommandError::Coords(_)))
        ));
        assert!(matches!(
            parse_command("coords a b c"),
            Some(Err(CommandError::Coords(_)))
        ));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("QUIT"), Some(Ok(Command::Quit)));
        assert!(matches!(
            parse_command("dance"),
            Some(Err(CommandError::Unknown(_)))
        ));
    }
}
