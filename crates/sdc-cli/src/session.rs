/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// The input box now holds this text.
    Input(String),
    Focus(usize),
    Select(usize),
    Blur,
    Quit,
}

/// Parses a line typed in `sdc interactive`.
///
/// Lines starting with `:` are commands; anything else replaces the input
/// text. Use `::` to type a term that starts with a colon.
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("::") {
        return Ok(SessionCommand::Input(format!(":{escaped}")));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(SessionCommand::Input(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("focus" | "f", Some(n)) => parse_index(n).map(SessionCommand::Focus),
        ("select" | "s", Some(n)) => parse_index(n).map(SessionCommand::Select),
        ("blur" | "b", None) => Ok(SessionCommand::Blur),
        ("quit" | "q", None) => Ok(SessionCommand::Quit),
        _ => Err(format!("unknown command ':{command}'")),
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("'{raw}' is not a row number"))
}
