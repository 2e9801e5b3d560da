//! Token classifier — raw argument → positional, `--`, or option text.

/// One raw argument, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Not an option: `""`, `-`, or anything not starting with `-`.
    Positional,
    /// `--`: every later token is positional.
    DoubleDash,
    Flag(Flag<'a>),
}

/// An option token with its leading dashes removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag<'a> {
    /// Text after the dashes, `=value` included.
    pub text: &'a str,
    /// Part before the first `=`, or the whole text.
    pub name: &'a str,
    /// Part after the first `=`, if there was one.
    pub value: Option<&'a str>,
}

/// Classify a single argument. `-x` and `--x` both name option `x`.
pub fn classify(arg: &str) -> Token<'_> {
    if arg == "--" {
        return Token::DoubleDash;
    }
    let Some(stripped) = arg.strip_prefix('-') else {
        return Token::Positional;
    };
    if stripped.is_empty() {
        return Token::Positional;
    }
    let text = stripped.strip_prefix('-').unwrap_or(stripped);
    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (text, None),
    };
    Token::Flag(Flag { text, name, value })
}
