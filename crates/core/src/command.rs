//! Console command grammar: one line in, one parsed command out.

use crate::error::{Error, Result};

/// A parsed console command.
///
/// `Unknown` is a real variant so the dispatcher can report unrecognized
/// verbs without special-casing; it never terminates the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Connect(i64),
    Disconnect,
    SetDpi(i64),
    Macro {
        dx: i64,
        dy: i64,
        buttons: Option<String>,
    },
    Help,
    /// Blank input line.
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// Unknown verbs parse successfully into [`Command::Unknown`];
    /// a known verb with malformed arguments is a [`Error::Parse`].
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(Self::Empty);
        };
        let args: Vec<&str> = tokens.collect();

        match verb {
            "list" => Ok(Self::List),
            "disconnect" => Ok(Self::Disconnect),
            "help" => Ok(Self::Help),
            "connect" => match args.as_slice() {
                [idx] => Ok(Self::Connect(parse_int(idx)?)),
                _ => Err(Error::Parse("connect takes one device index".into())),
            },
            "setdpi" => match args.as_slice() {
                [dpi] => Ok(Self::SetDpi(parse_int(dpi)?)),
                _ => Err(Error::Parse("setdpi takes one dpi value".into())),
            },
            "macro" => match args.as_slice() {
                [dx, dy, rest @ ..] => Ok(Self::Macro {
                    dx: parse_int(dx)?,
                    dy: parse_int(dy)?,
                    buttons: rest.first().map(|s| s.to_string()),
                }),
                _ => Err(Error::Parse("macro takes at least dx and dy".into())),
            },
            other => Ok(Self::Unknown(other.to_string())),
        }
    }
}

/// Parse an integer literal in decimal or prefixed radix notation
/// (`0x`/`0o`/`0b`, optionally signed).
pub fn parse_int(token: &str) -> Result<i64> {
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };

    let (radix, digits) = if let Some(hex) = strip_radix_prefix(unsigned, "0x") {
        (16, hex)
    } else if let Some(oct) = strip_radix_prefix(unsigned, "0o") {
        (8, oct)
    } else if let Some(bin) = strip_radix_prefix(unsigned, "0b") {
        (2, bin)
    } else {
        (10, unsigned)
    };

    let value = i64::from_str_radix(digits, radix)
        .map_err(|_| Error::Parse(format!("invalid integer literal: {token:?}")))?;
    Ok(if negative { -value } else { value })
}

fn strip_radix_prefix<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token
        .strip_prefix(prefix)
        .or_else(|| token.strip_prefix(prefix.to_ascii_uppercase().as_str()))
}
