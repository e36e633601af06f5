use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// IRC control code toggling bold text
pub const IRC_BOLD: char = '\x02';

/// How reply text is decorated for the chat transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub irc: bool,
}

impl Style {
    pub fn irc() -> Self {
        Self { irc: true }
    }

    pub fn plain() -> Self {
        Self { irc: false }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.irc {
            format!("{}{}{}", IRC_BOLD, text, IRC_BOLD)
        } else {
            text.to_string()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::irc()
    }
}

/// Abbreviate a player name the way scoring summaries print it.
///
/// `Erik Karlsson` becomes `E.Karlsson`; a three-part name keeps its middle
/// part, so `James van Riemsdyk` becomes `J.van Riemsdyk`.
pub fn short_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    let Some((last, rest)) = parts.split_last() else {
        return String::new();
    };
    let Some(initial) = rest.first().and_then(|first| first.chars().next()) else {
        return (*last).to_string();
    };

    let mut name = format!("{}.", initial);
    if parts.len() > 2 {
        name.push_str(parts[1]);
        name.push(' ');
    }
    name.push_str(last);
    name
}

/// `EDT`/`EST` -> `ET` and the same for the other North American zones
fn generic_zone_name(abbrev: &str) -> String {
    let bytes = abbrev.as_bytes();
    if bytes.len() == 3
        && matches!(bytes[0], b'E' | b'C' | b'M' | b'P')
        && matches!(bytes[1], b'D' | b'S')
        && bytes[2] == b'T'
    {
        format!("{}T", bytes[0] as char)
    } else {
        abbrev.to_string()
    }
}

/// Render an API UTC timestamp as e.g. `Sunday 7:00 PM ET` in `tz`.
/// Unparseable input is returned unchanged.
pub fn format_game_time(iso: &str, tz: Tz) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(parsed) => {
            let local = parsed.with_timezone(&Utc).with_timezone(&tz);
            let zone = generic_zone_name(&local.format("%Z").to_string());
            format!("{} {}", local.format("%A %-I:%M %p"), zone)
        }
        Err(_) => iso.to_string(),
    }
}
