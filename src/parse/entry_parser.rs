use chrono::NaiveDate;

use crate::model::entry::Entry;

/// Layout accepted after the `@` marker. `%m`/`%d` take one or two digits.
const DATE_INPUT_LAYOUT: &str = "%Y/%m/%d";

/// Error type for entry parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid date '{token}': the format is YYYY/M/D")]
    InvalidDate {
        token: String,
        source: chrono::ParseError,
    },
    #[error("invalid priority '{token}': priority is a number")]
    InvalidPriority {
        token: String,
        source: std::num::ParseIntError,
    },
    #[error("cannot register task without a name")]
    MissingName,
}

/// Parse one line of free-form input into an entry.
///
/// Tokens are split on whitespace and folded left to right:
/// `#tag` appends a tag, `@YYYY/M/D` sets the date (last one wins),
/// `!N` sets the priority (first one wins), anything else is part of the
/// task name. `today` is used when no date token is present.
pub fn parse_entry(line: &str, today: NaiveDate) -> Result<Entry, ParseError> {
    let mut name: Vec<&str> = Vec::new();
    let mut date = None;
    let mut tags = Vec::new();
    let mut priority = None;

    for token in line.split_whitespace() {
        if let Some(tag) = token.strip_prefix('#') {
            tags.push(tag.to_string());
        } else if let Some(raw) = token.strip_prefix('@') {
            date = Some(parse_date(raw)?);
        } else if let Some(raw) = token.strip_prefix('!') {
            if priority.is_none() {
                priority = Some(parse_priority(raw)?);
            }
        } else {
            name.push(token);
        }
    }

    if name.is_empty() {
        return Err(ParseError::MissingName);
    }

    let mut entry = Entry::new(name.join(" "), date.unwrap_or(today));
    entry.tags = tags;
    entry.priority = priority.unwrap_or(0);
    Ok(entry)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw, DATE_INPUT_LAYOUT).map_err(|e| ParseError::InvalidDate {
        token: raw.to_string(),
        source: e,
    })
}

fn parse_priority(raw: &str) -> Result<i64, ParseError> {
    raw.parse().map_err(|e| ParseError::InvalidPriority {
        token: raw.to_string(),
        source: e,
    })
}
