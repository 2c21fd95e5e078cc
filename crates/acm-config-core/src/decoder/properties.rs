//! Line-based `key=value` documents

use serde_json::Value;

use super::DecodeError;
use crate::types::PropertyMap;

/// Parse `.properties` text
///
/// Follows the usual rules: `#`/`!` comment lines, `=`, `:` or whitespace as
/// separator, a trailing odd backslash joins the next line, and `\t \n \r \f
/// \uXXXX` escapes. Later duplicates win.
pub(super) fn decode_properties(raw: &str) -> Result<PropertyMap, DecodeError> {
    let mut map = PropertyMap::new();
    for (line_no, logical) in logical_lines(raw) {
        let (key, value) = split_entry(&logical, line_no)?;
        map.insert(key, Value::String(value));
    }
    Ok(map)
}

/// Join continuation lines, dropping blanks and comments
///
/// Each logical line carries the 1-based number of its first natural line.
fn logical_lines(raw: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, natural) in raw.lines().enumerate() {
        let trimmed = natural.trim_start();
        let continuing = pending.is_some();

        if !continuing && (trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!')) {
            continue;
        }

        let (line_no, mut buffer) = pending.take().unwrap_or((index + 1, String::new()));
        buffer.push_str(trimmed);

        if ends_with_odd_backslashes(&buffer) {
            buffer.pop();
            pending = Some((line_no, buffer));
        } else {
            lines.push((line_no, buffer));
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

fn ends_with_odd_backslashes(s: &str) -> bool {
    s.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str, line_no: usize) -> Result<(String, String), DecodeError> {
    let mut chars = line.chars().peekable();
    let mut key = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => key.push(unescape(&mut chars, line_no)?),
            '=' | ':' => {
                return Ok((key, read_value(chars, line_no, false)?));
            }
            c if c.is_whitespace() => {
                return Ok((key, read_value(chars, line_no, true)?));
            }
            c => key.push(c),
        }
    }
    Ok((key, String::new()))
}

fn read_value(
    mut chars: std::iter::Peekable<std::str::Chars<'_>>,
    line_no: usize,
    separator_pending: bool,
) -> Result<String, DecodeError> {
    while chars.peek().map_or(false, |c| c.is_whitespace()) {
        chars.next();
    }
    if separator_pending && matches!(chars.peek(), Some('=') | Some(':')) {
        chars.next();
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }
    }

    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(unescape(&mut chars, line_no)?);
        } else {
            value.push(c);
        }
    }
    Ok(value)
}

fn unescape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    line_no: usize,
) -> Result<char, DecodeError> {
    match chars.next() {
        Some('t') => Ok('\t'),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('f') => Ok('\u{000C}'),
        Some('u') => {
            let hex: String = chars.by_ref().take(4).collect();
            if hex.len() != 4 {
                return Err(DecodeError::properties(line_no, "truncated \\u escape"));
            }
            u32::from_str_radix(&hex, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| DecodeError::properties(line_no, format!("malformed \\u escape '{}'", hex)))
        }
        Some(other) => Ok(other),
        None => Ok('\\'),
    }
}
