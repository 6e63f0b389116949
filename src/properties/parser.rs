//! Parser for flat property-file text
//!
//! Supports the usual property-file conventions:
//! - `#` and `!` start comment lines
//! - keys are separated from values by `=`, `:` or whitespace
//! - a trailing odd number of backslashes continues the logical line
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and escaped separators are unescaped

use super::PropertyError;

/// Parse property text into `(key, value)` pairs in document order.
pub fn parse_pairs(text: &str) -> Result<Vec<(String, String)>, PropertyError> {
    let mut pairs = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line_no)?;
        if key.is_empty() {
            return Err(PropertyError::parse(line_no, "empty key"));
        }
        let value = unescape(trim_unescaped_end(raw_value), line_no)?;
        pairs.push((key, value));
    }

    Ok(pairs)
}

/// Drop trailing whitespace that is not itself escaped (`a=b\ ` keeps its space)
fn trim_unescaped_end(raw: &str) -> &str {
    let mut end = raw.len();
    while let Some(ch) = raw[..end].chars().next_back() {
        if !matches!(ch, ' ' | '\t' | '\u{c}') {
            break;
        }
        let before = &raw[..end - ch.len_utf8()];
        let backslashes = before.chars().rev().take_while(|c| *c == '\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= ch.len_utf8();
    }
    &raw[..end]
}

fn ends_with_continuation(line: &str) -> bool {
    let backslashes = line.chars().rev().take_while(|c| *c == '\\').count();
    backslashes % 2 == 1
}

/// Split a logical line at the first unescaped separator.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }
    (key, rest)
}

fn unescape(input: &str, line_no: usize) -> Result<String, PropertyError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        PropertyError::parse(line_no, format!("malformed \\u escape '\\u{hex}'"))
                    })?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
