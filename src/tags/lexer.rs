//! Tag grammar: `key=value (key=value)*`.
//!
//! Values are either a run of non-whitespace or a single-quoted string. In a
//! quoted string `\'` is a literal quote and every other character, a lone
//! backslash included, stands for itself.

use crate::error::TagError;

/// Splits a tag into its `(key, value)` pairs, in order.
pub fn parse_tag(tag: &str) -> Result<Vec<(String, String)>, TagError> {
    let mut pairs = Vec::new();
    let mut rest = tag.trim_start();

    while !rest.is_empty() {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let Some(eq) = rest[..word_end].find('=') else {
            return Err(TagError::MissingEquals {
                rest: rest[..word_end].to_string(),
            });
        };
        let key = &rest[..eq];
        if key.is_empty() {
            return Err(TagError::EmptyKey);
        }
        let after = &rest[eq + 1..];

        let (value, remaining) = match after.strip_prefix('\'') {
            Some(quoted) => {
                let (value, remaining) = read_quoted(key, quoted)?;
                if remaining.chars().next().is_some_and(|c| !c.is_whitespace()) {
                    return Err(TagError::ExpectedSeparator {
                        key: key.to_string(),
                    });
                }
                (value, remaining)
            }
            None => {
                let end = after.find(char::is_whitespace).unwrap_or(after.len());
                (after[..end].to_string(), &after[end..])
            }
        };

        pairs.push((key.to_string(), value));
        rest = remaining.trim_start();
    }

    Ok(pairs)
}

// `quoted` starts just past the opening quote. Returns the unescaped value
// and the text after the closing quote.
fn read_quoted<'a>(key: &str, quoted: &'a str) -> Result<(String, &'a str), TagError> {
    let mut value = String::new();
    let mut chars = quoted.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some((_, '\''))) => {
                chars.next();
                value.push('\'');
            }
            '\'' => return Ok((value, &quoted[i + 1..])),
            c => value.push(c),
        }
    }
    Err(TagError::UnterminatedQuote {
        key: key.to_string(),
    })
}
