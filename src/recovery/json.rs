use std::borrow::Cow;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;

use crate::error::GenerateError;

// Comma immediately before a closing bracket or brace.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[\]}])").expect("trailing comma pattern"));

// Bare identifier used as an object key: a word right after `{` or `,`,
// followed by a colon.
static UNQUOTED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,]\s*)(\w+)(\s*:)").expect("unquoted key pattern"));

/// Recover a JSON object from raw model output.
///
/// Scans for the first balanced brace-delimited block, applies the two
/// syntactic repairs (trailing commas, unquoted keys), and parses the
/// result. Fails with [`GenerateError::NoJsonFound`] when no balanced block
/// exists and [`GenerateError::JsonParse`] when the repaired candidate still
/// does not parse. Parse failures are not retried with other repairs; the
/// caller falls through to text-section extraction instead.
pub fn recover(raw: &str) -> Result<Value, GenerateError> {
    let candidate = find_balanced_object(raw).ok_or(GenerateError::NoJsonFound)?;
    let repaired = repair(candidate);
    debug!("extracted JSON candidate: {}", repaired);

    let value = serde_json::from_str(repaired.trim())?;
    Ok(value)
}

/// Locate the shortest substring starting at the first `{` whose brace
/// nesting returns to zero.
///
/// An explicit depth counter over the bytes keeps this linear; a
/// nested-group regex here can backtrack catastrophically on adversarial
/// model output.
fn find_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, byte) in text[start..].bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    // Opening brace never closed
    None
}

/// Apply the tolerated syntactic repairs to a JSON candidate.
fn repair(candidate: &str) -> String {
    let no_trailing: Cow<'_, str> = TRAILING_COMMA.replace_all(candidate, "${1}");
    UNQUOTED_KEY
        .replace_all(&no_trailing, "${1}\"${2}\"${3}")
        .into_owned()
}
