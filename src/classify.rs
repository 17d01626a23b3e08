//! Backward context classification.
//!
//! The classifier finds the nearest indentation-relevant token behind the
//! cursor and reports its role together with the indentation of the line it
//! sits on. The scan is a read-only query over [`TextOps`] and is bounded by
//! a character budget so latency stays proportional to the window, not to
//! document size.

use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

use crate::patterns;
use crate::traits::TextOps;
use crate::types::{Context, Position, Role};

/// A token located by the backward scan.
#[derive(Debug, Clone)]
pub(crate) struct TokenHit {
    pub role: Role,
    pub line: u32,
    pub token: String,
}

/// Finds the nearest indentation anchor behind `cursor`.
///
/// Scans at most `limit` characters backward. Closing item tags are skipped
/// (they are not part of the target set), so a `</li>` between the cursor
/// and a `</ul>` does not hide the list close. Returns `(None, indent of the
/// cursor line)` when nothing qualifies within the window.
pub fn previous_context<T: TextOps>(text: &T, cursor: Position, limit: usize) -> Context {
    match last_token(text, cursor, limit, &patterns::CONTEXT_TOKEN) {
        Some(hit) => Context {
            role: Some(hit.role),
            col: indent_width(&text.line_text(hit.line)),
        },
        None => {
            let cursor = text.clamp(cursor);
            Context {
                role: None,
                col: indent_width(&text.line_text(cursor.line)),
            }
        }
    }
}

/// Nearest token of any of the four classes, for the smart item heuristic.
pub(crate) fn last_any_token<T: TextOps>(
    text: &T,
    cursor: Position,
    limit: usize,
) -> Option<TokenHit> {
    last_token(text, cursor, limit, &patterns::ANY_TOKEN)
}

fn last_token<T: TextOps>(
    text: &T,
    cursor: Position,
    limit: usize,
    re: &Regex,
) -> Option<TokenHit> {
    let cursor = text.clamp(cursor);
    let mut budget = limit.max(1);

    // The cursor line contributes only the text before the cursor; every
    // line above contributes in full.
    let mut line_no = cursor.line;
    let mut segment: String = text
        .line_text(cursor.line)
        .graphemes(true)
        .take(cursor.col as usize)
        .collect();
    loop {
        let window = tail_chars(&segment, budget);
        if let Some(caps) = last_match_in(re, window)
            && let (Some(role), Some(m)) = (patterns::role_of(&caps), caps.get(0))
        {
            return Some(TokenHit {
                role,
                line: line_no,
                token: m.as_str().to_string(),
            });
        }
        budget = budget.saturating_sub(segment.chars().count() + 1);
        if budget == 0 || line_no == 0 {
            return None;
        }
        line_no -= 1;
        segment = text.line_text(line_no);
    }
}

fn last_match_in<'h>(re: &Regex, hay: &'h str) -> Option<Captures<'h>> {
    re.captures_iter(hay).last()
}

/// The last `n` characters of `s`.
fn tail_chars(s: &str, n: usize) -> &str {
    let extra = s.chars().count().saturating_sub(n);
    if extra == 0 {
        return s;
    }
    s.char_indices().nth(extra).map(|(i, _)| &s[i..]).unwrap_or("")
}

/// Splits a line into its leading whitespace and the rest.
pub(crate) fn split_indent(line: &str) -> (&str, &str) {
    let at = line
        .grapheme_indices(true)
        .find(|(_, g)| !g.chars().all(char::is_whitespace))
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    line.split_at(at)
}

/// Indentation width of a line in columns.
pub(crate) fn indent_width(line: &str) -> u32 {
    split_indent(line).0.graphemes(true).count() as u32
}
