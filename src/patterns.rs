//! Compiled token patterns for indentation-relevant markup.
//!
//! Classification depends only on the tag name: an opening tag with
//! attributes matches exactly like one without. Every opening-tag pattern
//! requires whitespace or `>` right after the name, which is also what keeps
//! `<li` from matching inside `<link>`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::types::Role;

/// Tags that open or close a nestable container.
const LIST_TAGS: &[&str] = &[
    "dl", "ul", "ol", "menu", "dir", "form", "select", "table", "tr", "style", "div",
];

/// Tags that open or close a single entry within a container.
const ITEM_TAGS: &[&str] = &[
    "li", "dt", "dd", "option", "th", "td", "thead", "tbody",
];

fn open_tag_src(tags: &[&str]) -> String {
    format!(r"<(?:{})(?:[ \t][^>]*)?>", tags.join("|"))
}

fn close_tag_src(tags: &[&str]) -> String {
    format!(r"</(?:{})>", tags.join("|"))
}

/// Backward-scan target set: list starts, list ends and item starts.
/// Closing item tags are not reliable indentation anchors and are left out.
pub(crate) static CONTEXT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<ls>{}|\{{)|(?P<le>{}|\}})|(?P<is>{})",
        open_tag_src(LIST_TAGS),
        close_tag_src(LIST_TAGS),
        open_tag_src(ITEM_TAGS),
    ))
    .unwrap()
});

/// Union of all four token classes, used on the current line and by the
/// smart item heuristic.
pub(crate) static ANY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<ls>{}|\{{)|(?P<le>{}|\}})|(?P<is>{})|(?P<ie>{})",
        open_tag_src(LIST_TAGS),
        close_tag_src(LIST_TAGS),
        open_tag_src(ITEM_TAGS),
        close_tag_src(ITEM_TAGS),
    ))
    .unwrap()
});

/// Decodes which alternative of a combined pattern matched.
pub(crate) fn role_of(caps: &Captures<'_>) -> Option<Role> {
    if caps.name("ls").is_some() {
        Some(Role::ListStart)
    } else if caps.name("le").is_some() {
        Some(Role::ListEnd)
    } else if caps.name("is").is_some() {
        Some(Role::ItemStart)
    } else if caps.name("ie").is_some() {
        Some(Role::ItemEnd)
    } else {
        None
    }
}

/// Classifies the token a line's content begins with, if any.
///
/// `content` is the line with leading whitespace already stripped; a token
/// appearing later in the line does not count.
pub fn classify_line_start(content: &str) -> Option<Role> {
    let caps = ANY_TOKEN.captures(content)?;
    match caps.get(0) {
        Some(m) if m.start() == 0 => role_of(&caps),
        _ => None,
    }
}

/// The lowercased tag name inside a matched token, or `None` for braces.
pub(crate) fn tag_name(token: &str) -> Option<String> {
    let name: String = token
        .trim_start_matches(['<', '/'])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}
