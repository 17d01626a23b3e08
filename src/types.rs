use std::fmt;

/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in grapheme clusters,
/// not bytes or chars. This ensures correct handling of emoji and combining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };
}

/// A range of text defined by start and end positions.
///
/// Ranges are half-open intervals [start, end), meaning the start position
/// is included but the end position is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

/// The indentation role of a markup token.
///
/// Tokens are classified by what they do to nesting depth, not by which
/// element they belong to. A bare `{` plays the same role as `<ul>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Opens a nestable container (`<ul>`, `<table>`, `{`, ...).
    ListStart,
    /// Closes a nestable container (`</ul>`, `}`, ...).
    ListEnd,
    /// Opens a single entry within a container (`<li>`, `<td>`, ...).
    ItemStart,
    /// Closes a single entry (`</li>`, `</dd>`, ...).
    ItemEnd,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::ListStart => "list-start",
            Role::ListEnd => "list-end",
            Role::ItemStart => "item-start",
            Role::ItemEnd => "item-end",
        };
        f.write_str(s)
    }
}

/// The indentation context derived from a backward token scan.
///
/// `role` is `None` when no qualifying token was found within the search
/// window; `col` then falls back to the indentation of the line the scan
/// started on. Contexts are derived fresh on every request and never cached,
/// since earlier edits may have shifted indentation upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Role of the nearest qualifying token, if any.
    pub role: Option<Role>,
    /// Indentation width (in columns) of the line holding that token.
    pub col: u32,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Some(role) => write!(f, "({role}, {})", self.col),
            None => write!(f, "(none, {})", self.col),
        }
    }
}

/// The kind of list item to insert at the cursor.
///
/// Chosen by the same backward-context heuristic the indenter uses: inside
/// a definition list a new "item" is a term/description pair, everywhere
/// else it is a plain `<li>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A plain `<li>` entry.
    Plain,
    /// A `<dt> <dd>` term/description pair.
    Definition,
}

/// Commands emitted by the engine for the host to execute.
///
/// These commands represent the concrete actions that should be
/// applied to the text buffer. The host is responsible for implementing
/// these operations on their text storage. An operation that would change
/// nothing emits no `Delete`/`InsertText`, so the host's modified flag
/// stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Update the cursor position.
    SetCursor(Position),
    /// Delete text in the specified range.
    Delete { range: Range },
    /// Insert text at the specified position.
    InsertText { at: Position, text: String },
}
