use unicode_segmentation::UnicodeSegmentation;

use crate::classify;
use crate::patterns;
use crate::traits::TextOps;
use crate::types::{Command, Context, ItemKind, Position, Range, Role};

/// Indentation parameters for one engine instance.
///
/// There is no process-wide configuration: each [`Engine`] owns its own
/// values, so independent engines (one per open document, say) cannot
/// interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConfig {
    /// Columns added when entering a new nested list.
    pub base_indent: u32,
    /// Columns added for content continuing after an item start, and the
    /// correction subtracted when an item or list boundary follows a
    /// list end.
    pub item_indent: u32,
    /// Backward scan bound in characters. This is a termination guarantee,
    /// not a tuning knob; it is always applied and never zero.
    pub search_limit: usize,
    /// When set, indent operations do nothing.
    pub disabled: bool,
    /// When set, each indent operation records an [`IndentReport`] and
    /// emits a `tracing` debug event.
    pub verbose: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            base_indent: 2,
            item_indent: 2,
            search_limit: 20_000,
            disabled: false,
            verbose: false,
        }
    }
}

/// What one indent operation decided. Recorded in verbose mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentReport {
    pub prev_role: Option<Role>,
    pub cur_role: Option<Role>,
    pub prev_col: u32,
    pub new_col: u32,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: IndentConfig,
    last_report: Option<IndentReport>,
}

#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub config: IndentConfig,
    pub last_report: Option<IndentReport>,
}

pub struct EngineBuilder {
    config: IndentConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: IndentConfig::default(),
        }
    }
}

impl EngineBuilder {
    pub fn base_indent(mut self, columns: u32) -> Self {
        self.config.base_indent = columns;
        self
    }

    pub fn item_indent(mut self, columns: u32) -> Self {
        self.config.item_indent = columns;
        self
    }

    pub fn search_limit(mut self, chars: usize) -> Self {
        self.config.search_limit = chars;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> Engine {
        let mut config = self.config;
        // A zero limit would make every scan trivially empty.
        config.search_limit = config.search_limit.max(1);
        Engine {
            config,
            last_report: None,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config,
            last_report: self.last_report,
        }
    }

    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    /// The context the indenter would use at `cursor`, as a read-only query.
    ///
    /// Backs the host's inspection command: the result can be shown to the
    /// user without touching the buffer.
    pub fn context<T: TextOps>(&self, text: &T, cursor: Position) -> Context {
        classify::previous_context(text, cursor, self.config.search_limit)
    }

    /// Re-indents the line containing `cursor`.
    ///
    /// Returns the restored cursor position and the edits the host should
    /// apply. When the line is already correctly indented no edit commands
    /// are emitted, so the host's modified flag stays untouched. This
    /// operation never fails: every degenerate input falls back to leaving
    /// the line's indentation as it is.
    pub fn indent_line<T: TextOps>(
        &mut self,
        text: &T,
        cursor: Position,
    ) -> (Position, Vec<Command>) {
        if self.config.disabled {
            return (cursor, vec![]);
        }
        let cursor = text.clamp(cursor);
        let line = cursor.line;
        let line_text = text.line_text(line);
        let (old_ws, content) = classify::split_indent(&line_text);
        let old_indent = old_ws.graphemes(true).count() as u32;
        // Offset into the content, for restoring the cursor after the edit.
        // A cursor inside the old indentation clamps to the content start.
        let content_offset = cursor.col.saturating_sub(old_indent);

        // Context comes from before the current line, never from the
        // line's own tokens.
        let ctx = classify::previous_context(
            text,
            Position { line, col: 0 },
            self.config.search_limit,
        );
        let cur_role = patterns::classify_line_start(content);
        let target = self.target_column(ctx, cur_role, old_indent);

        let mut commands = Vec::new();
        let new_ws = " ".repeat(target as usize);
        // No context found means no opinion: keep the existing leading
        // whitespace verbatim instead of normalizing it.
        if ctx.role.is_some() && old_ws != new_ws {
            if old_indent > 0 {
                commands.push(Command::Delete {
                    range: Range {
                        start: Position { line, col: 0 },
                        end: Position {
                            line,
                            col: old_indent,
                        },
                    },
                });
            }
            if target > 0 {
                commands.push(Command::InsertText {
                    at: Position { line, col: 0 },
                    text: new_ws,
                });
            }
        }
        let new_cursor = Position {
            line,
            col: target + content_offset,
        };
        if new_cursor != cursor {
            commands.push(Command::SetCursor(new_cursor));
        }

        if self.config.verbose {
            let report = IndentReport {
                prev_role: ctx.role,
                cur_role,
                prev_col: ctx.col,
                new_col: target,
            };
            tracing::debug!(
                prev_role = ?report.prev_role,
                cur_role = ?report.cur_role,
                prev_col = report.prev_col,
                new_col = report.new_col,
                "indent_line"
            );
            self.last_report = Some(report);
        }

        (new_cursor, commands)
    }

    /// The decision table. `fallback` is the line's pre-edit indentation,
    /// used when the backward scan found nothing.
    fn target_column(&self, ctx: Context, cur_role: Option<Role>, fallback: u32) -> u32 {
        let base = self.config.base_indent as i64;
        let item = self.config.item_indent as i64;
        let Some(prev) = ctx.role else {
            return fallback;
        };

        let mut target = ctx.col as i64;
        if prev == Role::ListStart {
            target += base;
        }
        // Current-line corrections; the first matching arm wins.
        target += match (cur_role, prev) {
            // An item following a list close steps back to the item level
            // rather than inheriting the close tag's deeper indent.
            (Some(Role::ItemStart | Role::ItemEnd), Role::ListEnd) => -item,
            // Two successive closes undo the item alignment and one
            // nesting level.
            (Some(Role::ListEnd), Role::ListEnd) => -(item + base),
            // Closing a list dedents one level.
            (Some(Role::ListEnd), _) => -base,
            // A list opened directly inside an item continues at the
            // item-continuation depth.
            (Some(Role::ListStart), Role::ItemStart) => item,
            // Plain text continuing an item.
            (None, Role::ItemStart) => item,
            _ => 0,
        };
        target.max(0) as u32
    }

    /// Which item shape fits at `cursor`.
    ///
    /// Dictionary context (`dl`/`dt`/`dd` is the nearest boundary token)
    /// calls for a term/description pair; everything else gets a plain item.
    pub fn item_kind<T: TextOps>(&self, text: &T, cursor: Position) -> ItemKind {
        let hit = classify::last_any_token(text, cursor, self.config.search_limit);
        match hit.and_then(|h| patterns::tag_name(&h.token)) {
            Some(name) if matches!(name.as_str(), "dl" | "dt" | "dd") => ItemKind::Definition,
            _ => ItemKind::Plain,
        }
    }

    /// Inserts a new list item at `cursor`, picking the shape via
    /// [`Engine::item_kind`]. Indenting the resulting line is the host's
    /// job, through [`Engine::indent_line`].
    pub fn insert_item<T: TextOps>(
        &self,
        text: &T,
        cursor: Position,
    ) -> (Position, Vec<Command>) {
        let cursor = text.clamp(cursor);
        let (snippet, advance) = match self.item_kind(text, cursor) {
            ItemKind::Plain => ("<li>", 4),
            // Cursor lands after "<dt> ", where the term text goes.
            ItemKind::Definition => ("<dt> <dd>", 5),
        };
        let new_cursor = Position {
            line: cursor.line,
            col: cursor.col + advance,
        };
        let commands = vec![
            Command::InsertText {
                at: cursor,
                text: snippet.to_string(),
            },
            Command::SetCursor(new_cursor),
        ];
        (new_cursor, commands)
    }
}
