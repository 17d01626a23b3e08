use unicode_segmentation::UnicodeSegmentation;

use crate::types::Position;

/// Read-only view of the host editor's text buffer.
///
/// The engine never mutates text directly; it only queries lines through
/// this trait and emits [`Command`](crate::types::Command)s for the host
/// to apply. Hosts back this with whatever storage they use (rope, gap
/// buffer, contiguous string).
pub trait TextOps {
    /// Total number of lines in the buffer.
    fn line_count(&self) -> u32;

    /// The text of one line, without its trailing newline.
    /// Out-of-range lines return the empty string.
    fn line_text(&self, line: u32) -> String;

    /// Line length in grapheme columns.
    fn line_len(&self, line: u32) -> u32 {
        self.line_text(line).graphemes(true).count() as u32
    }

    fn clamp(&self, pos: Position) -> Position {
        let last_line = self.line_count().saturating_sub(1);
        let line = pos.line.min(last_line);
        let col = pos.col.min(self.line_len(line));
        Position { line, col }
    }
}
