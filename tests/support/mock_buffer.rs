use html_indent::traits::TextOps;
use html_indent::types::{Command, Position};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// Rope-backed buffer that can apply engine commands, tracking whether any
/// edit actually touched the text.
pub struct MockBuffer {
    rope: Rope,
    pub modified: bool,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            modified: false,
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn line_str(&self, line: u32) -> String {
        if line as usize >= self.rope.len_lines() {
            return String::new();
        }
        let mut s = self.rope.line(line as usize).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        if s.ends_with('\r') {
            s.pop();
        }
        s
    }

    /// Char index into the rope for a (line, grapheme column) position.
    fn char_index(&self, pos: Position) -> usize {
        let line_start = self.rope.line_to_char(pos.line as usize);
        let line = self.line_str(pos.line);
        let byte = line
            .grapheme_indices(true)
            .nth(pos.col as usize)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        line_start + line[..byte].chars().count()
    }

    /// Applies engine commands, returning the cursor from the last
    /// `SetCursor` if one was emitted.
    pub fn apply(&mut self, commands: &[Command]) -> Option<Position> {
        let mut cursor = None;
        for cmd in commands {
            match cmd {
                Command::Delete { range } => {
                    let start = self.char_index(range.start);
                    let end = self.char_index(range.end);
                    self.rope.remove(start..end);
                    self.modified = true;
                }
                Command::InsertText { at, text } => {
                    let at = self.char_index(*at);
                    self.rope.insert(at, text);
                    self.modified = true;
                }
                Command::SetCursor(pos) => cursor = Some(*pos),
            }
        }
        cursor
    }
}

impl TextOps for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_text(&self, line: u32) -> String {
        self.line_str(line)
    }
}
