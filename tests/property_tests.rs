use html_indent::{Command, Engine, Position, TextOps, previous_context};
use proptest::prelude::*;

mod support;
use support::mock_buffer::MockBuffer;

// Strategy producing markup-ish lines, including the degenerate shapes the
// engine has to shrug off.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<ul>".to_string()),
        Just("</ul>".to_string()),
        Just("<li>item".to_string()),
        Just("</li>".to_string()),
        Just("<dl>".to_string()),
        Just("<dt>term".to_string()),
        Just("<dd>desc".to_string()),
        Just("<table border=\"1\">".to_string()),
        Just("div {".to_string()),
        Just("}".to_string()),
        Just("\t<li>tabbed".to_string()),
        Just(String::new()),
        // Broken markup and plain prose
        "[a-z<>/{} ]{0,30}",
        "  [a-zA-Z0-9 ]{0,20}",
    ]
}

fn doc_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..15).prop_map(|lines| {
        let mut doc = lines.join("\n");
        doc.push('\n');
        doc
    })
}

fn reindent(eng: &mut Engine, buf: &mut MockBuffer) {
    let lines = buf.text().lines().count() as u32;
    for line in 0..lines {
        let (_, cmds) = eng.indent_line(buf, Position { line, col: 0 });
        buf.apply(&cmds);
    }
}

proptest! {
    #[test]
    fn indent_never_panics(
        doc in doc_strategy(),
        line in 0u32..20,
        col in 0u32..40,
    ) {
        let buf = MockBuffer::new(&doc);
        let mut eng = Engine::new();

        let (cur, cmds) = eng.indent_line(&buf, Position { line, col });

        // Cursor stays inside the buffer and edits only touch the
        // cursor line's leading whitespace.
        prop_assert!(cur.line < buf.line_count());
        for cmd in &cmds {
            if let Command::Delete { range } = cmd {
                prop_assert_eq!(range.start.line, range.end.line);
                prop_assert_eq!(range.start.col, 0);
            }
        }
    }

    #[test]
    fn reindent_is_idempotent(doc in doc_strategy()) {
        let mut buf = MockBuffer::new(&doc);
        let mut eng = Engine::new();
        reindent(&mut eng, &mut buf);

        let settled = buf.text();
        let mut second = MockBuffer::new(&settled);
        reindent(&mut eng, &mut second);

        prop_assert_eq!(second.text(), settled);
        prop_assert!(!second.modified);
    }

    #[test]
    fn classification_never_panics(
        doc in doc_strategy(),
        line in 0u32..20,
        col in 0u32..40,
        limit in 1usize..200,
    ) {
        let buf = MockBuffer::new(&doc);
        let ctx = previous_context(&buf, Position { line, col }, limit);

        // The reported column is a real indentation width somewhere in
        // the buffer, so it can never exceed the longest line.
        let max_len = (0..buf.line_count()).map(|l| buf.line_len(l)).max().unwrap_or(0);
        prop_assert!(ctx.col <= max_len);
    }

    #[test]
    fn indentation_is_all_spaces_after_edit(doc in doc_strategy()) {
        let mut buf = MockBuffer::new(&doc);
        let mut eng = Engine::new();

        let lines = buf.text().lines().count() as u32;
        for line in 0..lines {
            let (_, cmds) = eng.indent_line(&buf, Position { line, col: 0 });
            let edited = !cmds.iter().all(|c| matches!(c, Command::SetCursor(_)));
            buf.apply(&cmds);
            if edited {
                let text = buf.line_text(line);
                let ws: String = text.chars().take_while(|c| c.is_whitespace()).collect();
                prop_assert!(ws.chars().all(|c| c == ' '));
            }
        }
    }
}
