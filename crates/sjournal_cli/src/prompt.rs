//! Interactive stdin input for `add` and `edit`.

use sjournal_core::DEFAULT_CATEGORY;
use std::io::{self, BufRead, Write};

/// Values collected when `add` is called without content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub category: String,
    pub style: Option<String>,
    pub content: String,
}

/// Prompts for category, style and content.
///
/// Returns `None` when the content is left empty (treated as cancel).
pub fn collect_note<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<NoteInput>> {
    let category = ask(input, output, &format!("Category [{DEFAULT_CATEGORY}]: "))?;
    let style = ask(input, output, "Style: ")?;
    let content = ask(input, output, "Content: ")?;

    if content.is_empty() {
        return Ok(None);
    }

    Ok(Some(NoteInput {
        category: if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        },
        style: (!style.is_empty()).then_some(style),
        content,
    }))
}

/// Prints the old content and reads the replacement line.
pub fn collect_edit<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    id: i64,
    old_content: &str,
) -> io::Result<String> {
    writeln!(output, "Editing Note #{id}: \"{old_content}\"")?;
    ask(input, output, "Enter new note text: ")
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).trim().to_string())
}
