//! Plain-text rendering of note lists.

use sjournal_core::Note;
use std::io::{self, Write};

const HEADERS: [&str; 4] = ["ID", "Timestamp", "Category", "Content"];

/// Writes notes as an aligned table, in the given order.
pub fn write_table<W: Write>(output: &mut W, notes: &[Note]) -> io::Result<()> {
    let rows: Vec<[String; 4]> = notes
        .iter()
        .map(|note| {
            [
                note.id.to_string(),
                note.timestamp.clone(),
                note.category.clone(),
                note.content.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(output, &HEADERS.map(str::to_string), &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(output, "{}", rule.join("-+-"))?;
    for row in &rows {
        write_row(output, row, &widths)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(output: &mut W, notes: &[Note]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *output, notes)?;
    writeln!(output)
}

fn write_row<W: Write>(output: &mut W, cells: &[String; 4], widths: &[usize; 4]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(output, "{}", padded.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::{write_json, write_table};
    use sjournal_core::Note;

    #[test]
    fn table_lists_rows_in_given_order() {
        let notes = vec![
            Note::with_timestamp(2, "01-02-03 04:05:06", "Work", "second"),
            Note::with_timestamp(1, "01-02-03 04:05:00", "General", "first"),
        ];
        let mut output = Vec::new();
        write_table(&mut output, &notes).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].starts_with("2 "));
        assert!(lines[3].ends_with("first"));
    }

    #[test]
    fn json_output_is_an_array() {
        let notes = vec![Note::with_timestamp(1, "t", "General", "x")];
        let mut output = Vec::new();
        write_json(&mut output, &notes).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["id"], 1);
    }
}
