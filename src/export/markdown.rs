//! Markdown rendering of detected tables.

use std::fmt::Write;

use crate::analysis::WorkbookAnalysis;
use crate::cell_ref::column_letter;
use crate::types::Table;

pub const TABLES_FILE: &str = "tables.md";

/// Every materialized table of every sheet as GitHub-flavoured Markdown.
pub fn render_tables(analysis: &WorkbookAnalysis) -> String {
    let mut out = String::from("# Tables\n");
    for sheet in &analysis.sheets {
        let _ = write!(out, "\n## {}\n", sheet.name);
        if sheet.tables.is_empty() {
            out.push_str("\n_No tables detected._\n");
            continue;
        }
        for table in &sheet.tables {
            out.push('\n');
            render_table(&mut out, table);
        }
    }
    out
}

/// One `### T1 (A1:C4)` section.
pub fn render_table(out: &mut String, table: &Table) {
    let _ = writeln!(out, "### {} ({})\n", table.id, table.bounds.to_a1());

    // Columns are the header columns, or every column of the bounds.
    let columns: Vec<(u32, String)> = if table.headers.is_empty() {
        (table.bounds.min_col..=table.bounds.max_col)
            .map(|c| (c, column_letter(c)))
            .collect()
    } else {
        table
            .headers
            .iter()
            .map(|h| (h.column_index, escape(&h.value)))
            .collect()
    };

    push_row(out, columns.iter().map(|(_, label)| label.as_str()));
    push_row(out, columns.iter().map(|_| "---"));

    for row in &table.rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|(col, _)| {
                row.cells
                    .iter()
                    .find(|c| c.column == *col)
                    .map(|c| escape(&c.formatted_value))
                    .unwrap_or_default()
            })
            .collect();
        push_row(out, cells.iter().map(String::as_str));
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(cell);
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
