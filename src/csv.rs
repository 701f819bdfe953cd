// src/csv.rs
use std::io::{self, Write};

use crate::config::consts::CSV_BOM;
use crate::table::Table;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    // CRLF so spreadsheet apps keep in-cell LFs apart from record breaks
    w.write_all(b"\r\n")
}

/// Encode a whole table: BOM, header row, then data rows.
/// The BOM makes Excel read the file as UTF-8 (Hangul names otherwise garble).
pub fn encode_table(table: &Table, sep: char) -> io::Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::with_capacity(64 * (table.len() + 1));
    buf.extend_from_slice(CSV_BOM.as_bytes());
    write_row(&mut buf, &table.headers, sep)?;
    for r in &table.rows {
        write_row(&mut buf, r, sep)?;
    }
    Ok(buf)
}
