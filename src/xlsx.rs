// src/xlsx.rs
//
// Single-sheet workbook: bold header row, wrapped text for multi-line cells.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use crate::config::consts::SHEET_NAME;
use crate::error::ExportError;
use crate::table::Table;

// Excel hard limits
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;
const MAX_CELL_CHARS: usize = 32_767;

pub fn encode_table(table: &Table) -> Result<Vec<u8>, ExportError> {
    // +1 for the header row
    if table.len() + 1 > MAX_ROWS || table.width() > MAX_COLS {
        return Err(ExportError::SheetLimit { rows: table.len(), cols: table.width() });
    }

    check_cell_lengths(table)?;

    let mut workbook = Workbook::new();
    let header_fmt = Format::new().set_bold();
    let wrap_fmt = Format::new().set_text_wrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (c, h) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, c as ColNum, h, &header_fmt)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let xr = (r + 1) as RowNum;
        for (c, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            if cell.contains('\n') {
                sheet.write_string_with_format(xr, c as ColNum, cell, &wrap_fmt)?;
            } else {
                sheet.write_string(xr, c as ColNum, cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// First oversized cell, reported by record index and column name.
fn check_cell_lengths(table: &Table) -> Result<(), ExportError> {
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if cell.len() <= MAX_CELL_CHARS {
                continue;
            }
            let chars = cell.chars().count();
            if chars > MAX_CELL_CHARS {
                return Err(ExportError::CellTooLong {
                    record: r,
                    column: table.headers.get(c).cloned().unwrap_or_default(),
                    chars,
                    limit: MAX_CELL_CHARS,
                });
            }
        }
    }
    Ok(())
}
