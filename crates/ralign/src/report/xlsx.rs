use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

use super::{Cell, GeoTable, Table};
use crate::format::{round_coordinate, COORDINATE_DECIMALS};

fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    let bold = Format::new().set_bold();
    let number = Format::new().set_num_format("0.0000");

    worksheet.set_name(table.title)?;
    for (col, (header, width)) in table.columns.iter().zip(table.column_widths()).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &bold)?;
        worksheet.set_column_width(col, (width + 2) as f64)?;
    }
    for (row_index, row) in table.rows.iter().enumerate() {
        let row_number = row_index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Number(value) => {
                    let value = round_coordinate(*value, COORDINATE_DECIMALS);
                    worksheet.write_number_with_format(row_number, col, value, &number)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string(row_number, col, text)?;
                }
            }
        }
    }
    Ok(())
}

/// GeoTable workbook with one worksheet per table.
pub fn write_geotable_xlsx(geotable: &GeoTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    for table in &geotable.tables {
        let worksheet = workbook.add_worksheet();
        write_table(worksheet, table)
            .with_context(|| format!("write worksheet '{}'", table.title))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("write workbook {}", path.display()))?;
    tracing::debug!(sheets = geotable.tables.len(), "wrote {}", path.display());
    Ok(())
}
