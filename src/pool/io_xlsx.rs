// Reading the results workbook export.

use calamine::{open_workbook, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::pool::io_common::RawRow;
use crate::pool::*;

pub fn read_rows_xlsx(path: &str) -> PoolResult<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })?;

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let lineno = idx + 1;
        let mut cells: Vec<String> = Vec::new();
        for elt in row {
            cells.push(render_cell(elt)?);
        }
        debug!("read_rows_xlsx: {:?} {:?}", lineno, cells);
        res.push(RawRow { lineno, cells });
    }
    Ok(res)
}

fn render_cell(cell: &calamine::DataType) -> PoolResult<String> {
    match cell {
        calamine::DataType::String(s) => Ok(s.clone()),
        calamine::DataType::Int(i) => Ok(i.to_string()),
        calamine::DataType::Float(f) => Ok(f.to_string()),
        calamine::DataType::Empty => Ok("".to_string()),
        _ => whatever!("read_rows_xlsx: could not understand cell {:?}", cell),
    }
}
