// Primitives for reading the ';' delimited exports.

use log::debug;
use snafu::prelude::*;

use crate::pool::io_common::RawRow;
use crate::pool::*;

pub fn read_rows_csv(path: &str) -> PoolResult<Vec<RawRow>> {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_rows_csv: {:?} {:?}", lineno, cells);
        res.push(RawRow { lineno, cells });
    }
    Ok(res)
}
