use log::debug;
use snafu::prelude::*;

use pool_scoring::{MatchRow, GROUP_MATCHES, KNOCKOUT_ROWS};

use crate::pool::*;

/// Raw cells as they come out of a worksheet or a CSV export, before shaping.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRow {
    pub lineno: usize,
    pub cells: Vec<String>,
}

/// Keeps the match rows of an export and drops everything else, then splits
/// them into the group and knockout ranges.
///
/// The spreadsheet exports carry a header line and one section line per group
/// or round; none of those has a numeric id in the first column, which is how
/// they are recognized.
pub fn shape_rows(raw: &[RawRow], path: &str) -> PoolResult<(Vec<MatchRow>, Vec<MatchRow>)> {
    let mut rows: Vec<MatchRow> = Vec::new();
    for r in raw.iter() {
        let is_match_row = r
            .cells
            .first()
            .map(|c| c.trim().parse::<u32>().is_ok())
            .unwrap_or(false);
        if !is_match_row {
            debug!("shape_rows: skipping line {}: {:?}", r.lineno, r.cells);
            continue;
        }
        rows.push(parse_match_row(r)?);
    }
    ensure!(
        rows.len() == GROUP_MATCHES + KNOCKOUT_ROWS,
        WrongTableShapeSnafu {
            path,
            expected: GROUP_MATCHES + KNOCKOUT_ROWS,
            found: rows.len(),
        }
    );
    let knockout_rows = rows.split_off(GROUP_MATCHES);
    Ok((rows, knockout_rows))
}

fn parse_match_row(r: &RawRow) -> PoolResult<MatchRow> {
    Ok(MatchRow {
        id1: opt_u32(r, 0)?,
        team1: opt_team(r, 1),
        id2: opt_u32(r, 2)?,
        team2: opt_team(r, 3),
        goals1: opt_u32(r, 4)?,
        goals2: opt_u32(r, 5)?,
    })
}

fn cell(r: &RawRow, idx: usize) -> &str {
    r.cells.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn opt_team(r: &RawRow, idx: usize) -> Option<String> {
    let c = cell(r, idx);
    if c.is_empty() {
        None
    } else {
        Some(c.to_string())
    }
}

/// Exports render absent numbers as blanks or as the pandas markers.
fn opt_u32(r: &RawRow, idx: usize) -> PoolResult<Option<u32>> {
    let c = cell(r, idx);
    if c.is_empty() || c == "nan" || c == "<NA>" {
        return Ok(None);
    }
    // Numbers that went through a float column come out as "2.0".
    let parsed = c.parse::<u32>().ok().or_else(|| {
        c.parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u32)
    });
    parsed.map(Some).context(BadCellSnafu {
        lineno: r.lineno,
        column: idx,
    })
}
