// The synthetic control entry.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snafu::prelude::*;

use pool_scoring::{Entry, GroupTable, KnockoutTable, MatchRow, GROUP_MATCHES, KNOCKOUT_ROWS};

use crate::pool::*;

/// Generates the pseudo-random control entry from a seed.
///
/// Group scorelines are uniform in 0..=2 goals; every knockout row is a 1-0
/// or 0-1 coin flip, so a winner is always decidable. The control fills in
/// goal counts only: its knockout team slots stay unresolved and are filtered
/// out of the advancement comparisons, like any other unknown slot.
pub fn synthetic_entry(seed: u64) -> PoolResult<Entry> {
    info!("synthetic_entry: seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut group_rows: Vec<MatchRow> = Vec::with_capacity(GROUP_MATCHES);
    for _ in 0..GROUP_MATCHES {
        let g1 = rng.gen_range(0..=2);
        let g2 = rng.gen_range(0..=2);
        group_rows.push(score_only(g1, g2));
    }

    let mut knockout_rows: Vec<MatchRow> = Vec::with_capacity(KNOCKOUT_ROWS);
    for _ in 0..KNOCKOUT_ROWS {
        let (g1, g2) = if rng.gen::<bool>() { (1, 0) } else { (0, 1) };
        knockout_rows.push(score_only(g1, g2));
    }

    Entry::new(
        GroupTable::new(group_rows).context(ScoringSnafu {})?,
        KnockoutTable::new(knockout_rows).context(ScoringSnafu {})?,
    )
    .context(ScoringSnafu {})
}

fn score_only(g1: u32, g2: u32) -> MatchRow {
    MatchRow {
        goals1: Some(g1),
        goals2: Some(g2),
        ..MatchRow::default()
    }
}
