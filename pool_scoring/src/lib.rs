pub mod builder;
mod config;
pub mod manual;
use log::{debug, info};

use std::collections::HashSet;
use std::ops::Range;

pub use crate::builder::{Pool, PoolBuilder};
pub use crate::config::*;

/// The outcome of a match, seen from team 1.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Outcome {
    Win1,
    Tie,
    Win2,
}

/// Classifies a pair of goal counts. Total over all pairs.
pub fn outcome(g1: u32, g2: u32) -> Outcome {
    if g1 > g2 {
        Outcome::Win1
    } else if g1 < g2 {
        Outcome::Win2
    } else {
        Outcome::Tie
    }
}

/// Points for a single group match: 0 on a wrong outcome, otherwise the base
/// award plus one goal bonus per exactly matched column. The two goal bonuses
/// are independent of each other and only conditioned on the outcome.
pub fn match_points(result: (u32, u32), guess: (u32, u32)) -> u32 {
    let mut points = 0;
    if outcome(result.0, result.1) == outcome(guess.0, guess.1) {
        points += POINTS_OUTCOME;
        if result.0 == guess.0 {
            points += POINTS_EXACT_GOALS;
        }
        if result.1 == guess.1 {
            points += POINTS_EXACT_GOALS;
        }
    }
    points
}

/// Stage-1 score for one guess table.
///
/// Rows with an absent result are matches that have not been played yet; they
/// contribute nothing. A row with a result but an incomplete guess is a fatal
/// input error: partial predictions are never scored silently.
pub fn stage1_points(results: &GroupTable, guess: &GroupTable) -> Result<u32, ScoringError> {
    let mut points = 0;
    for (idx, (r, g)) in results.rows().iter().zip(guess.rows()).enumerate() {
        let result = match r.goals() {
            Some(goals) => goals,
            None => continue,
        };
        let guessed = g
            .goals()
            .ok_or(ScoringError::MissingGoals { row: idx })?;
        points += match_points(result, guessed);
    }
    debug!("stage1_points: {} points", points);
    Ok(points)
}

/// True when a team slot does not name a team yet.
///
/// Spreadsheet exports render unknown cells as `nan` or `<NA>`; those markers
/// are filtered on both sides so that unresolved slots never match each other.
pub fn is_unresolved(identity: Option<&str>) -> bool {
    match identity {
        None => true,
        Some(s) => {
            let t = s.trim();
            t.is_empty() || t == "nan" || t == "<NA>"
        }
    }
}

/// The resolved team identities appearing in a row range, both columns.
fn resolved_teams(table: &KnockoutTable, rows: Range<usize>) -> Vec<&str> {
    let mut res: Vec<&str> = Vec::new();
    for row in &table.rows()[rows] {
        for team in [row.team1.as_deref(), row.team2.as_deref()] {
            if !is_unresolved(team) {
                if let Some(t) = team {
                    res.push(t);
                }
            }
        }
    }
    res
}

/// Identity-membership scoring for one knockout round: every actual team that
/// appears anywhere among the predicted teams for the same rows scores,
/// regardless of the exact pairing.
fn advancement_points(
    results: &KnockoutTable,
    guess: &KnockoutTable,
    rows: Range<usize>,
    per_team: u32,
) -> u32 {
    let actual = resolved_teams(results, rows.clone());
    let predicted: HashSet<&str> = resolved_teams(guess, rows).into_iter().collect();
    let hits = actual.iter().filter(|t| predicted.contains(*t)).count() as u32;
    hits * per_team
}

/// The team occupying one (row, side) slot, if resolved.
fn slot_team(table: &KnockoutTable, slot: (usize, Side)) -> Option<&str> {
    let row = &table.rows()[slot.0];
    let team = match slot.1 {
        Side::Team1 => row.team1.as_deref(),
        Side::Team2 => row.team2.as_deref(),
    };
    if is_unresolved(team) {
        None
    } else {
        team
    }
}

/// Bonus for predicting a group's final (winner, runner-up) order exactly,
/// read through the fixed [GROUP_SLOTS] coordinates.
fn group_order_points(results: &KnockoutTable, guess: &KnockoutTable) -> u32 {
    let mut points = 0;
    for (label, winner_slot, runner_up_slot) in GROUP_SLOTS.iter() {
        let actual = (
            slot_team(results, *winner_slot),
            slot_team(results, *runner_up_slot),
        );
        if actual.0.is_none() || actual.1.is_none() {
            // Group not decided yet.
            continue;
        }
        let predicted = (
            slot_team(guess, *winner_slot),
            slot_team(guess, *runner_up_slot),
        );
        if actual == predicted {
            debug!("group_order_points: group {} predicted in order", label);
            points += POINTS_GROUP_ORDER;
        }
    }
    points
}

/// The winner of a knockout row: the team with the higher goal count.
///
/// Absent goals mean the match is undetermined. A tie is not expected at this
/// stage and yields no winner, so it can never match a guess.
fn row_winner(row: &MatchRow) -> Option<&str> {
    let (g1, g2) = row.goals()?;
    let team = match outcome(g1, g2) {
        Outcome::Win1 => row.team1.as_deref(),
        Outcome::Win2 => row.team2.as_deref(),
        Outcome::Tie => None,
    };
    if is_unresolved(team) {
        None
    } else {
        team
    }
}

/// Stage-2 score for one guess table: advancement rounds, the group-order
/// bonus, and the champion and third-place awards.
pub fn stage2_points(results: &KnockoutTable, guess: &KnockoutTable) -> u32 {
    let mut points = advancement_points(results, guess, ROWS_ROUND_OF_16, POINTS_QUALIFIER);
    points += group_order_points(results, guess);
    points += advancement_points(results, guess, ROWS_QUARTERFINAL, POINTS_ADVANCE);
    points += advancement_points(results, guess, ROWS_SEMIFINAL, POINTS_ADVANCE);
    points += advancement_points(results, guess, ROW_FINAL..ROW_FINAL + 1, POINTS_ADVANCE);

    let champion = row_winner(&results.rows()[ROW_FINAL]);
    if champion.is_some() && champion == row_winner(&guess.rows()[ROW_FINAL]) {
        points += POINTS_CHAMPION;
    }
    let third = row_winner(&results.rows()[ROW_THIRD_PLACE]);
    if third.is_some() && third == row_winner(&guess.rows()[ROW_THIRD_PLACE]) {
        points += POINTS_THIRD_PLACE;
    }

    debug!("stage2_points: {} points", points);
    points
}

/// Scores every participant and assembles the ranked standings.
///
/// Stage 2 contributes nothing until `stage2_started` is set. The sort is
/// stable and the pool is already in case-insensitive alias order, so equal
/// totals keep that order and receive consecutive distinct positions.
pub fn evaluate(
    results: &TournamentResults,
    pool: &Pool,
    stage2_started: bool,
) -> Result<Standings, ScoringError> {
    info!(
        "evaluate: {} entries, stage 2 started: {}",
        pool.entries().len(),
        stage2_started
    );
    let mut rows: Vec<StandingsRow> = Vec::new();
    for (alias, entry) in pool.entries() {
        let stage1 = stage1_points(&results.group, &entry.group)?;
        let stage2 = if stage2_started {
            stage2_points(&results.knockout, &entry.knockout)
        } else {
            0
        };
        debug!(
            "evaluate: {}: stage 1: {} stage 2: {}",
            alias, stage1, stage2
        );
        rows.push(StandingsRow {
            position: 0,
            alias: alias.clone(),
            stage1,
            stage2,
            total: stage1 + stage2,
        });
    }
    rows.sort_by_key(|row| std::cmp::Reverse(row.total));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = (idx + 1) as u32;
    }
    Ok(Standings { rows })
}

/// Regression guard on the scoring rules: scoring a complete entry against
/// itself as if it were the official result must yield the maximum attainable
/// score of both stages. Anything else means a rule changed.
pub fn verify_full_score(entry: &Entry) -> Result<(), ScoringError> {
    let stage1 = stage1_points(&entry.group, &entry.group)?;
    if stage1 != STAGE1_MAX {
        return Err(ScoringError::MaxScoreMismatch {
            stage: 1,
            expected: STAGE1_MAX,
            actual: stage1,
        });
    }
    let stage2 = stage2_points(&entry.knockout, &entry.knockout);
    if stage2 != STAGE2_MAX {
        return Err(ScoringError::MaxScoreMismatch {
            stage: 2,
            expected: STAGE2_MAX,
            actual: stage2,
        });
    }
    info!("verify_full_score: ok ({}/{})", STAGE1_MAX, STAGE2_MAX);
    Ok(())
}
