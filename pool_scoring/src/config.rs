// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::ops::Range;

/// One row of a schedule table, following the column schema
/// `[id_1, team_1, id_2, team_2, goals_1, goals_2]`.
///
/// A `None` encodes an absent cell: a goal count for a match that has not
/// been played yet, or a team slot whose occupant is not known yet.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MatchRow {
    pub id1: Option<u32>,
    pub team1: Option<String>,
    pub id2: Option<u32>,
    pub team2: Option<String>,
    pub goals1: Option<u32>,
    pub goals2: Option<u32>,
}

impl MatchRow {
    /// Both goal counts, or `None` if either one is absent.
    pub fn goals(&self) -> Option<(u32, u32)> {
        match (self.goals1, self.goals2) {
            (Some(g1), Some(g2)) => Some((g1, g2)),
            _ => None,
        }
    }
}

/// The two team columns of a [MatchRow].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Side {
    Team1,
    Team2,
}

/// The group phase of the tournament: 48 matches.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GroupTable {
    rows: Vec<MatchRow>,
}

impl GroupTable {
    pub fn new(rows: Vec<MatchRow>) -> Result<GroupTable, ScoringError> {
        if rows.len() != GROUP_MATCHES {
            return Err(ScoringError::WrongRowCount {
                expected: GROUP_MATCHES,
                actual: rows.len(),
            });
        }
        Ok(GroupTable { rows })
    }

    pub fn rows(&self) -> &[MatchRow] {
        &self.rows
    }
}

/// The knockout phase: 16 rows, partitioned into the fixed sub-ranges
/// [ROWS_ROUND_OF_16], [ROWS_QUARTERFINAL], [ROWS_SEMIFINAL],
/// [ROW_THIRD_PLACE] and [ROW_FINAL].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct KnockoutTable {
    rows: Vec<MatchRow>,
}

impl KnockoutTable {
    pub fn new(rows: Vec<MatchRow>) -> Result<KnockoutTable, ScoringError> {
        if rows.len() != KNOCKOUT_ROWS {
            return Err(ScoringError::WrongRowCount {
                expected: KNOCKOUT_ROWS,
                actual: rows.len(),
            });
        }
        Ok(KnockoutTable { rows })
    }

    pub fn rows(&self) -> &[MatchRow] {
        &self.rows
    }
}

/// One participant's prediction pair.
///
/// Unlike the official results, a prediction must be complete: every row of
/// both tables carries both goal counts. Team slots may stay unresolved (they
/// are copied from the bracket template).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Entry {
    pub group: GroupTable,
    pub knockout: KnockoutTable,
}

impl Entry {
    pub fn new(group: GroupTable, knockout: KnockoutTable) -> Result<Entry, ScoringError> {
        for (idx, row) in group.rows().iter().chain(knockout.rows()).enumerate() {
            if row.goals().is_none() {
                return Err(ScoringError::MissingGoals { row: idx });
            }
        }
        Ok(Entry { group, knockout })
    }
}

/// The official outcome tables, loaded once per evaluation run.
///
/// Goal counts of unplayed matches and team slots of unresolved bracket
/// positions are absent. This is a normal state, not an error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TournamentResults {
    pub group: GroupTable,
    pub knockout: KnockoutTable,
}

// ******** Output data structures *********

/// One line of the standings table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StandingsRow {
    /// Rank position, 1-based. Ties receive consecutive distinct positions.
    pub position: u32,
    pub alias: String,
    pub stage1: u32,
    pub stage2: u32,
    pub total: u32,
}

/// The ranked standings, sorted by decreasing total.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Standings {
    pub rows: Vec<StandingsRow>,
}

/// Errors that prevent an evaluation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringError {
    WrongRowCount { expected: usize, actual: usize },
    MissingGoals { row: usize },
    DuplicateAlias(String),
    MaxScoreMismatch { stage: u8, expected: u32, actual: u32 },
}

impl Error for ScoringError {}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::WrongRowCount { expected, actual } => {
                write!(f, "table has {} rows, expected {}", actual, expected)
            }
            ScoringError::MissingGoals { row } => {
                write!(f, "missing goal count in prediction row {}", row)
            }
            ScoringError::DuplicateAlias(alias) => {
                write!(f, "alias {:?} was loaded twice", alias)
            }
            ScoringError::MaxScoreMismatch {
                stage,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "self-scoring stage {} yielded {} points, expected {}",
                    stage, actual, expected
                )
            }
        }
    }
}

// ********* Schedule layout **********

/// Number of group-phase matches.
pub const GROUP_MATCHES: usize = 48;
/// Number of rows in the knockout table.
pub const KNOCKOUT_ROWS: usize = 16;

/// Round of 16: the eight matches between group winners and runners-up.
pub const ROWS_ROUND_OF_16: Range<usize> = 0..8;
/// Quarterfinals.
pub const ROWS_QUARTERFINAL: Range<usize> = 8..12;
/// Semifinals.
pub const ROWS_SEMIFINAL: Range<usize> = 12..14;
/// The third-place match.
pub const ROW_THIRD_PLACE: usize = 14;
/// The final.
pub const ROW_FINAL: usize = 15;

/// Where each group's winner and runner-up land in the round-of-16 rows,
/// following the official bracket: the winner of group A meets the runner-up
/// of group B in row 0, the winner of group B meets the runner-up of group A
/// in row 3, and so on.
///
/// Layout: (group label, winner slot, runner-up slot), each slot a
/// (row, side) coordinate into [ROWS_ROUND_OF_16].
pub const GROUP_SLOTS: [(char, (usize, Side), (usize, Side)); 8] = [
    ('A', (0, Side::Team1), (3, Side::Team2)),
    ('B', (3, Side::Team1), (0, Side::Team2)),
    ('C', (1, Side::Team1), (2, Side::Team2)),
    ('D', (2, Side::Team1), (1, Side::Team2)),
    ('E', (4, Side::Team1), (6, Side::Team2)),
    ('F', (6, Side::Team1), (4, Side::Team2)),
    ('G', (5, Side::Team1), (7, Side::Team2)),
    ('H', (7, Side::Team1), (5, Side::Team2)),
];

// ********* Point scheme **********

/// Group match: correct outcome.
pub const POINTS_OUTCOME: u32 = 6;
/// Group match: exact goal count for one team, conditional on the outcome.
pub const POINTS_EXACT_GOALS: u32 = 2;
/// Each correctly predicted qualifier to the round of 16.
pub const POINTS_QUALIFIER: u32 = 3;
/// Bonus for predicting a group's (winner, runner-up) pair in order.
pub const POINTS_GROUP_ORDER: u32 = 2;
/// Each correctly predicted team in the quarterfinals, semifinals or final.
pub const POINTS_ADVANCE: u32 = 10;
/// Naming the champion.
pub const POINTS_CHAMPION: u32 = 30;
/// Naming the third-place winner.
pub const POINTS_THIRD_PLACE: u32 = 10;

/// Maximum attainable group-phase score: 48 matches, 10 points each.
pub const STAGE1_MAX: u32 = 480;
/// Maximum attainable knockout score:
/// 16x3 (qualifiers) + 8x2 (group order) + 8x10 (quarterfinalists)
/// + 4x10 (semifinalists) + 2x10 (finalists) + 30 (champion) + 10 (third).
pub const STAGE2_MAX: u32 = 244;
