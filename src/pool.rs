use log::{info, warn};

use pool_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;
use crate::pool::config_reader::*;

pub mod config_reader;
pub mod control;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum PoolError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening the pool configuration"))]
    OpeningConfig { source: std::io::Error },
    #[snafu(display("Error parsing the pool configuration"))]
    ParsingConfig { source: serde_json::Error },
    #[snafu(display("The configuration path has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Unreadable cell {column} at line {lineno}"))]
    BadCell { lineno: usize, column: usize },
    #[snafu(display("Expected {expected} match rows in {path}, found {found}"))]
    WrongTableShape {
        path: String,
        expected: usize,
        found: usize,
    },
    #[snafu(display("Scoring error: {source}"))]
    Scoring { source: ScoringError },
    #[snafu(display("Error writing the standings table"))]
    WritingStandings { source: csv::Error },
    #[snafu(display("Error flushing the standings table"))]
    FlushingStandings { source: std::io::Error },
    #[snafu(display("Error opening the reference standings"))]
    OpeningReference { source: std::io::Error },
    #[snafu(display("Unknown alias {alias}"))]
    UnknownAlias { alias: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PoolResult<T> = Result<T, PoolError>;

/// Loads the official results file. The workbook export (.xlsx) and the flat
/// CSV export are both accepted; everything funnels through the same row
/// shaping.
pub fn load_results(path: &Path) -> PoolResult<TournamentResults> {
    let p = path.display().to_string();
    info!("Attempting to read results file {:?}", p);
    let raw = match path.extension().and_then(|e| e.to_str()) {
        Some("xlsx") => io_xlsx::read_rows_xlsx(&p),
        _ => io_csv::read_rows_csv(&p),
    }?;
    let (group_rows, knockout_rows) = io_common::shape_rows(&raw, &p)?;
    Ok(TournamentResults {
        group: GroupTable::new(group_rows).context(ScoringSnafu {})?,
        knockout: KnockoutTable::new(knockout_rows).context(ScoringSnafu {})?,
    })
}

/// Loads one participant's prediction export. Predictions must be complete.
pub fn load_entry(path: &Path) -> PoolResult<Entry> {
    let p = path.display().to_string();
    info!("Attempting to read prediction file {:?}", p);
    let raw = io_csv::read_rows_csv(&p)?;
    let (group_rows, knockout_rows) = io_common::shape_rows(&raw, &p)?;
    Entry::new(
        GroupTable::new(group_rows).context(ScoringSnafu {})?,
        KnockoutTable::new(knockout_rows).context(ScoringSnafu {})?,
    )
    .context(ScoringSnafu {})
}

/// Loads every configured participant, plus the synthetic control entry when
/// one is configured. An alias appearing twice aborts the load.
pub fn load_pool(root: &Path, config: &PoolConfig) -> PoolResult<Pool> {
    let mut builder = PoolBuilder::new();
    for alias in config.aliases.iter() {
        let p: PathBuf = root
            .join(&config.data_directory)
            .join(format!("{}.csv", alias));
        let entry = load_entry(&p)?;
        builder.add_entry(alias, entry).context(ScoringSnafu {})?;
    }
    if let Some(control_config) = &config.control {
        let entry = control::synthetic_entry(control_config.seed)?;
        builder
            .add_entry(&control_config.alias, entry)
            .context(ScoringSnafu {})?;
    }
    Ok(builder.build())
}

/// The standings in the delimited text form used for display and for the
/// reference comparison.
pub fn render_standings(standings: &Standings) -> String {
    let mut out = String::from("Position;Alias;Stage 1;Stage 2;Total\n");
    for row in standings.rows.iter() {
        out.push_str(&format!(
            "{};{};{};{};{}\n",
            row.position, row.alias, row.stage1, row.stage2, row.total
        ));
    }
    out
}

fn write_standings(path: &str, standings: &Standings) -> PoolResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    wtr.write_record(["Position", "Alias", "Stage 1", "Stage 2", "Total"])
        .context(WritingStandingsSnafu {})?;
    for row in standings.rows.iter() {
        wtr.write_record([
            row.position.to_string(),
            row.alias.clone(),
            row.stage1.to_string(),
            row.stage2.to_string(),
            row.total.to_string(),
        ])
        .context(WritingStandingsSnafu {})?;
    }
    wtr.flush().context(FlushingStandingsSnafu {})?;
    Ok(())
}

pub fn run_tabulation(args: &Args) -> PoolResult<()> {
    let config = read_config(&args.config)?;
    info!("config: {:?}", config);
    let config_p = Path::new(&args.config);
    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;

    let results = load_results(&root_p.join(&config.results_file))?;
    let pool = load_pool(root_p, &config)?;

    if let Some(alias) = &args.verify {
        let entry = pool.get(alias).context(UnknownAliasSnafu {
            alias: alias.as_str(),
        })?;
        verify_full_score(entry).context(ScoringSnafu {})?;
        println!(
            "Self-check passed for {}: {}/{} points",
            alias, STAGE1_MAX, STAGE2_MAX
        );
    }

    let stage2_started = args.stage2 || config.stage2_started.unwrap_or(false);
    let standings = evaluate(&results, &pool, stage2_started).context(ScoringSnafu {})?;

    let rendered = render_standings(&standings);
    println!("{}", rendered);

    let out = args
        .out
        .clone()
        .or_else(|| {
            config
                .output_file
                .as_ref()
                .map(|f| root_p.join(f).display().to_string())
        });
    if let Some(out_path) = out {
        info!("Writing standings to {:?}", out_path);
        write_standings(&out_path, &standings)?;
    }

    // The reference standings, if provided for comparison
    if let Some(reference_p) = &args.reference {
        let reference = fs::read_to_string(reference_p).context(OpeningReferenceSnafu {})?;
        if reference != rendered {
            warn!("Found differences with the reference standings");
            print_diff(reference.as_str(), rendered.as_str(), "\n");
            whatever!("Difference detected between tabulated standings and reference standings");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use crate::pool::config_reader::{ControlConfig, PoolConfig};

    fn fixture(name: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("fixtures");
        path.push(name);
        path
    }

    fn fixture_args() -> Args {
        Args {
            config: fixture("pool.json").display().to_string(),
            out: None,
            reference: None,
            stage2: false,
            verify: None,
            verbose: false,
        }
    }

    #[test]
    fn results_fixture_shapes_into_both_stages() {
        let results = load_results(&fixture("results.csv")).unwrap();
        assert_eq!(results.group.rows().len(), GROUP_MATCHES);
        assert_eq!(results.knockout.rows().len(), KNOCKOUT_ROWS);
        let first = &results.group.rows()[0];
        assert_eq!(first.team1.as_deref(), Some("A1"));
        assert_eq!(first.goals(), Some((2, 1)));
        let last = &results.knockout.rows()[ROW_FINAL];
        assert_eq!(last.team1.as_deref(), Some("A1"));
        assert_eq!(last.team2.as_deref(), Some("E1"));
    }

    #[test]
    fn perfect_prediction_passes_the_self_check() {
        let entry = load_entry(&fixture("alice.csv")).unwrap();
        assert!(verify_full_score(&entry).is_ok());
    }

    #[test]
    fn full_pipeline_ranks_the_fixture_pool() {
        let config = read_config(fixture("pool.json").to_str().unwrap()).unwrap();
        let root = fixture("");
        let results = load_results(&root.join(&config.results_file)).unwrap();
        let pool = load_pool(&root, &config).unwrap();
        let standings = evaluate(&results, &pool, true).unwrap();

        // alice is a perfect copy of the results; bob missed one exact
        // scoreline (6 instead of 10) and flipped the champion (-30). The
        // control entry has no knockout identities, so the group phase score
        // it gets by chance keeps it below 480 and last.
        let summary: Vec<(u32, &str, u32, u32)> = standings
            .rows
            .iter()
            .map(|r| (r.position, r.alias.as_str(), r.stage1, r.stage2))
            .collect();
        assert_eq!(summary[0], (1, "alice", STAGE1_MAX, STAGE2_MAX));
        assert_eq!(
            summary[1],
            (2, "bob", STAGE1_MAX - 4, STAGE2_MAX - POINTS_CHAMPION)
        );
        assert_eq!(summary[2].0, 3);
        assert_eq!(summary[2].1, "Macaco");
        assert_eq!(summary[2].3, 0);
    }

    #[test]
    fn duplicate_alias_aborts_the_load() {
        let config = PoolConfig {
            pool_name: "dup".to_string(),
            results_file: "results.csv".to_string(),
            data_directory: ".".to_string(),
            output_file: None,
            aliases: vec!["alice".to_string(), "alice".to_string()],
            stage2_started: Some(true),
            control: None,
        };
        let res = load_pool(&fixture(""), &config);
        assert!(matches!(
            res,
            Err(PoolError::Scoring {
                source: ScoringError::DuplicateAlias(_)
            })
        ));
    }

    #[test]
    fn control_entry_is_reproducible() {
        let a = control::synthetic_entry(20221218).unwrap();
        let b = control::synthetic_entry(20221218).unwrap();
        assert_eq!(a, b);
        let c = control::synthetic_entry(1).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn control_follows_the_seeded_scheme() {
        let entry = control::synthetic_entry(42).unwrap();
        for row in entry.group.rows() {
            let (g1, g2) = row.goals().unwrap();
            assert!(g1 <= 2 && g2 <= 2);
            assert!(row.team1.is_none() && row.team2.is_none());
        }
        for row in entry.knockout.rows() {
            let goals = row.goals().unwrap();
            assert!(goals == (1, 0) || goals == (0, 1));
        }
    }

    #[test]
    fn tabulation_runs_end_to_end() {
        let args = fixture_args();
        assert!(run_tabulation(&args).is_ok());
    }

    #[test]
    fn verify_flag_checks_a_participant() {
        let args = Args {
            verify: Some("alice".to_string()),
            ..fixture_args()
        };
        assert!(run_tabulation(&args).is_ok());
        let args = Args {
            verify: Some("nobody".to_string()),
            ..fixture_args()
        };
        assert!(matches!(
            run_tabulation(&args),
            Err(PoolError::UnknownAlias { .. })
        ));
    }

    #[test]
    fn config_reads_the_control_section() {
        let config = read_config(fixture("pool.json").to_str().unwrap()).unwrap();
        assert_eq!(
            config.control,
            Some(ControlConfig {
                alias: "Macaco".to_string(),
                seed: 20221218,
            })
        );
        assert_eq!(config.stage2_started, Some(true));
    }
}
