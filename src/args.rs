use clap::Parser;

/// This is a tabulation program for a World Cup prediction pool.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the pool: the results file, the
    /// prediction directory and the list of aliases. For more information
    /// about the format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path or empty) If specified, the standings table will be written
    /// as a ';'-delimited CSV to the given location. Setting this option
    /// overrides the path that may be specified in the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference standings file. If provided, pooltab will
    /// check that the tabulated standings match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, knockout (stage 2) scoring is included even
    /// when the configuration does not enable it.
    #[clap(long, takes_value = false)]
    pub stage2: bool,

    /// (alias or empty) If specified, re-scores this participant's prediction
    /// against itself and checks that it reaches the maximum attainable
    /// score. Used as a self-check on the scoring rules.
    #[clap(long, value_parser)]
    pub verify: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
