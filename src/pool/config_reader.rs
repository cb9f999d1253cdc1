use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs;

use crate::pool::*;

/// The synthetic control entry: a prediction generated from a seed that was
/// published before the tournament, so everyone can check it was not tuned.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    pub alias: String,
    pub seed: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(rename = "poolName")]
    pub pool_name: String,
    /// The official results export, relative to the configuration file.
    #[serde(rename = "resultsFile")]
    pub results_file: String,
    /// Directory holding one `<alias>.csv` prediction export per participant.
    #[serde(rename = "dataDirectory")]
    pub data_directory: String,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    pub aliases: Vec<String>,
    #[serde(rename = "stage2Started")]
    pub stage2_started: Option<bool>,
    pub control: Option<ControlConfig>,
}

pub fn read_config(path: &str) -> PoolResult<PoolConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu {})?;
    let config: PoolConfig = serde_json::from_str(&contents).context(ParsingConfigSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}
