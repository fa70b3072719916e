use crate::charts::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_CONFIRMED_FILE: &str = "time_series_19-covid-Confirmed.csv";
pub const DEFAULT_RECOVERED_FILE: &str = "time_series_19-covid-Recovered.csv";
pub const DEFAULT_DEATHS_FILE: &str = "time_series_19-covid-Deaths.csv";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFiles {
    pub confirmed: Option<String>,
    pub recovered: Option<String>,
    pub deaths: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    pub title: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartsConfig {
    #[serde(default)]
    pub sources: SourceFiles,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    #[serde(rename = "orderDir")]
    pub order_dir: Option<String>,
}

pub fn read_config(path: &str) -> ChartsResult<ChartsConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ChartsConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Reads a reference output.
pub fn read_summary(path: &str) -> ChartsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
