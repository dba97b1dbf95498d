use crate::results::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSettings {
    pub key: String,
    pub name: Option<String>,
    pub party: Option<String>,
    pub class: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsConfig {
    #[serde(rename = "dataFile")]
    pub data_file: Option<String>,
    #[serde(rename = "statewideLabel")]
    pub statewide_label: Option<String>,
    #[serde(rename = "barWidth")]
    pub bar_width: Option<usize>,
    pub candidates: Option<Vec<CandidateSettings>>,
}

impl ResultsConfig {
    /// The default candidates, with the overrides of this configuration applied.
    pub fn candidate_table(&self) -> ResultsResult<CandidateTable> {
        let mut table = CandidateTable::default();
        for c in self.candidates.iter().flatten() {
            let key = c
                .key
                .parse::<CandidateKey>()
                .context(UnknownCandidateSnafu {})?;
            table = table.with_override(key, c.name.clone(), c.party.clone(), c.class.clone());
        }
        Ok(table)
    }
}

pub fn read_config(path: &str) -> ResultsResult<ResultsConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read config: {:?}", contents);
    let config: ResultsConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> ResultsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read summary: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
