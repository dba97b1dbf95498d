// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The tallied vote categories, in display order.
///
/// The set is closed: a column of the input that is not one of these keys
/// (or `jurisdiction` / `total`) is ignored.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum CandidateKey {
    Harris,
    Trump,
    Oliver,
    Stein,
    Kennedy,
    Others,
}

impl CandidateKey {
    pub const ALL: [CandidateKey; 6] = [
        CandidateKey::Harris,
        CandidateKey::Trump,
        CandidateKey::Oliver,
        CandidateKey::Stein,
        CandidateKey::Kennedy,
        CandidateKey::Others,
    ];

    /// The column name used in the input header.
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKey::Harris => "harris",
            CandidateKey::Trump => "trump",
            CandidateKey::Oliver => "oliver",
            CandidateKey::Stein => "stein",
            CandidateKey::Kennedy => "kennedy",
            CandidateKey::Others => "others",
        }
    }
}

impl Display for CandidateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct UnknownCandidate(pub String);

impl Error for UnknownCandidate {}

impl Display for UnknownCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown candidate key {:?}", self.0)
    }
}

impl FromStr for CandidateKey {
    type Err = UnknownCandidate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CandidateKey::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCandidate(s.to_string()))
    }
}

/// Display metadata for one candidate key.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateInfo {
    pub key: CandidateKey,
    pub name: String,
    /// Party label, possibly empty.
    pub party: String,
    /// Style identifier handed to the renderer.
    pub class: String,
}

/// The canonical key -> metadata mapping, always holding one entry per key in
/// `CandidateKey::ALL` order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateTable {
    infos: Vec<CandidateInfo>,
}

impl CandidateTable {
    pub fn info(&self, key: CandidateKey) -> &CandidateInfo {
        // The table is built from CandidateKey::ALL, so the index always matches.
        &self.infos[key as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateInfo> {
        self.infos.iter()
    }

    /// Replaces the metadata of one key. Fields left to `None` keep their
    /// current value.
    pub fn with_override(
        mut self,
        key: CandidateKey,
        name: Option<String>,
        party: Option<String>,
        class: Option<String>,
    ) -> CandidateTable {
        let info = &mut self.infos[key as usize];
        if let Some(n) = name {
            info.name = n;
        }
        if let Some(p) = party {
            info.party = p;
        }
        if let Some(c) = class {
            info.class = c;
        }
        self
    }
}

impl Default for CandidateTable {
    fn default() -> Self {
        let infos = CandidateKey::ALL
            .iter()
            .map(|key| {
                let (name, party) = match key {
                    CandidateKey::Harris => ("Harris", "D"),
                    CandidateKey::Trump => ("Trump", "R"),
                    CandidateKey::Oliver => ("Oliver", "L"),
                    CandidateKey::Stein => ("Stein", "G"),
                    CandidateKey::Kennedy => ("Kennedy", "I"),
                    CandidateKey::Others => ("Others", ""),
                };
                CandidateInfo {
                    key: *key,
                    name: name.to_string(),
                    party: party.to_string(),
                    class: key.as_str().to_string(),
                }
            })
            .collect();
        CandidateTable { infos }
    }
}

/// The results of one jurisdiction, or of the statewide aggregate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionRecord {
    pub jurisdiction: String,
    /// A key is absent only when the input never declared its column.
    pub votes: BTreeMap<CandidateKey, u64>,
    /// Not checked against the sum of `votes`.
    pub total: u64,
}

impl ElectionRecord {
    pub fn votes_for(&self, key: CandidateKey) -> Option<u64> {
        self.votes.get(&key).copied()
    }
}

/// Problems found in the data. None of them stops the processing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DataIssue {
    UnexpectedHeader {
        found: Vec<String>,
    },
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    MalformedNumber {
        line: u64,
        column: String,
        value: String,
    },
    MissingCandidateData {
        jurisdiction: String,
        key: CandidateKey,
    },
}

impl Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataIssue::UnexpectedHeader { found } => {
                write!(f, "CSV headers do not match expected format: {:?}", found)
            }
            DataIssue::MalformedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "Skipping row {}: incorrect number of columns ({} instead of {})",
                line, found, expected
            ),
            DataIssue::MalformedNumber {
                line,
                column,
                value,
            } => write!(
                f,
                "Row {}: invalid number {:?} in column {}, using 0",
                line, value, column
            ),
            DataIssue::MissingCandidateData { jurisdiction, key } => {
                write!(f, "Data for candidate {:?} not found in {}", key.as_str(), jurisdiction)
            }
        }
    }
}

// ******** Output data structures *********

/// One candidate's line within a rendered jurisdiction.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PresentationEntry {
    pub key: CandidateKey,
    pub display_name: String,
    pub party: String,
    pub class: String,
    pub votes: u64,
    /// The percentage in tenths of a percent: 472 is 47.2%.
    pub percentage_tenths: u64,
    pub formatted_votes: String,
}

impl PresentationEntry {
    pub fn percentage(&self) -> f64 {
        self.percentage_tenths as f64 / 10.0
    }

    pub fn percentage_label(&self) -> String {
        format!("{}.{}", self.percentage_tenths / 10, self.percentage_tenths % 10)
    }

    /// "Harris (D)", or only the name when there is no party.
    pub fn label(&self) -> String {
        if self.party.is_empty() {
            self.display_name.clone()
        } else {
            format!("{} ({})", self.display_name, self.party)
        }
    }

    pub fn bar_text(&self) -> String {
        format!("{}% ({})", self.percentage_label(), self.formatted_votes)
    }

    pub fn tooltip(&self) -> String {
        format!(
            "{}: {} votes ({}%)",
            self.label(),
            self.formatted_votes,
            self.percentage_label()
        )
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Presentation {
    Bars {
        total: u64,
        formatted_total: String,
        entries: Vec<PresentationEntry>,
        /// Keys that could not be presented because the record lacks them.
        missing: Vec<CandidateKey>,
    },
    /// The record is absent or its total is zero.
    NoData,
    /// The selected jurisdiction does not exist.
    NotFound { jurisdiction: String },
}

impl Presentation {
    /// The placeholder message shown instead of bars, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Presentation::Bars { .. } => None,
            Presentation::NoData => Some("No data available or total votes are zero."),
            Presentation::NotFound { .. } => Some("County data not found."),
        }
    }
}

/// Everything a renderer needs for one selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResultsView {
    pub title: String,
    pub presentation: Presentation,
}

/// The jurisdiction currently displayed.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub enum Selection {
    #[default]
    Statewide,
    County(String),
}

impl Selection {
    /// Interprets the value of a selection event: empty means statewide.
    pub fn from_event(value: &str) -> Selection {
        if value.trim().is_empty() {
            Selection::Statewide
        } else {
            Selection::County(value.to_string())
        }
    }
}

/// Turns a view into something visible.
pub trait Render {
    type Error;

    fn render(&mut self, view: &ResultsView) -> Result<(), Self::Error>;
}
