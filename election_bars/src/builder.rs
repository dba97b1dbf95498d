pub use crate::config::*;
use crate::ElectionResults;

/// A builder for assembling results without going through CSV text.
///
/// ```
/// pub use election_bars::builder::Builder;
/// pub use election_bars::{CandidateKey, Selection};
///
/// let results = Builder::new("Statewide")
///     .record(
///         "Kent",
///         &[(CandidateKey::Harris, 5251), (CandidateKey::Trump, 5561)],
///         10812,
///     )
///     .build();
///
/// assert_eq!(results.statewide().total, 10812);
/// let view = results.select(&Selection::County("Kent".to_string()));
/// assert_eq!(view.title, "Kent County Results");
/// ```
pub struct Builder {
    pub(crate) _label: String,
    pub(crate) _candidates: CandidateTable,
    pub(crate) _records: Vec<ElectionRecord>,
}

impl Builder {
    pub fn new(statewide_label: &str) -> Builder {
        Builder {
            _label: statewide_label.to_string(),
            _candidates: CandidateTable::default(),
            _records: Vec::new(),
        }
    }

    /// Replaces the candidate metadata.
    pub fn candidates(self, table: CandidateTable) -> Builder {
        Builder {
            _candidates: table,
            ..self
        }
    }

    /// Adds the results of one jurisdiction.
    ///
    /// Candidates that are not listed are absent from the record, not zero.
    pub fn record(
        mut self,
        jurisdiction: &str,
        votes: &[(CandidateKey, u64)],
        total: u64,
    ) -> Builder {
        self._records.push(ElectionRecord {
            jurisdiction: jurisdiction.to_string(),
            votes: votes.iter().copied().collect(),
            total,
        });
        self
    }

    pub fn add_record(&mut self, record: &ElectionRecord) {
        self._records.push(record.clone());
    }

    pub fn build(self) -> ElectionResults {
        ElectionResults::from_records(self._records, Vec::new(), &self._label, self._candidates)
    }
}
