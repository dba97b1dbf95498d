mod config;
pub mod builder;
pub mod manual;
pub mod parser;
use icu_collator::{Collator, CollatorOptions, Strength};
use log::{debug, info, warn};

use std::cmp::Ordering;
use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::parser::{parse_records, ParsedRecords};

pub const DEFAULT_STATEWIDE_LABEL: &str = "Statewide";

/// Sums every candidate and the totals over all the records.
///
/// A record without a given candidate counts as 0 for that candidate. The
/// result always holds every candidate key.
pub fn aggregate_statewide(records: &[ElectionRecord], label: &str) -> ElectionRecord {
    let mut votes: BTreeMap<CandidateKey, u64> =
        CandidateKey::ALL.iter().map(|k| (*k, 0)).collect();
    let mut total: u64 = 0;
    for r in records.iter() {
        for (key, count) in votes.iter_mut() {
            *count = count.saturating_add(r.votes_for(*key).unwrap_or(0));
        }
        total = total.saturating_add(r.total);
    }
    debug!("aggregate_statewide: {:?} total {}", votes, total);
    ElectionRecord {
        jurisdiction: label.to_string(),
        votes,
        total,
    }
}

/// Formats a vote count with a comma between groups of three digits.
///
/// ```
/// assert_eq!(election_bars::format_number(1234567), "1,234,567");
/// assert_eq!(election_bars::format_number(999), "999");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

/// The share of `votes` in `total`, in tenths of a percent, rounded half away
/// from zero. `total` must not be zero.
fn percentage_tenths(votes: u64, total: u64) -> u64 {
    let (v, t) = (votes as u128, total as u128);
    u64::try_from((v * 2000 + t) / (2 * t)).unwrap_or(u64::MAX)
}

/// Computes the bars for one record, against the given total.
///
/// Candidates come out in the fixed `CandidateKey::ALL` order. Without a
/// record or with a zero total, there is nothing to show.
pub fn present(
    record: Option<&ElectionRecord>,
    total: u64,
    candidates: &CandidateTable,
) -> Presentation {
    let record = match record {
        Some(r) if total > 0 => r,
        _ => {
            debug!("present: no data (total {})", total);
            return Presentation::NoData;
        }
    };

    let mut entries: Vec<PresentationEntry> = Vec::new();
    let mut missing: Vec<CandidateKey> = Vec::new();
    for info in candidates.iter() {
        let votes = match record.votes_for(info.key) {
            Some(v) => v,
            None => {
                warn!(
                    "{}",
                    DataIssue::MissingCandidateData {
                        jurisdiction: record.jurisdiction.clone(),
                        key: info.key,
                    }
                );
                missing.push(info.key);
                continue;
            }
        };
        entries.push(PresentationEntry {
            key: info.key,
            display_name: info.name.clone(),
            party: info.party.clone(),
            class: info.class.clone(),
            votes,
            percentage_tenths: percentage_tenths(votes, total),
            formatted_votes: format_number(votes),
        });
    }

    Presentation::Bars {
        total,
        formatted_total: format_number(total),
        entries,
        missing,
    }
}

/// Orders jurisdiction names with the root locale collation, tertiary
/// strength: accents and case only matter between otherwise equal names, and
/// lowercase comes first.
pub struct JurisdictionOrder {
    // None if the collation data could not be loaded.
    collator: Option<Collator>,
}

impl JurisdictionOrder {
    pub fn new() -> JurisdictionOrder {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("No collation data ({:?}), sorting by code points", e);
                None
            }
        };
        JurisdictionOrder { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ord = match &self.collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        };
        ord.then_with(|| a.cmp(b))
    }
}

impl Default for JurisdictionOrder {
    fn default() -> Self {
        JurisdictionOrder::new()
    }
}

/// Compares two names with a fresh `JurisdictionOrder`. Prefer keeping one
/// order around when sorting.
pub fn compare_jurisdictions(a: &str, b: &str) -> Ordering {
    JurisdictionOrder::new().compare(a, b)
}

/// The parsed dataset and its statewide totals.
///
/// Built once, never modified afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResults {
    // Sorted by jurisdiction name.
    records: Vec<ElectionRecord>,
    statewide: ElectionRecord,
    candidates: CandidateTable,
    issues: Vec<DataIssue>,
}

impl ElectionResults {
    /// Parses the CSV text and computes the totals.
    pub fn from_csv(text: &str, statewide_label: &str, candidates: CandidateTable) -> Self {
        let parsed = parse_records(text);
        ElectionResults::from_records(parsed.records, parsed.issues, statewide_label, candidates)
    }

    pub fn from_records(
        mut records: Vec<ElectionRecord>,
        issues: Vec<DataIssue>,
        statewide_label: &str,
        candidates: CandidateTable,
    ) -> Self {
        let statewide = aggregate_statewide(&records, statewide_label);
        let order = JurisdictionOrder::new();
        records.sort_by(|a, b| order.compare(&a.jurisdiction, &b.jurisdiction));
        info!(
            "{} jurisdictions, {} total votes",
            records.len(),
            statewide.total
        );
        ElectionResults {
            records,
            statewide,
            candidates,
            issues,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, sorted by jurisdiction.
    pub fn records(&self) -> &[ElectionRecord] {
        &self.records
    }

    pub fn statewide(&self) -> &ElectionRecord {
        &self.statewide
    }

    pub fn candidates(&self) -> &CandidateTable {
        &self.candidates
    }

    /// The problems found while reading the data.
    pub fn issues(&self) -> &[DataIssue] {
        &self.issues
    }

    /// The selectable jurisdiction names, in sorted order.
    pub fn jurisdictions(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.jurisdiction.as_str())
            .collect()
    }

    /// Case-sensitive lookup.
    pub fn find(&self, jurisdiction: &str) -> Option<&ElectionRecord> {
        self.records.iter().find(|r| r.jurisdiction == jurisdiction)
    }

    /// What to show for the given selection.
    pub fn select(&self, selection: &Selection) -> ResultsView {
        match selection {
            Selection::Statewide => ResultsView {
                title: "Statewide Results".to_string(),
                presentation: present(
                    Some(&self.statewide),
                    self.statewide.total,
                    &self.candidates,
                ),
            },
            Selection::County(name) => match self.find(name) {
                Some(r) => ResultsView {
                    title: format!("{} County Results", name),
                    presentation: present(Some(r), r.total, &self.candidates),
                },
                None => {
                    warn!("County data not found: {:?}", name);
                    ResultsView {
                        title: "County Results".to_string(),
                        presentation: Presentation::NotFound {
                            jurisdiction: name.clone(),
                        },
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "jurisdiction,harris,trump,oliver,stein,kennedy,others,total
Allegany,9231,22141,130,136,363,136,32137
Kent,5251,5561,60,82,114,60,11128
Baltimore City,195109,27984,892,3222,1875,1672,230754";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn results() -> ElectionResults {
        init();
        ElectionResults::from_csv(DATA, DEFAULT_STATEWIDE_LABEL, CandidateTable::default())
    }

    fn entries(p: &Presentation) -> &[PresentationEntry] {
        match p {
            Presentation::Bars { entries, .. } => entries,
            x => panic!("expected bars, got {:?}", x),
        }
    }

    #[test]
    fn format_numbers() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(100000), "100,000");
        assert_eq!(format_number(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn percentages_round_half_away_from_zero() {
        assert_eq!(percentage_tenths(1, 2000), 1); // 0.05%
        assert_eq!(percentage_tenths(1, 2001), 0);
        assert_eq!(percentage_tenths(5251, 11128), 472);
        assert_eq!(percentage_tenths(7, 7), 1000);
        assert_eq!(percentage_tenths(0, 7), 0);
    }

    #[test]
    fn percentages_saturate_on_inconsistent_totals() {
        assert_eq!(percentage_tenths(u64::MAX, 1), u64::MAX);
        assert_eq!(percentage_tenths(u64::MAX / 1000 + 1, 1), u64::MAX);
        assert_eq!(percentage_tenths(3, 1), 3000);
    }

    #[test]
    fn statewide_is_the_sum_of_counties() {
        let res = results();
        let sw = res.statewide();
        assert_eq!(sw.jurisdiction, "Statewide");
        for key in CandidateKey::ALL {
            let sum: u64 = res
                .records()
                .iter()
                .map(|r| r.votes_for(key).unwrap_or(0))
                .sum();
            assert_eq!(sw.votes_for(key), Some(sum));
        }
        assert_eq!(sw.votes_for(CandidateKey::Harris), Some(209591));
        assert_eq!(sw.total, 32137 + 11128 + 230754);
    }

    #[test]
    fn aggregation_treats_missing_keys_as_zero() {
        let mut votes = BTreeMap::new();
        votes.insert(CandidateKey::Trump, 10);
        let records = vec![
            ElectionRecord {
                jurisdiction: "A".to_string(),
                votes,
                total: 10,
            },
            ElectionRecord {
                jurisdiction: "B".to_string(),
                votes: BTreeMap::new(),
                total: 0,
            },
        ];
        let sw = aggregate_statewide(&records, "All");
        assert_eq!(sw.votes.len(), CandidateKey::ALL.len());
        assert_eq!(sw.votes_for(CandidateKey::Trump), Some(10));
        assert_eq!(sw.votes_for(CandidateKey::Harris), Some(0));
        assert_eq!(sw.total, 10);
        assert_eq!(aggregate_statewide(&records, "All"), sw);
        assert_eq!(aggregate_statewide(&[], "All").total, 0);
    }

    #[test]
    fn kent_end_to_end() {
        let res = results();
        let view = res.select(&Selection::County("Kent".to_string()));
        assert_eq!(view.title, "Kent County Results");
        let es = entries(&view.presentation);
        let got: Vec<(CandidateKey, u64)> =
            es.iter().map(|e| (e.key, e.percentage_tenths)).collect();
        assert_eq!(
            got,
            vec![
                (CandidateKey::Harris, 472),
                (CandidateKey::Trump, 500),
                (CandidateKey::Oliver, 5),
                (CandidateKey::Stein, 7),
                (CandidateKey::Kennedy, 10),
                (CandidateKey::Others, 5),
            ]
        );
        assert_eq!(es[0].percentage(), 47.2);
        assert_eq!(es[1].percentage_label(), "50.0");
        assert_eq!(es[0].label(), "Harris (D)");
        assert_eq!(es[5].label(), "Others");
        assert_eq!(es[0].bar_text(), "47.2% (5,251)");
        assert_eq!(es[1].tooltip(), "Trump (R): 5,561 votes (50.0%)");
        match &view.presentation {
            Presentation::Bars {
                total,
                formatted_total,
                missing,
                ..
            } => {
                assert_eq!(*total, 11128);
                assert_eq!(formatted_total, "11,128");
                assert!(missing.is_empty());
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn zero_total_means_no_data() {
        let res = results();
        let kent = res.find("Kent").unwrap();
        let table = CandidateTable::default();
        assert_eq!(present(Some(kent), 0, &table), Presentation::NoData);
        assert_eq!(present(None, 11128, &table), Presentation::NoData);
        assert_eq!(
            Presentation::NoData.placeholder(),
            Some("No data available or total votes are zero.")
        );
    }

    #[test]
    fn missing_candidates_are_omitted() {
        init();
        let text = "jurisdiction,harris,trump,total\nKent,5251,5561,11128";
        let res = ElectionResults::from_csv(text, "Statewide", CandidateTable::default());
        let kent = res.find("Kent").unwrap();
        match present(Some(kent), kent.total, res.candidates()) {
            Presentation::Bars {
                entries, missing, ..
            } => {
                let keys: Vec<CandidateKey> = entries.iter().map(|e| e.key).collect();
                assert_eq!(keys, vec![CandidateKey::Harris, CandidateKey::Trump]);
                assert_eq!(
                    missing,
                    vec![
                        CandidateKey::Oliver,
                        CandidateKey::Stein,
                        CandidateKey::Kennedy,
                        CandidateKey::Others
                    ]
                );
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn jurisdictions_are_sorted() {
        let res = results();
        assert_eq!(
            res.jurisdictions(),
            vec!["Allegany", "Baltimore City", "Kent"]
        );
        assert_eq!(
            compare_jurisdictions("baltimore", "Baltimore City"),
            Ordering::Less
        );
        assert_eq!(compare_jurisdictions("kent", "Kent"), Ordering::Less);
        assert_eq!(compare_jurisdictions("Éa", "Eb"), Ordering::Less);
        assert_eq!(compare_jurisdictions("Kent", "Kent"), Ordering::Equal);
    }

    #[test]
    fn accented_and_case_variants_sort_like_a_reader_expects() {
        init();
        let text = "jurisdiction,harris,trump,oliver,stein,kennedy,others,total
Kent,1,0,0,0,0,0,1
Eb,1,0,0,0,0,0,1
kent,1,0,0,0,0,0,1
Éa,1,0,0,0,0,0,1";
        let res = ElectionResults::from_csv(text, "Statewide", CandidateTable::default());
        assert_eq!(res.jurisdictions(), vec!["Éa", "Eb", "kent", "Kent"]);
    }

    #[test]
    fn selection_events() {
        assert_eq!(Selection::from_event(""), Selection::Statewide);
        assert_eq!(Selection::from_event("  "), Selection::Statewide);
        assert_eq!(
            Selection::from_event("Kent"),
            Selection::County("Kent".to_string())
        );
        assert_eq!(Selection::default(), Selection::Statewide);
    }

    #[test]
    fn statewide_selection() {
        let res = results();
        let view = res.select(&Selection::Statewide);
        assert_eq!(view.title, "Statewide Results");
        assert_eq!(entries(&view.presentation).len(), 6);
    }

    #[test]
    fn unknown_county_is_not_found() {
        let res = results();
        // Lookups are case-sensitive.
        for name in ["Atlantis", "kent"] {
            let view = res.select(&Selection::County(name.to_string()));
            assert_eq!(view.title, "County Results");
            assert_eq!(
                view.presentation,
                Presentation::NotFound {
                    jurisdiction: name.to_string()
                }
            );
            assert_eq!(
                view.presentation.placeholder(),
                Some("County data not found.")
            );
        }
    }

    #[test]
    fn custom_candidate_metadata() {
        init();
        let table = CandidateTable::default().with_override(
            CandidateKey::Others,
            Some("Write-ins".to_string()),
            Some("W".to_string()),
            None,
        );
        let res = ElectionResults::from_csv(DATA, "Maryland", table);
        assert_eq!(res.statewide().jurisdiction, "Maryland");
        let view = res.select(&Selection::County("Allegany".to_string()));
        let others = &entries(&view.presentation)[5];
        assert_eq!(others.label(), "Write-ins (W)");
        assert_eq!(others.class, "others");
    }
}
