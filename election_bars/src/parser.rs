// Reading the county results from CSV text.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::config::*;

pub const JURISDICTION_COLUMN: &str = "jurisdiction";
pub const TOTAL_COLUMN: &str = "total";

/// The records read from the input, in input order, and everything that
/// looked wrong along the way.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<ElectionRecord>,
    pub issues: Vec<DataIssue>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
enum Column {
    Jurisdiction,
    Candidate(CandidateKey),
    Total,
    Ignored,
}

/// The header this program was written against.
pub fn expected_header() -> Vec<String> {
    let mut h = vec![JURISDICTION_COLUMN.to_string()];
    h.extend(CandidateKey::ALL.iter().map(|k| k.as_str().to_string()));
    h.push(TOTAL_COLUMN.to_string());
    h
}

/// Parses the results table.
///
/// The first line is the header. Fields are split on commas without any
/// quoting support and trimmed. A row with the wrong number of fields is
/// skipped, an invalid number is read as 0. A blank line between rows counts
/// as a row with one empty field. Blank lines at the end are ignored. Nothing
/// in the content makes this function fail.
pub fn parse_records(text: &str) -> ParsedRecords {
    let mut res = ParsedRecords::default();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = rdr.records();

    let mut last_lineno: u64 = 1;
    let header: Vec<String> = match rows.next() {
        Some(Ok(h)) => {
            last_lineno = h.position().map(|p| p.line()).unwrap_or(1);
            h.iter().map(|s| s.to_string()).collect()
        }
        Some(Err(e)) => {
            warn!("parse_records: could not read the header: {}", e);
            return res;
        }
        None => {
            warn!("parse_records: empty input");
            return res;
        }
    };
    debug!("parse_records: header {:?}", header);

    if header != expected_header() {
        let issue = DataIssue::UnexpectedHeader {
            found: header.clone(),
        };
        warn!("{}", issue);
        res.issues.push(issue);
    }
    let columns = classify_columns(&header);

    for (idx, row_r) in rows.enumerate() {
        // The header is line 1.
        let fallback_lineno = idx as u64 + 2;
        let row = match row_r {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping row {}: {}", fallback_lineno, e);
                continue;
            }
        };
        let lineno = row
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_lineno);

        // The reader drops empty lines, they only show up as gaps.
        for blank in (last_lineno + 1)..lineno {
            let issue = DataIssue::MalformedRow {
                line: blank,
                expected: header.len(),
                found: 1,
            };
            warn!("{}", issue);
            res.issues.push(issue);
        }
        last_lineno = lineno;

        if row.len() != header.len() {
            let issue = DataIssue::MalformedRow {
                line: lineno,
                expected: header.len(),
                found: row.len(),
            };
            warn!("{}", issue);
            res.issues.push(issue);
            continue;
        }

        let mut jurisdiction = String::new();
        let mut votes: BTreeMap<CandidateKey, u64> = BTreeMap::new();
        let mut total: u64 = 0;
        for (column, value) in columns.iter().zip(row.iter()) {
            match column {
                Column::Jurisdiction => jurisdiction = value.to_string(),
                Column::Candidate(key) => {
                    let count = read_count(value, key.as_str(), lineno, &mut res.issues);
                    votes.insert(*key, count);
                }
                Column::Total => {
                    total = read_count(value, TOTAL_COLUMN, lineno, &mut res.issues);
                }
                Column::Ignored => {}
            }
        }
        debug!(
            "parse_records: line {}: {} {:?} total {}",
            lineno, jurisdiction, votes, total
        );
        res.records.push(ElectionRecord {
            jurisdiction,
            votes,
            total,
        });
    }

    info!(
        "Parsed {} jurisdictions ({} issues)",
        res.records.len(),
        res.issues.len()
    );
    res
}

// The first column is always the jurisdiction. The others are trusted to be
// what their header says.
fn classify_columns(header: &[String]) -> Vec<Column> {
    header
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                Column::Jurisdiction
            } else if name == TOTAL_COLUMN {
                Column::Total
            } else if let Ok(key) = name.parse::<CandidateKey>() {
                Column::Candidate(key)
            } else {
                warn!("Ignoring unknown column {:?}", name);
                Column::Ignored
            }
        })
        .collect()
}

fn read_count(value: &str, column: &str, lineno: u64, issues: &mut Vec<DataIssue>) -> u64 {
    match value.parse::<u64>() {
        Ok(x) => x,
        Err(_) => {
            let issue = DataIssue::MalformedNumber {
                line: lineno,
                column: column.to_string(),
                value: value.to_string(),
            };
            warn!("{}", issue);
            issues.push(issue);
            0
        }
    }
}
