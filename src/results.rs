use log::{debug, info, warn};

use election_bars::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_data;
pub mod render;

use crate::results::config_reader::*;
use crate::results::io_data::*;
use crate::results::render::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ResultsError {
    #[snafu(display("Error opening results file {path}"))]
    OpeningCsv {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid candidate in the configuration"))]
    UnknownCandidate {
        source: election_bars::UnknownCandidate,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Error loading election data: no jurisdiction could be read"))]
    EmptyElection {},
    #[snafu(display("Error writing the results"))]
    WritingOutput { source: std::io::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ResultsResult<T> = Result<T, ResultsError>;

/// The views to display, in order.
fn selections(args: &Args, results: &ElectionResults) -> Vec<Selection> {
    if args.all {
        let mut l = vec![Selection::Statewide];
        l.extend(
            results
                .jurisdictions()
                .iter()
                .map(|name| Selection::County(name.to_string())),
        );
        l
    } else {
        vec![Selection::from_event(args.county.as_deref().unwrap_or(""))]
    }
}

pub fn render_views<R: Render<Error = ResultsError>>(
    results: &ElectionResults,
    selections: &[Selection],
    renderer: &mut R,
) -> ResultsResult<()> {
    for s in selections.iter() {
        debug!("render_views: {:?}", s);
        let view = results.select(s);
        renderer.render(&view)?;
    }
    Ok(())
}

/// Loads the dataset according to the configuration and the command line.
pub fn load_results(args: &Args) -> ResultsResult<(ElectionResults, ResultsConfig)> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => ResultsConfig::default(),
    };
    info!("config: {:?}", config);

    let data_path: Option<String> = match (&args.input, &args.config, &config.data_file) {
        (Some(input), _, _) if !input.is_empty() => Some(input.clone()),
        (_, Some(config_path), Some(data_file)) => Some(data_file_path(config_path, data_file)?),
        _ => None,
    };
    let text = read_results_text(data_path.as_deref())?;

    let label = config
        .statewide_label
        .clone()
        .unwrap_or_else(|| DEFAULT_STATEWIDE_LABEL.to_string());
    let results = ElectionResults::from_csv(&text, &label, config.candidate_table()?);
    ensure!(!results.is_empty(), EmptyElectionSnafu {});
    if !results.issues().is_empty() {
        warn!("{} problems found in the data", results.issues().len());
    }
    Ok((results, config))
}

/// Compares the computed summary with a reference summary, printing the differences.
pub fn check_reference(reference: &JSValue, pretty_js: &str) -> ResultsResult<()> {
    let pretty_js_ref = serde_json::to_string_pretty(reference).context(ParsingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    info!("The summary matches the reference");
    Ok(())
}

pub fn run(args: &Args) -> ResultsResult<()> {
    let (results, config) = load_results(args)?;

    if args.list {
        for name in results.jurisdictions() {
            println!("{}", name);
        }
        return Ok(());
    }

    let sels = selections(args, &results);
    let bar_width = args
        .bar_width
        .or(config.bar_width)
        .unwrap_or(DEFAULT_BAR_WIDTH);
    if bar_width == 0 {
        whatever!("The bar width must be at least 1, got {}", bar_width)
    }
    let out = args.out.as_deref().filter(|s| !s.is_empty());

    // The JSON summary takes over the standard output.
    if out != Some("stdout") {
        let stdout = std::io::stdout();
        let mut text_renderer = TextRenderer::new(stdout.lock(), bar_width);
        render_views(&results, &sels, &mut text_renderer)?;
    }

    let mut summary = JsonSummary::default();
    render_views(&results, &sels, &mut summary)?;
    let pretty_js = serde_json::to_string_pretty(&summary.to_json()).context(ParsingJsonSnafu {})?;

    match out {
        Some("stdout") => println!("{}", pretty_js),
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, &pretty_js).context(WritingSummarySnafu { path })?;
        }
        None => {}
    }

    if let Some(reference_p) = &args.reference {
        let reference = read_summary(reference_p)?;
        check_reference(&reference, &pretty_js)?;
    }

    Ok(())
}

/// Prints the error with its chain of causes.
pub fn report_error(e: &ResultsError) {
    eprintln!("An error occured: {}", e);
    let mut source = std::error::Error::source(e);
    while let Some(s) = source {
        eprintln!("  caused by: {}", s);
        source = std::error::Error::source(s);
    }
    if let Some(bt) = ErrorCompat::backtrace(e) {
        eprintln!("trace: {}", bt);
    }
}
