use clap::Parser;

/// Displays county election results as percentage bars.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with settings: data file, statewide label, bar width and
    /// candidate names. See the manual of the election_bars crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) The CSV file with the results. If not specified, the embedded
    /// 2024 Maryland presidential results are used. Overrides the data file of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (county name or empty) The county to display. An empty value displays the statewide results.
    #[clap(long, value_parser)]
    pub county: Option<String>,

    /// If passed as an argument, prints the names of the counties and exits.
    #[clap(long, takes_value = false)]
    pub list: bool,

    /// If passed as an argument, displays the statewide results followed by every county.
    #[clap(long, takes_value = false)]
    pub all: bool,

    /// (file path, 'stdout' or empty) If specified, a summary of the displayed results will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing a summary in JSON format. If provided, mdresults will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default 40) The width in characters of a full bar.
    #[clap(long, value_parser)]
    pub bar_width: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
