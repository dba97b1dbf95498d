// Where the results text comes from.

use crate::results::*;

/// 2024 presidential election, Maryland, by county.
pub const EMBEDDED_DATA: &str = include_str!("../../data/md_2024_president.csv");

/// Reads the CSV text from the given file, or returns the embedded dataset.
pub fn read_results_text(path: Option<&str>) -> ResultsResult<String> {
    match path {
        Some(p) => {
            info!("Attempting to read results file {:?}", p);
            let contents = fs::read_to_string(p).context(OpeningCsvSnafu { path: p })?;
            debug!("Read results file {:?} ({} bytes)", p, contents.len());
            Ok(contents)
        }
        None => {
            debug!("Using the embedded dataset");
            Ok(EMBEDDED_DATA.to_string())
        }
    }
}

/// Resolves the data file of a config, relative to the directory of the config file.
pub fn data_file_path(config_path: &str, data_file: &str) -> ResultsResult<String> {
    let root_p = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    let p: PathBuf = [root_p, Path::new(data_file)].iter().collect();
    Ok(p.as_path().display().to_string())
}
