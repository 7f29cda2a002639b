//! Result file parsing.
//!
//! A result file is a sequence of 3-line records:
//!
//! ```text
//! 2, 1, 2, 4, 64, 4     <- ALUs, MULs, LSUs, stations per FU, pregs, fetch width
//! 1.734                 <- average IPC
//!                       <- ignored
//! ```

use crate::error::LoadError;
use crate::models::{Record, ResultSet, CONFIG_FIELDS};
use crate::scanner::{FileScanner, ScannedFile};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use tracing::{debug, info};

/// Lines per record in a result file.
pub const LINES_PER_RECORD: usize = 3;

/// Parse the contents of one result file.
///
/// `name` is only used in error messages. The third line of every record
/// is read and discarded.
pub fn parse_records(name: &str, content: &str) -> Result<Vec<Record>, LoadError> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() % LINES_PER_RECORD != 0 {
        return Err(LoadError::TruncatedRecord {
            file: name.to_string(),
            lines: lines.len(),
        });
    }

    lines
        .chunks_exact(LINES_PER_RECORD)
        .enumerate()
        .map(|(i, chunk)| {
            let first_line = i * LINES_PER_RECORD + 1;
            let config = parse_config(name, first_line, chunk[0])?;
            let ipc = parse_number(name, first_line + 1, chunk[1])?;
            Ok(Record::new(config, ipc))
        })
        .collect()
}

/// Parse a comma-separated configuration line.
fn parse_config(name: &str, line: usize, text: &str) -> Result<[f64; CONFIG_FIELDS], LoadError> {
    let tokens: Vec<&str> = text.split(',').collect();

    if tokens.len() != CONFIG_FIELDS {
        return Err(LoadError::ConfigArity {
            file: name.to_string(),
            line,
            expected: CONFIG_FIELDS,
            found: tokens.len(),
        });
    }

    let mut config = [0.0; CONFIG_FIELDS];
    for (slot, token) in config.iter_mut().zip(tokens) {
        *slot = parse_number(name, line, token)?;
    }
    Ok(config)
}

fn parse_number(name: &str, line: usize, token: &str) -> Result<f64, LoadError> {
    let token = token.trim();
    token.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        file: name.to_string(),
        line,
        token: token.to_string(),
    })
}

/// Read and parse a single scanned file.
pub fn load_file(file: &ScannedFile) -> Result<ResultSet, LoadError> {
    let content = fs::read_to_string(&file.path).map_err(|source| LoadError::Io {
        path: file.path.clone(),
        source,
    })?;

    let records = parse_records(&file.name, &content)?;
    debug!("Parsed {} records from {}", records.len(), file.name);

    Ok(ResultSet::new(file.name.clone(), records))
}

/// Load every result file found by the scanner, ordered by file name.
///
/// Stops at the first file that fails to parse.
pub fn load_all(scanner: &FileScanner, show_progress: bool) -> Result<Vec<ResultSet>, LoadError> {
    let files = scanner.scan()?;
    info!(
        "Found {} result files in {}",
        files.len(),
        scanner.results_dir().display()
    );

    let progress_bar = if show_progress && !files.is_empty() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut sets = Vec::with_capacity(files.len());
    for file in &files {
        if let Some(ref pb) = progress_bar {
            pb.set_message(file.name.clone());
        }

        let set = match load_file(file) {
            Ok(set) => set,
            Err(e) => {
                if let Some(ref pb) = progress_bar {
                    pb.abandon();
                }
                return Err(e);
            }
        };
        sets.push(set);

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Load complete");
    }

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScanConfig;
    use tempfile::TempDir;

    #[test]
    fn test_parse_two_records() {
        let content = "1,1,1,1,1,1\n2.0\nx\n1,1,1,1,1,1\n4.0\nx\n";
        let records = parse_records("a.txt", content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].config, [1.0; CONFIG_FIELDS]);
        assert_eq!(records[0].ipc, 2.0);
        assert_eq!(records[1].ipc, 4.0);
    }

    #[test]
    fn test_parse_simulator_spacing() {
        let content = "2, 1, 3, 4, 64, 8\n1.734\n\n";
        let records = parse_records("run", content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].config, [2.0, 1.0, 3.0, 4.0, 64.0, 8.0]);
        assert_eq!(records[0].ipc, 1.734);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_records("empty", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated_record() {
        let content = "1,1,1,1,1,1\n2.0\nx\n1,1,1,1,1,1\n4.0\n";
        let err = parse_records("a.txt", content).unwrap_err();

        assert!(matches!(
            err,
            LoadError::TruncatedRecord { lines: 5, .. }
        ));
    }

    #[test]
    fn test_parse_wrong_arity() {
        let content = "1,1,1,1,1,1\n2.0\nx\n1,1,1,1,1\n4.0\nx\n";
        let err = parse_records("a.txt", content).unwrap_err();

        match err {
            LoadError::ConfigArity {
                line, found, expected, ..
            } => {
                assert_eq!(line, 4);
                assert_eq!(found, 5);
                assert_eq!(expected, CONFIG_FIELDS);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_invalid_number() {
        let content = "1,1,two,1,1,1\n2.0\nx\n";
        let err = parse_records("a.txt", content).unwrap_err();

        match err {
            LoadError::InvalidNumber { line, token, .. } => {
                assert_eq!(line, 1);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_records("a.txt", "1,1,1,1,1,1\nfast\nx\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 2, .. }));
    }

    #[test]
    fn test_load_all_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("b.txt"),
            "1,1,1,1,1,1\n2.0\nx\n",
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("a.txt"),
            "1,1,1,1,1,1\n2.0\nx\n2,2,2,2,2,2\n3.0\nx\n3,3,3,3,3,3\n1.0\nx\n",
        )
        .unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf(), ScanConfig::default());
        let sets = load_all(&scanner, false).unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "a.txt");
        assert_eq!(sets[0].len(), 3);
        assert_eq!(sets[1].name, "b.txt");
        assert_eq!(sets[1].len(), 1);
    }

    #[test]
    fn test_load_fixture_results() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/results");
        let scanner = FileScanner::new(dir, ScanConfig::default());
        let sets = load_all(&scanner, false).unwrap();

        let summary: Vec<(&str, usize)> = sets.iter().map(|s| (s.name.as_str(), s.len())).collect();
        assert_eq!(summary, vec![("baseline.txt", 4), ("wide_fetch.txt", 2)]);
        assert_eq!(sets[1].records[1].config, [3.0, 2.0, 2.0, 4.0, 128.0, 8.0]);
    }

    #[test]
    fn test_load_all_stops_on_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("good"), "1,1,1,1,1,1\n2.0\nx\n").unwrap();
        std::fs::write(temp_dir.path().join("bad"), "1,1,1\n2.0\nx\n").unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf(), ScanConfig::default());
        assert!(load_all(&scanner, false).is_err());
    }
}
