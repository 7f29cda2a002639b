//! Result file discovery.
//!
//! This module lists the result files directly inside a results
//! directory, honoring the configured hidden-file policy.

use crate::error::LoadError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for file scanning.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Ignore files whose names start with a dot
    pub skip_hidden: bool,
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            skip_hidden: config.skip_hidden,
        }
    }
}

/// Scanned file information.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// File name, used as the result set name
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Lists result files in a directory.
pub struct FileScanner {
    config: ScanConfig,
    results_dir: PathBuf,
}

impl FileScanner {
    /// Create a new file scanner.
    pub fn new(results_dir: PathBuf, config: ScanConfig) -> Self {
        Self {
            config,
            results_dir,
        }
    }

    /// The directory being scanned.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Scan for all result files, ordered by file name.
    pub fn scan(&self) -> Result<Vec<ScannedFile>, LoadError> {
        if !self.results_dir.exists() {
            return Err(LoadError::MissingDirectory(self.results_dir.clone()));
        }
        if !self.results_dir.is_dir() {
            return Err(LoadError::NotADirectory(self.results_dir.clone()));
        }

        let walker = WalkDir::new(&self.results_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.results_dir.clone());
                LoadError::Io {
                    path,
                    source: e.into(),
                }
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_excluded(&name) {
                warn!("Skipping hidden file: {}", name);
                continue;
            }

            if !entry.file_type().is_file() {
                debug!("Skipping non-file entry: {}", entry.path().display());
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Cannot stat {}: {}", entry.path().display(), e);
                    0
                }
            };

            files.push(ScannedFile {
                name,
                path: entry.into_path(),
                size,
            });
        }

        Ok(files)
    }

    /// Check if a name matches exclusion rules.
    fn is_excluded(&self, name: &str) -> bool {
        self.config.skip_hidden && name.starts_with('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b.txt"), "").unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();
        std::fs::write(temp_dir.path().join("nested").join("c.txt"), "").unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf(), ScanConfig::default());
        let files = scanner.scan().unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(".baseline"), "").unwrap();
        std::fs::write(temp_dir.path().join("run1"), "").unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf(), ScanConfig::default());
        let names: Vec<_> = scanner.scan().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec![".baseline", "run1"]);

        let scanner = FileScanner::new(
            temp_dir.path().to_path_buf(),
            ScanConfig { skip_hidden: true },
        );
        assert_eq!(scanner.scan().unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_files() {
        let temp_dir = TempDir::new().unwrap();
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("sweep.txt");
        std::fs::write(&target, "1,1,1,1,1,1\n2.0\nx\n").unwrap();
        std::fs::write(temp_dir.path().join("plain"), "").unwrap();
        std::os::unix::fs::symlink(&target, temp_dir.path().join("linked")).unwrap();

        let scanner = FileScanner::new(temp_dir.path().to_path_buf(), ScanConfig::default());
        let files = scanner.scan().unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["linked", "plain"]);
        assert_eq!(files[0].size, 18);
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("results");

        let scanner = FileScanner::new(missing, ScanConfig::default());
        assert!(matches!(
            scanner.scan(),
            Err(LoadError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_scan_file_instead_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("results");
        std::fs::write(&file, "").unwrap();

        let scanner = FileScanner::new(file, ScanConfig::default());
        assert!(matches!(scanner.scan(), Err(LoadError::NotADirectory(_))));
    }
}
