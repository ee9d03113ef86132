//! Publisher input discovery: JSON files and directories of them.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use stac_common::{StacError, UnitFailure};

use crate::publish::StacDocument;

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Expand inputs into JSON files. Directories are walked recursively and
/// contribute their `*.json` files in path order; files are kept as given.
pub fn expand_inputs(inputs: &[PathBuf]) -> (Vec<PathBuf>, Vec<UnitFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_json(entry.path()) => {
                    found.push(entry.into_path())
                }
                Ok(_) => {}
                Err(e) => {
                    let id = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| input.display().to_string());
                    warn!(path = %id, error = %e, "Failed to walk input");
                    failures.push(UnitFailure::new(id, StacError::Persistence(e.to_string())));
                }
            }
        }
        found.sort();
        debug!(dir = %input.display(), files = found.len(), "Expanded directory");
        files.extend(found);
    }

    (files, failures)
}

/// Read and classify every file. Unreadable or invalid files are reported
/// by path.
pub fn load_documents(files: &[PathBuf]) -> (Vec<StacDocument>, Vec<UnitFailure>) {
    let mut documents = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for path in files {
        let outcome = std::fs::read(path)
            .map_err(StacError::from)
            .and_then(|bytes| StacDocument::from_slice(&bytes));
        match outcome {
            Ok(document) => documents.push(document),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Skipping input");
                failures.push(UnitFailure::new(path.display().to_string(), error));
            }
        }
    }

    (documents, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("N00E005/N00E005_FALL")).unwrap();
        fs::write(dir.path().join("catalog.json"), "{}").unwrap();
        fs::write(dir.path().join("N00E005/collection.json"), "{}").unwrap();
        fs::write(dir.path().join("N00E005/N00E005_FALL/N00E005_FALL.json"), "{}").unwrap();
        fs::write(dir.path().join("README.md"), "notes").unwrap();

        let single = dir.path().join("catalog.json");
        let (files, failures) = expand_inputs(&[dir.path().to_path_buf(), single.clone()]);

        assert!(failures.is_empty());
        assert_eq!(files.len(), 4);
        assert_eq!(files[3], single);
        assert!(files.iter().all(|f| is_json(f)));
    }

    #[test]
    fn test_load_reports_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        let missing = dir.path().join("missing.json");
        fs::write(&good, r#"{"type": "Catalog", "id": "root"}"#).unwrap();
        fs::write(&bad, "not json").unwrap();

        let (documents, failures) = load_documents(&[good, bad, missing]);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "root");
        let kinds: Vec<&str> = failures.iter().map(|f| f.error.kind()).collect();
        assert_eq!(kinds, vec!["serialization", "persistence"]);
    }
}
