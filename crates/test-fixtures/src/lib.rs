//! Test fixture loader for mannord golden propagation scenarios.
//!
//! Provides typed deserialization of the scenario JSON files and helper
//! functions for loading them in tests across crates.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture data (the `test-fixtures` folder holding `golden/`).
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up until a sibling or child matches.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    loop {
        if path.join("golden").exists() && path.ends_with("test-fixtures") {
            return path;
        }
        let candidate = path.join("crates").join("test-fixtures");
        if candidate.join("golden").exists() {
            return candidate;
        }
        let sibling = path.join("test-fixtures");
        if sibling.join("golden").exists() {
            return sibling;
        }
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by file name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// A propagation scenario with reference outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub description: String,
    pub algorithm: String,
    pub k_max: usize,
    #[serde(default)]
    pub priors: BTreeMap<String, GoldenPrior>,
    pub votes: Vec<GoldenVote>,
    pub expected: GoldenExpected,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoldenPrior {
    #[serde(default)]
    pub base_reliability: f64,
    #[serde(default)]
    pub base_evidence: GoldenEvidence,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GoldenEvidence {
    pub negative: f64,
    pub positive: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenVote {
    pub user: String,
    pub item: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenExpected {
    pub items: BTreeMap<String, f64>,
    pub users: BTreeMap<String, f64>,
    pub normalization: f64,
    pub tolerance: f64,
}

/// Load every golden scenario under `golden/<algorithm>/`, with its file path.
pub fn load_scenarios(algorithm: &str) -> Vec<(PathBuf, GoldenScenario)> {
    list_fixtures(&format!("golden/{algorithm}"))
        .into_iter()
        .map(|path| {
            let relative = path
                .strip_prefix(fixtures_root())
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|_| path.to_string_lossy().into_owned());
            let scenario: GoldenScenario = load_fixture(&relative);
            (path, scenario)
        })
        .collect()
}
