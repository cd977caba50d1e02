//! Diagnostics Source
//!
//! Types for workspace diagnostics and the provider seam the monitor
//! reads them through. The monitor never caches counts: it re-derives
//! the problem total from the provider on every change event.
//!
//! The shipped [`FileProvider`] reads a JSON dump of per-document
//! diagnostics (the kind an editor or LSP bridge can export), so the
//! binary has a live source without speaking a protocol. Tests inject
//! their own providers through the trait.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

/// Diagnostic severity levels, most severe first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Compile/analysis error
    Error,
    /// Warning
    Warning,
    /// Informational note
    Information,
    /// Style/refactoring hint
    Hint,
}

impl Severity {
    /// Whether this severity counts toward the problem total.
    ///
    /// Only the two most severe levels do; information and hints never
    /// change the mapped pose.
    #[must_use]
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

// Editors disagree on severity casing ("Error" vs "error"), so names
// are matched case-insensitively. Unknown names still fail the parse.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        match name.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "information" => Ok(Self::Information),
            "hint" => Ok(Self::Hint),
            _ => Err(serde::de::Error::unknown_variant(
                &name,
                &["error", "warning", "information", "hint"],
            )),
        }
    }
}

/// A single diagnostic entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// One-based line number, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// All diagnostics attached to one open document
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentDiagnostics {
    /// Document path
    pub path: PathBuf,
    /// Diagnostic entries for this document
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// Source of workspace diagnostics
///
/// The monitor is generic over this seam so tests and alternative
/// front-ends (an LSP bridge, a watch task) can supply their own.
pub trait DiagnosticsProvider {
    /// Current diagnostics for every open document
    fn diagnostics(&self) -> Vec<DocumentDiagnostics>;
}

/// Count the problems across all documents (errors and warnings only)
#[must_use]
pub fn count_problems(documents: &[DocumentDiagnostics]) -> usize {
    documents
        .iter()
        .flat_map(|doc| doc.diagnostics.iter())
        .filter(|d| d.severity.is_problem())
        .count()
}

/// Errors reading a diagnostics dump
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The dump file could not be read
    #[error("failed to read diagnostics file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The dump file is not valid JSON
    #[error("failed to parse diagnostics file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Diagnostics read from a JSON dump file
///
/// The file holds an array of [`DocumentDiagnostics`]. A missing file
/// is treated as an empty workspace, not an error, so the face starts
/// happy instead of the app refusing to launch.
pub struct FileProvider {
    path: PathBuf,
    documents: Vec<DocumentDiagnostics>,
}

impl FileProvider {
    /// Create a provider for the given dump path and read it once
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ProviderError> {
        let mut provider = Self {
            path: path.into(),
            documents: Vec::new(),
        };
        provider.reload()?;
        Ok(provider)
    }

    /// Re-read the dump file
    pub fn reload(&mut self) -> Result<(), ProviderError> {
        if !self.path.exists() {
            self.documents.clear();
            return Ok(());
        }

        let raw = std::fs::read_to_string(&self.path).map_err(|source| ProviderError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.documents = serde_json::from_str(&raw).map_err(|source| ProviderError::Parse {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            documents = self.documents.len(),
            problems = count_problems(&self.documents),
            "reloaded diagnostics dump"
        );
        Ok(())
    }

    /// The dump path this provider watches
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticsProvider for FileProvider {
    fn diagnostics(&self) -> Vec<DocumentDiagnostics> {
        self.documents.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(path: &str, severities: &[Severity]) -> DocumentDiagnostics {
        DocumentDiagnostics {
            path: PathBuf::from(path),
            diagnostics: severities
                .iter()
                .map(|&severity| Diagnostic {
                    severity,
                    message: "x".to_string(),
                    line: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_count_spans_documents() {
        let docs = vec![
            doc("a.rs", &[Severity::Error, Severity::Warning]),
            doc("b.rs", &[Severity::Error]),
        ];
        assert_eq!(count_problems(&docs), 3);
    }

    #[test]
    fn test_information_and_hints_never_count() {
        let docs = vec![doc(
            "a.rs",
            &[
                Severity::Information,
                Severity::Hint,
                Severity::Hint,
                Severity::Information,
            ],
        )];
        assert_eq!(count_problems(&docs), 0);
    }

    #[test]
    fn test_file_provider_parses_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.json");
        std::fs::write(
            &path,
            r#"[
                {"path": "src/lib.rs", "diagnostics": [
                    {"severity": "error", "message": "mismatched types", "line": 12},
                    {"severity": "hint", "message": "consider borrowing"}
                ]},
                {"path": "src/main.rs", "diagnostics": [
                    {"severity": "warning", "message": "unused variable"}
                ]}
            ]"#,
        )
        .unwrap();

        let provider = FileProvider::new(&path).unwrap();
        let docs = provider.diagnostics();
        assert_eq!(docs.len(), 2);
        assert_eq!(count_problems(&docs), 2);
    }

    #[test]
    fn test_severity_names_parse_case_insensitively() {
        let severity: Severity = serde_json::from_str(r#""Error""#).unwrap();
        assert_eq!(severity, Severity::Error);
        let severity: Severity = serde_json::from_str(r#""WARNING""#).unwrap();
        assert_eq!(severity, Severity::Warning);
        let severity: Severity = serde_json::from_str(r#""hint""#).unwrap();
        assert_eq!(severity, Severity::Hint);
        assert!(serde_json::from_str::<Severity>(r#""fatal""#).is_err());
    }

    #[test]
    fn test_dump_with_mixed_case_severities_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.json");
        std::fs::write(
            &path,
            r#"[
                {"path": "src/lib.rs", "diagnostics": [
                    {"severity": "Error", "message": "mismatched types"},
                    {"severity": "Information", "message": "note"},
                    {"severity": "warning", "message": "unused variable"}
                ]}
            ]"#,
        )
        .unwrap();

        let provider = FileProvider::new(&path).unwrap();
        assert_eq!(count_problems(&provider.diagnostics()), 2);
    }

    #[test]
    fn test_missing_file_is_empty_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileProvider::new(dir.path().join("nope.json")).unwrap();
        assert!(provider.diagnostics().is_empty());
    }

    #[test]
    fn test_malformed_dump_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileProvider::new(&path),
            Err(ProviderError::Parse { .. })
        ));
    }
}
