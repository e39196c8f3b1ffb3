//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the certkit pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertkitConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output artifact configuration.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process per document (0 = unlimited).
    pub max_pages: usize,

    /// Minimum text length for a page to be considered text-bearing.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 20,
        }
    }
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Drop records that still hold sentinel fields after extraction.
    pub require_complete: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            require_complete: true,
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for per-serial split page documents.
    pub split_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            split_dir: PathBuf::from("split_pages"),
        }
    }
}

impl CertkitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
