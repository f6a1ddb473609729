//! Human-readable class names, positionally matching the model output.
//!
use std::{fs, path::Path};

use anyhow::{bail, Context, Result};

/// Class names of the lung CT scan model, in training order.
pub const DEFAULT_LABELS: [&str; 3] = ["Bengin cases", "Malignant cases", "Normal cases"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassLabels {
    labels: Vec<String>,
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
        }
    }
}

impl ClassLabels {
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let table = Self { labels };
        if table.is_empty() {
            bail!("label table is empty");
        }
        Ok(table)
    }

    /// Parse one label per line. Blank lines are skipped and surrounding whitespace trimmed.
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read labels from {}", path.display()))?;

        Self::parse(&text).with_context(|| format!("invalid label file {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|known| known == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
