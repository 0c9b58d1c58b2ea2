use crate::error::PredictionError;
use std::path::Path;

/// Class names in model output order.
///
/// Parsed from a plain-text asset with one label per line. Row order is the
/// contract with the model, so lines are kept verbatim: only the line ending
/// is stripped and a final trailing newline does not add a class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn parse(text: &str) -> Self {
        text.lines().collect()
    }

    pub fn from_path(path: &Path) -> Result<Self, PredictionError> {
        let text = std::fs::read_to_string(path).map_err(|source| PredictionError::LabelTable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
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
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
