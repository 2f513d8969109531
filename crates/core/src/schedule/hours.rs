//! The ordered hour labels printed down the calendar page.

use serde::Serialize;

/// Hour labels in print order. Blank entries are spacer rows left open for
/// handwriting and never carry appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourLabels(Vec<Option<String>>);

impl HourLabels {
    /// Build from raw strings; empty or whitespace-only strings are spacers.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            labels
                .into_iter()
                .map(|s| {
                    let s = s.as_ref().trim();
                    (!s.is_empty()).then(|| s.to_string())
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels with their row position, spacers as `None`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&str>)> {
        self.0.iter().enumerate().map(|(i, l)| (i, l.as_deref()))
    }

    /// Position of a non-blank label.
    pub fn position(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.0.iter().position(|l| l.as_deref() == Some(label))
    }

    pub fn is_blank(&self, index: usize) -> bool {
        matches!(self.0.get(index), Some(None))
    }
}

impl Default for HourLabels {
    fn default() -> Self {
        Self::new(["", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17", "18", "", ""])
    }
}
