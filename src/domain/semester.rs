//! Semester label to portal id mapping

use serde::{Deserialize, Serialize};

/// One entry of the semester drop-down, e.g. `WS 2021/22` -> `000000015088000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub label: String,
    pub id: String,
}

/// Semester collection in the portal's own order (not necessarily chronological).
///
/// Labels are unique; re-inserting a label keeps its position and replaces the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Semesters {
    entries: Vec<Semester>,
}

impl Semesters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, id: impl Into<String>) {
        let label = label.into();
        let id = id.into();
        match self.entries.iter_mut().find(|s| s.label == label) {
            Some(existing) => existing.id = id,
            None => self.entries.push(Semester { label, id }),
        }
    }

    /// Portal id for a human-readable label.
    #[must_use]
    pub fn id_for(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.id.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.label.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Semester> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Semesters {
    type Item = &'a Semester;
    type IntoIter = std::slice::Iter<'a, Semester>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<L: Into<String>, I: Into<String>> FromIterator<(L, I)> for Semesters {
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        let mut semesters = Self::new();
        for (label, id) in iter {
            semesters.insert(label, id);
        }
        semesters
    }
}
