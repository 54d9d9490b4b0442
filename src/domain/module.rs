//! Module (course) records from the result overview

use serde::{Deserialize, Serialize};

/// A module as listed on the course results page.
///
/// `num` is assigned by the portal and stable across semesters, so it is the
/// identity of the record. `semesters` accumulates every semester query the
/// module showed up in, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub num: String,
    pub name: String,
    /// Not present on the results page; [`Module::UNKNOWN_CREDITS`] until known.
    pub credits: f64,
    pub status: String,
    pub semesters: Vec<String>,
    /// Portal-internal id used to request the exam details page.
    pub id: String,
    pub grade: Option<f64>,
}

impl Module {
    pub const UNKNOWN_CREDITS: f64 = 0.0;

    /// Records that this module also appeared under `semester`.
    ///
    /// Returns `false` when the label was already recorded.
    pub fn add_semester(&mut self, semester: &str) -> bool {
        if self.semesters.iter().any(|s| s == semester) {
            return false;
        }
        self.semesters.push(semester.to_string());
        true
    }
}
