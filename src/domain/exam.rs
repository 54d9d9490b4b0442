use serde::{Deserialize, Serialize};

/// Single exam attempt listed on a module's detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    /// Nearest preceding group heading of the table, if any.
    pub name: Option<String>,
    pub semester: String,
    pub description: String,
    pub grade: Option<f64>,
}
