use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Entry of the document listing (certificates, transcripts, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    /// Portal-local time; `None` when the listing's date/time cells don't parse.
    pub date_time: Option<NaiveDateTime>,
}
