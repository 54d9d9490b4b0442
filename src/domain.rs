//! Domain module - typed records scraped from the portal
//!
//! Plain data types with no knowledge of HTTP or HTML. Everything the
//! client hands back to callers lives here.

pub mod constants;
pub mod document;
pub mod exam;
pub mod module;
pub mod semester;
pub mod session;

pub use document::Document;
pub use exam::Exam;
pub use module::Module;
pub use semester::{Semester, Semesters};
pub use session::SessionId;
