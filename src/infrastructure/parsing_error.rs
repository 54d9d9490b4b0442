//! Parsing error types for portal HTML pages
//!
//! Only structural problems that make a whole page unusable are errors.
//! Row-level shape mismatches and unparseable grades or dates are absorbed
//! by the mappers and never reach this type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No table matching '{selector}' on {page} page")]
    TableNotFound { selector: String, page: String },
}

impl ParsingError {
    pub fn invalid_selector(selector: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn table_not_found(selector: &str, page: &str) -> Self {
        Self::TableNotFound {
            selector: selector.to_string(),
            page: page.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
