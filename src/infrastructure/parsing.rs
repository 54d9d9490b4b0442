//! HTML parsing for CampusNet pages
//!
//! Two layers:
//! - [`table`]: generic row/cell walking, tolerant of ragged tables
//! - record mappers ([`SemesterParser`], [`ModuleListParser`], [`ExamParser`],
//!   [`DocumentParser`]) that know this portal's page layouts
//!
//! Parsers are synchronous and own the parsed [`Html`] only for the duration
//! of one call, so no DOM is ever held across an `.await`.

pub mod document_parser;
pub mod exam_parser;
pub mod module_parser;
pub mod normalize;
pub mod semester_parser;
pub mod table;

pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
pub use document_parser::DocumentParser;
pub use exam_parser::ExamParser;
pub use module_parser::ModuleListParser;
pub use semester_parser::SemesterParser;

use scraper::Html;

use crate::infrastructure::config::PageSelectors;

/// Parser for a whole page
pub trait PageParser {
    type Output;

    fn parse_document(&self, html: &Html) -> ParsingResult<Self::Output>;

    fn parse(&self, html: &str) -> ParsingResult<Self::Output> {
        self.parse_document(&Html::parse_document(html))
    }
}

/// Parser whose output depends on how the page was requested
pub trait ContextualParser {
    type Output;
    type Context: ?Sized;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;

    fn parse_str(&self, html: &str, context: &Self::Context) -> ParsingResult<Self::Output> {
        self.parse_with_context(&Html::parse_document(html), context)
    }
}

/// Records mapped from one table plus the number of rows that didn't fit
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable<T> {
    pub records: Vec<T>,
    pub skipped_rows: usize,
}

/// All page parsers, compiled once from the configured selectors
#[derive(Debug)]
pub struct PortalPages {
    pub semesters: SemesterParser,
    pub modules: ModuleListParser,
    pub exams: ExamParser,
    pub documents: DocumentParser,
}

impl PortalPages {
    pub fn new(selectors: &PageSelectors) -> ParsingResult<Self> {
        Ok(Self {
            semesters: SemesterParser::new(&selectors.semester_option)?,
            modules: ModuleListParser::new(&selectors.module_table)?,
            exams: ExamParser::new(&selectors.exam_table)?,
            documents: DocumentParser::new(&selectors.document_table)?,
        })
    }
}
