//! Exam table on a module's result details page
//!
//! The table groups attempts under heading rows:
//!
//! ```text
//! <tr><td class="level02" colspan="8">Klausur (100%)</td></tr>
//! <tr><td class="tbdata">SoSe 2022</td><td class="tbdata">Klausur</td>...6 cells...</tr>
//! ```
//!
//! A heading applies to every following data row until the next heading.

use scraper::Html;
use tracing::debug;

use super::normalize::parse_grade;
use super::table::{NamedSelector, ShapeReport, TableRow, TableWalker};
use super::{PageParser, ParsedTable, ParsingResult};
use crate::domain::Exam;

const HEADING_CLASS: &str = "level02";
const DATA_CLASS: &str = "tbdata";
const EXAM_ROW_CELLS: usize = 6;

enum ExamRow {
    Heading(String),
    Attempt(Exam),
    Other,
}

#[derive(Debug)]
pub struct ExamParser {
    walker: TableWalker,
    table: NamedSelector,
}

impl ExamParser {
    pub fn new(table_css: &str) -> ParsingResult<Self> {
        Ok(Self {
            walker: TableWalker::new()?,
            table: NamedSelector::new(table_css)?,
        })
    }

    fn classify(row: &TableRow, heading: Option<&str>) -> ExamRow {
        match row.cells.as_slice() {
            [only] if only.has_class(HEADING_CLASS) => ExamRow::Heading(only.text.clone()),
            cells
                if cells.len() == EXAM_ROW_CELLS
                    && cells.iter().all(|c| c.has_class(DATA_CLASS)) =>
            {
                ExamRow::Attempt(Exam {
                    name: heading.map(str::to_string),
                    semester: cells[0].text.clone(),
                    description: cells[1].text.clone(),
                    grade: parse_grade(&cells[3].text),
                })
            }
            _ => ExamRow::Other,
        }
    }
}

impl PageParser for ExamParser {
    type Output = ParsedTable<Exam>;

    fn parse_document(&self, html: &Html) -> ParsingResult<Self::Output> {
        let table = self.walker.find_table(html, &self.table, "result details")?;
        let mut report = ShapeReport::new("exam table");
        let mut records = Vec::new();
        // scoped to this pass; a new table starts without a heading
        let mut heading: Option<String> = None;

        for row in self.walker.rows(table) {
            match Self::classify(&row, heading.as_deref()) {
                ExamRow::Heading(text) => heading = Some(text),
                ExamRow::Attempt(exam) => records.push(exam),
                // data-sized row without the data markup
                ExamRow::Other if row.arity() == EXAM_ROW_CELLS => report.skip(&row),
                // header, sub-header, spacer and summary rows
                ExamRow::Other => {}
            }
        }

        debug!("Parsed {} exams", records.len());
        Ok(ParsedTable {
            records,
            skipped_rows: report.finish(),
        })
    }
}
