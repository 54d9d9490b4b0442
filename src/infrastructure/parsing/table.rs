//! Generic HTML table walking
//!
//! Turns `<tr>`/`<td>` markup into owned [`TableRow`]s. Rows are produced
//! lazily and may have any number of cells: the portal mixes spacer rows,
//! heading rows and data rows in one table, so interpreting a row is left to
//! the caller, who checks arity first and records misfits in a
//! [`ShapeReport`].

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::{ParsingError, ParsingResult};

/// Compiles a CSS selector, keeping the selector text in the error
pub fn compile_selector(css: &str) -> ParsingResult<Selector> {
    Selector::parse(css).map_err(|e| ParsingError::invalid_selector(css, e))
}

/// A compiled selector together with its source text for error messages
#[derive(Debug, Clone)]
pub struct NamedSelector {
    pub css: String,
    pub selector: Selector,
}

impl NamedSelector {
    pub fn new(css: &str) -> ParsingResult<Self> {
        Ok(Self {
            css: css.to_string(),
            selector: compile_selector(css)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Text content with surrounding whitespace (including `&nbsp;`) removed
    pub text: String,
    pub classes: Vec<String>,
    /// `href` of the first link inside the cell
    pub link: Option<String>,
}

impl TableCell {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Position of the row within its table, header row included
    pub index: usize,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    #[must_use]
    pub fn arity(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn text(&self, cell: usize) -> Option<&str> {
        self.cells.get(cell).map(|c| c.text.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Row and cell selectors shared by every table on the portal
#[derive(Debug, Clone)]
pub struct TableWalker {
    row: Selector,
    cell: Selector,
    link: Selector,
}

impl TableWalker {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            row: compile_selector("tr")?,
            cell: compile_selector("td")?,
            link: compile_selector("a")?,
        })
    }

    /// First table matching `table`; `page` names the page in the error.
    pub fn find_table<'a>(
        &self,
        document: &'a Html,
        table: &NamedSelector,
        page: &str,
    ) -> ParsingResult<ElementRef<'a>> {
        document
            .select(&table.selector)
            .next()
            .ok_or_else(|| ParsingError::table_not_found(&table.css, page))
    }

    /// Every row of the table, header included
    pub fn rows<'a>(&'a self, table: ElementRef<'a>) -> impl Iterator<Item = TableRow> + 'a {
        table
            .select(&self.row)
            .enumerate()
            .map(move |(index, row)| TableRow {
                index,
                cells: row.select(&self.cell).map(|cell| self.cell(cell)).collect(),
            })
    }

    /// Every row after the header row
    pub fn body_rows<'a>(&'a self, table: ElementRef<'a>) -> impl Iterator<Item = TableRow> + 'a {
        self.rows(table).skip(1)
    }

    fn cell(&self, cell: ElementRef<'_>) -> TableCell {
        TableCell {
            text: element_text(cell),
            classes: cell.value().classes().map(str::to_string).collect(),
            link: cell
                .select(&self.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string),
        }
    }
}

/// Concatenated, trimmed text content of an element
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Tally of rows a mapper could not interpret
///
/// Misfits are expected on this portal, so they are counted and logged once
/// per table instead of failing the page.
#[derive(Debug)]
pub struct ShapeReport {
    context: String,
    skipped: usize,
    arities: Vec<usize>,
}

impl ShapeReport {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            skipped: 0,
            arities: Vec::new(),
        }
    }

    pub fn skip(&mut self, row: &TableRow) {
        self.skipped += 1;
        if !self.arities.contains(&row.arity()) {
            self.arities.push(row.arity());
        }
    }

    /// Logs the tally if anything was skipped and returns the count.
    pub fn finish(self) -> usize {
        if self.skipped > 0 {
            warn!(
                "Skipped {} row(s) with unexpected shape in {} (cell counts seen: {:?})",
                self.skipped, self.context, self.arities
            );
        }
        self.skipped
    }
}
