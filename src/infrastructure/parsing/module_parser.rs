//! Module rows of the per-semester course results table
//!
//! Data rows have exactly six cells:
//!
//! | 0 | 1 | 2 | 3 | 4 | 5 |
//! |---|---|---|---|---|---|
//! | number | name | final grade | status | link to exam details | (unused) |

use scraper::Html;
use tracing::debug;

use super::normalize::parse_grade;
use super::table::{NamedSelector, ShapeReport, TableRow, TableWalker};
use super::{ContextualParser, ParsedTable, ParsingResult};
use crate::domain::Module;

const MODULE_ROW_CELLS: usize = 6;

#[derive(Debug)]
pub struct ModuleListParser {
    walker: TableWalker,
    table: NamedSelector,
}

impl ModuleListParser {
    pub fn new(table_css: &str) -> ParsingResult<Self> {
        Ok(Self {
            walker: TableWalker::new()?,
            table: NamedSelector::new(table_css)?,
        })
    }

    fn module_from_row(row: &TableRow, semester: &str) -> Option<Module> {
        if row.arity() != MODULE_ROW_CELLS {
            return None;
        }
        let id = row.cells[4].link.as_deref().and_then(detail_id_from_href)?;

        Some(Module {
            num: row.text(0)?.to_string(),
            name: row.text(1)?.to_string(),
            credits: Module::UNKNOWN_CREDITS,
            status: row.text(3)?.to_string(),
            semesters: vec![semester.to_string()],
            id: id.to_string(),
            grade: parse_grade(row.text(2)?),
        })
    }
}

impl ContextualParser for ModuleListParser {
    type Output = ParsedTable<Module>;
    /// Label of the semester the page was requested for
    type Context = str;

    fn parse_with_context(&self, html: &Html, semester: &str) -> ParsingResult<Self::Output> {
        let table = self.walker.find_table(html, &self.table, "course results")?;
        let mut report = ShapeReport::new(format!("module table for {semester}"));
        let mut records = Vec::new();

        for row in self.walker.body_rows(table) {
            // blank spacer rows are part of the layout
            if row.is_empty() {
                continue;
            }
            match Self::module_from_row(&row, semester) {
                Some(module) => records.push(module),
                None => report.skip(&row),
            }
        }

        debug!("Parsed {} modules for {}", records.len(), semester);
        Ok(ParsedTable {
            records,
            skipped_rows: report.finish(),
        })
    }
}

/// Detail id from a results link: the second-to-last `,-N` argument.
///
/// `...&ARGUMENTS=-N954433323189667,-N000307,-N377662437613542,-N0` -> `377662437613542`
#[must_use]
pub fn detail_id_from_href(href: &str) -> Option<&str> {
    let segments: Vec<&str> = href.split(",-N").collect();
    if segments.len() < 3 {
        return None;
    }
    Some(segments[segments.len() - 2]).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RESULTS: &str = r##"
        <table class="nb list">
          <thead><tr><th>Nr.</th><th>Name</th><th>Endnote</th><th>Status</th><th></th><th></th></tr></thead>
          <tbody>
          <tr>
            <td class="tbdata">T3INF1001</td>
            <td class="tbdata"><a href="#">Mathematik I</a></td>
            <td class="tbdata_numeric">1,3</td>
            <td class="tbdata">bestanden</td>
            <td class="tbdata"><a href="/scripts/mgrqispi.dll?APPNAME=CampusNet&amp;PRGNAME=RESULTDETAILS&amp;ARGUMENTS=-N954433323189667,-N000307,-N377662437613542,-N0">Prüfungen</a></td>
            <td class="tbdata"></td>
          </tr>
          <tr>
            <td class="tbdata">T3INF1002</td>
            <td class="tbdata">Theoretische Informatik I</td>
            <td class="tbdata_numeric">noch nicht gesetzt</td>
            <td class="tbdata"></td>
            <td class="tbdata"><a href="/scripts/mgrqispi.dll?APPNAME=CampusNet&amp;PRGNAME=RESULTDETAILS&amp;ARGUMENTS=-N954433323189667,-N000307,-N377662437613999,-N0">Prüfungen</a></td>
            <td class="tbdata"></td>
          </tr>
          <tr><td class="level00" colspan="2">Semester-GPA</td><td>1,3</td></tr>
          <tr></tr>
          </tbody>
        </table>"##;

    fn parse(html: &str) -> ParsingResult<ParsedTable<Module>> {
        ModuleListParser::new("table.nb.list")
            .unwrap()
            .parse_with_context(&Html::parse_document(html), "SoSe 2022")
    }

    #[test]
    fn test_maps_six_cell_rows_positionally() {
        let parsed = parse(RESULTS).unwrap();

        assert_eq!(parsed.records.len(), 2);
        let first = &parsed.records[0];
        assert_eq!(first.num, "T3INF1001");
        assert_eq!(first.name, "Mathematik I");
        assert_eq!(first.grade, Some(1.3));
        assert_eq!(first.status, "bestanden");
        assert_eq!(first.id, "377662437613542");
        assert_eq!(first.semesters, vec!["SoSe 2022".to_string()]);
        assert_eq!(first.credits, Module::UNKNOWN_CREDITS);

        let second = &parsed.records[1];
        assert_eq!(second.grade, None);
        assert_eq!(second.status, "");
    }

    #[test]
    fn test_odd_rows_are_skipped_and_counted() {
        let parsed = parse(RESULTS).unwrap();
        // the GPA summary row; the empty row is layout and not counted
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn test_page_without_results_table_fails() {
        assert!(parse("<p>Sitzung abgelaufen</p>").is_err());
    }

    #[rstest]
    #[case("/x?ARGUMENTS=-N954433323189667,-N000307,-N377662437613542,-N0", Some("377662437613542"))]
    #[case("/x?ARGUMENTS=-N1,-N2,-N3", Some("2"))]
    #[case("/x?ARGUMENTS=-N1,-N2", None)]
    #[case("#", None)]
    #[case("/x?ARGUMENTS=-N1,-N,-N3", None)]
    fn test_detail_ids(#[case] href: &str, #[case] expected: Option<&str>) {
        assert_eq!(detail_id_from_href(href), expected);
    }
}
