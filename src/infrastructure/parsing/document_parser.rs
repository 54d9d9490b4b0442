//! Document listing (`CREATEDOCUMENT`)
//!
//! Each row after the header: name, date (`dd.mm.yy`), time (`HH:MM`), ...

use scraper::Html;
use tracing::debug;

use super::normalize::parse_timestamp;
use super::table::{NamedSelector, ShapeReport, TableWalker};
use super::{PageParser, ParsedTable, ParsingResult};
use crate::domain::Document;

#[derive(Debug)]
pub struct DocumentParser {
    walker: TableWalker,
    table: NamedSelector,
}

impl DocumentParser {
    pub fn new(table_css: &str) -> ParsingResult<Self> {
        Ok(Self {
            walker: TableWalker::new()?,
            table: NamedSelector::new(table_css)?,
        })
    }
}

impl PageParser for DocumentParser {
    type Output = ParsedTable<Document>;

    fn parse_document(&self, html: &Html) -> ParsingResult<Self::Output> {
        let table = self.walker.find_table(html, &self.table, "documents")?;
        let mut report = ShapeReport::new("document table");
        let mut records = Vec::new();

        for row in self.walker.body_rows(table) {
            let (Some(name), Some(date), Some(time)) = (row.text(0), row.text(1), row.text(2)) else {
                report.skip(&row);
                continue;
            };
            records.push(Document {
                name: name.to_string(),
                date_time: parse_timestamp(date, time),
            });
        }

        debug!("Parsed {} documents", records.len());
        Ok(ParsedTable {
            records,
            skipped_rows: report.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const LISTING: &str = r#"
        <table class="tb">
          <tr><td class="tbsubhead">Name</td><td class="tbsubhead">Datum</td><td class="tbsubhead">Uhrzeit</td><td class="tbsubhead">Status</td></tr>
          <tr><td class="tbdata">Notenbescheinigung</td><td class="tbdata">30.06.22</td><td class="tbdata">14:05</td><td class="tbdata">erstellt</td></tr>
          <tr><td class="tbdata">Immatrikulationsbescheinigung SoSe 2022</td><td class="tbdata">unbekannt</td><td class="tbdata"></td><td class="tbdata"></td></tr>
          <tr><td class="tbdata" colspan="4">Keine weiteren Dokumente</td></tr>
        </table>"#;

    #[test]
    fn test_maps_rows_in_table_order() {
        let parsed = DocumentParser::new("table.tb").unwrap().parse(LISTING).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].name, "Notenbescheinigung");
        assert_eq!(
            parsed.records[0].date_time,
            NaiveDate::from_ymd_opt(2022, 6, 30).and_then(|d| d.and_hms_opt(14, 5, 0))
        );
        assert_eq!(parsed.records[1].name, "Immatrikulationsbescheinigung SoSe 2022");
        assert_eq!(parsed.records[1].date_time, None);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let parsed = DocumentParser::new("table.tb").unwrap().parse(LISTING).unwrap();
        assert_eq!(parsed.skipped_rows, 1);
    }
}
