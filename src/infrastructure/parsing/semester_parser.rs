//! Semester drop-down on the course results page

use scraper::Html;
use tracing::debug;

use super::PageParser;
use super::table::{NamedSelector, element_text};
use crate::domain::Semesters;

/// Reads every `<option>` as `label -> value`
#[derive(Debug)]
pub struct SemesterParser {
    option: NamedSelector,
}

impl SemesterParser {
    pub fn new(option_css: &str) -> super::ParsingResult<Self> {
        Ok(Self {
            option: NamedSelector::new(option_css)?,
        })
    }
}

impl PageParser for SemesterParser {
    type Output = Semesters;

    fn parse_document(&self, html: &Html) -> super::ParsingResult<Semesters> {
        let semesters: Semesters = html
            .select(&self.option.selector)
            .map(|option| {
                let id = option.value().attr("value").unwrap_or_default().to_string();
                (element_text(option), id)
            })
            .collect();

        debug!("Found {} semesters", semesters.len());
        Ok(semesters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_option_text_to_value() {
        let html = r#"
            <form><select id="semester" name="semester" onchange="reloadpage.submitForm(this.form.name);">
              <option value="000000015098000" selected="selected">SoSe 2022</option>
              <option value="000000015088000">WiSe 2021/22</option>
            </select></form>"#;

        let semesters = SemesterParser::new("option").unwrap().parse(html).unwrap();

        assert_eq!(semesters.len(), 2);
        assert_eq!(semesters.id_for("SoSe 2022"), Some("000000015098000"));
        assert_eq!(semesters.id_for("WiSe 2021/22"), Some("000000015088000"));
        assert_eq!(
            semesters.labels().collect::<Vec<_>>(),
            vec!["SoSe 2022", "WiSe 2021/22"]
        );
    }

    #[test]
    fn test_page_without_options_yields_empty_mapping() {
        let semesters = SemesterParser::new("option")
            .unwrap()
            .parse("<html><body></body></html>")
            .unwrap();
        assert!(semesters.is_empty());
    }
}
