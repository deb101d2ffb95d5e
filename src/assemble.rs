use chrono::NaiveDate;
use tracing::error;

use crate::case_number::{CaseNumberNormalizer, CaseNumbers};
use crate::citation::{Grammar, MissCounter, extract_citations};
use crate::error::ParseError;
use crate::model::{DATE_FORMAT, OpinionItem};

const OPINION_DATE: &str = "Dato for uttalelse: ";
const CASE_NUMBER: &str = "Saksnummer: ";
const PUBLISHED: &str = "Publisert: ";

/// Label lines rendered without a value; carry nothing.
const LABEL_ONLY: &[&str] = &["Dato for uttalelse:", "Saksnummer:"];

/// Builds an [`OpinionItem`] from the scraped pieces of one opinion.
pub struct ItemAssembler<'a> {
    grammar: &'a Grammar,
    case_numbers: &'a CaseNumberNormalizer,
}

impl<'a> ItemAssembler<'a> {
    pub fn new(grammar: &'a Grammar, case_numbers: &'a CaseNumberNormalizer) -> Self {
        Self {
            grammar,
            case_numbers,
        }
    }

    pub fn assemble(
        &self,
        footer_lines: &[String],
        title: &str,
        description: &str,
        body: Option<&str>,
        url: &str,
        misses: &mut MissCounter,
    ) -> Result<OpinionItem, ParseError> {
        let footer = self.parse_footer(footer_lines).inspect_err(|err| {
            error!(url = %url, footer = ?footer_lines, error = %err, "failed to parse footer");
        })?;

        Ok(OpinionItem {
            opinion_date: footer.opinion_date,
            published_date: footer.published_date,
            case_number: footer.case_numbers.display,
            url: url.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            case_references: footer.case_numbers.references,
            body: body.map(ToOwned::to_owned),
            title_citations: extract_citations(title, self.grammar, misses),
            description_citations: extract_citations(description, self.grammar, misses),
            body_citations: body
                .map(|body| extract_citations(body, self.grammar, misses))
                .unwrap_or_default(),
        })
    }

    fn parse_footer(&self, footer_lines: &[String]) -> Result<Footer, ParseError> {
        let mut opinion_date = None;
        let mut published_date = None;
        let mut case_numbers = None;

        for line in footer_lines {
            if let Some(value) = line.strip_prefix(OPINION_DATE) {
                opinion_date = Some(parse_date("Dato for uttalelse", value)?);
            } else if let Some(value) = line.strip_prefix(CASE_NUMBER) {
                let parsed = self
                    .case_numbers
                    .normalize(value)
                    .map_err(|err| with_footer(err, footer_lines))?;
                case_numbers = Some(parsed);
            } else if let Some(value) = line.strip_prefix(PUBLISHED) {
                published_date = Some(parse_date("Publisert", value)?);
            } else if LABEL_ONLY.contains(&line.as_str()) {
                continue;
            } else {
                return Err(ParseError::UnrecognizedFooterField {
                    field: line.clone(),
                    footer: footer_lines.to_vec(),
                });
            }
        }

        let missing = |field| ParseError::MissingRequiredField {
            field,
            footer: footer_lines.to_vec(),
        };

        Ok(Footer {
            opinion_date: opinion_date.ok_or_else(|| missing("Dato for uttalelse"))?,
            published_date: published_date.ok_or_else(|| missing("Publisert"))?,
            case_numbers: case_numbers.ok_or_else(|| missing("Saksnummer"))?,
        })
    }
}

struct Footer {
    opinion_date: NaiveDate,
    published_date: NaiveDate,
    case_numbers: CaseNumbers,
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ParseError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn with_footer(err: ParseError, footer_lines: &[String]) -> ParseError {
    match err {
        ParseError::MalformedCaseNumber { token, raw, .. } => ParseError::MalformedCaseNumber {
            token,
            raw,
            footer: footer_lines.to_vec(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::default_statutes;

    fn footer(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    fn assemble(
        footer_lines: &[String],
        body: Option<&str>,
        misses: &mut MissCounter,
    ) -> Result<OpinionItem, ParseError> {
        let grammar = Grammar::new(default_statutes()).expect("default grammar");
        let normalizer = CaseNumberNormalizer::new("https://norske-postlister.no/sak/sivilombudsmannen");
        ItemAssembler::new(&grammar, &normalizer).assemble(
            footer_lines,
            "Innsyn etter offentleglova § 13",
            "Spørsmål om forvaltningsloven § 11",
            body,
            "https://www.sivilombudet.no/uttalelser/innsyn/",
            misses,
        )
    }

    #[test]
    fn assembles_complete_item() {
        let mut misses = MissCounter::new();
        let lines = footer(&[
            "Dato for uttalelse: 1.3.2021",
            "Saksnummer: 2020/1234 og 2020/1235",
            "Publisert: 15.03.2021",
        ]);

        let item = assemble(
            &lines,
            Some("Etter offentleglova § 13 første ledd og tvisteloven § 2."),
            &mut misses,
        )
        .expect("item should assemble");

        assert_eq!(item.opinion_date_display(), "01.03.2021");
        assert_eq!(item.published_date_display(), "15.03.2021");
        assert_eq!(item.case_number, "2020/1234 og 2020/1235");
        assert_eq!(item.case_references.len(), 2);
        assert_eq!(
            item.case_references[1].url,
            "https://norske-postlister.no/sak/sivilombudsmannen/2020/1235"
        );
        assert_eq!(item.title_citations[0].citation, "offentleglova § 13");
        assert_eq!(
            item.description_citations[0].citation,
            "forvaltningsloven § 11"
        );
        assert_eq!(
            item.body_citations[0].citation,
            "offentleglova § 13 første ledd"
        );
        assert_eq!(
            item.merged_citations(),
            vec![
                "forvaltningsloven § 11",
                "offentleglova § 13",
                "offentleglova § 13 første ledd"
            ]
        );
        assert_eq!(misses.count("tvisteloven"), 1);
    }

    #[test]
    fn label_only_lines_are_ignored() {
        let mut misses = MissCounter::new();
        let lines = footer(&[
            "Dato for uttalelse:",
            "Dato for uttalelse: 12.03.2021",
            "Saksnummer:",
            "Saksnummer: 12/345",
            "Publisert: 01.04.2021",
        ]);

        let item = assemble(&lines, None, &mut misses).expect("item should assemble");

        assert_eq!(item.case_number, "2012/345");
        assert!(item.body.is_none());
        assert!(item.body_citations.is_empty());
    }

    #[test]
    fn missing_case_number_is_an_error() {
        let mut misses = MissCounter::new();
        let lines = footer(&["Dato for uttalelse: 12.03.2021", "Publisert: 01.04.2021"]);

        let error = assemble(&lines, None, &mut misses).expect_err("case number is required");

        assert!(matches!(
            error,
            ParseError::MissingRequiredField {
                field: "Saksnummer",
                ..
            }
        ));
    }

    #[test]
    fn unknown_footer_field_is_an_error() {
        let mut misses = MissCounter::new();
        let lines = footer(&[
            "Dato for uttalelse: 12.03.2021",
            "Saksnummer: 2021/1",
            "Kategori: Innsyn",
        ]);

        let error = assemble(&lines, None, &mut misses).expect_err("unknown field should fail");

        match error {
            ParseError::UnrecognizedFooterField { field, footer } => {
                assert_eq!(field, "Kategori: Innsyn");
                assert_eq!(footer.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_calendar_date_is_an_error() {
        let mut misses = MissCounter::new();
        let lines = footer(&[
            "Dato for uttalelse: 31.02.2021",
            "Saksnummer: 2021/1",
            "Publisert: 01.04.2021",
        ]);

        let error = assemble(&lines, None, &mut misses).expect_err("invalid date should fail");

        assert!(matches!(error, ParseError::InvalidDate { .. }));
    }

    #[test]
    fn malformed_case_number_carries_footer_context() {
        let mut misses = MissCounter::new();
        let lines = footer(&[
            "Dato for uttalelse: 12.03.2021",
            "Saksnummer: 2021-1",
            "Publisert: 01.04.2021",
        ]);

        let error = assemble(&lines, None, &mut misses).expect_err("malformed case number");

        match error {
            ParseError::MalformedCaseNumber { token, footer, .. } => {
                assert_eq!(token, "2021-1");
                assert_eq!(footer, lines);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
