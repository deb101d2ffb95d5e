use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;

/// Known typos in published case numbers, applied in order to the start of
/// the field.
const REPAIRS: &[(&str, &str)] = &[
    ("12/", "2012/"),
    ("209/2897", "2009/2897"),
    ("9/", "2009/"),
    ("8/", "2008/"),
    ("7/", "2007/"),
    ("20/", "2020/"),
    (
        "2024/1381, 2024/ 1817 og 2024/2588",
        "2024/1381 2024/1817 2024/2588",
    ),
];

/// Connector words and punctuation between case numbers, applied in order.
const CLEANUP: &[(&str, &str)] = &[
    ("sak ", ""),
    ("Sak ", ""),
    ("tidl.", ""),
    ("tidligere ", ""),
    (" og ", " "),
    (", ", " "),
    ("(", ""),
    (")", ""),
];

static CASE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})/([0-9]+)(-[0-9]+)?$").expect("valid case number regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReference {
    /// `year/number[-suffix]` as written.
    pub id: String,
    pub year: u16,
    pub number: String,
    pub suffix: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseNumbers {
    pub display: String,
    pub references: Vec<CaseReference>,
}

/// Splits a `Saksnummer` field into case references with cross-reference
/// URLs of the form `{base}/{year}/{number}`.
#[derive(Debug, Clone)]
pub struct CaseNumberNormalizer {
    cross_reference_base: String,
}

impl CaseNumberNormalizer {
    pub fn new(cross_reference_base: &str) -> Self {
        Self {
            cross_reference_base: cross_reference_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn normalize(&self, raw: &str) -> Result<CaseNumbers, ParseError> {
        let display = repair(raw.trim());

        let mut tokenizable = display.clone();
        for (from, to) in CLEANUP {
            tokenizable = tokenizable.replace(from, to);
        }

        let mut references: Vec<CaseReference> = Vec::new();
        for token in tokenizable.split_whitespace() {
            let reference = self.parse_token(token, raw)?;
            if references.iter().all(|existing| existing.id != reference.id) {
                references.push(reference);
            }
        }

        Ok(CaseNumbers {
            display,
            references,
        })
    }

    fn parse_token(&self, token: &str, raw: &str) -> Result<CaseReference, ParseError> {
        let malformed = || ParseError::MalformedCaseNumber {
            token: token.to_string(),
            raw: raw.to_string(),
            footer: Vec::new(),
        };

        let captures = CASE_TOKEN.captures(token).ok_or_else(malformed)?;
        let year = captures
            .get(1)
            .and_then(|year| year.as_str().parse::<u16>().ok())
            .ok_or_else(malformed)?;
        let number = captures
            .get(2)
            .map(|number| number.as_str().to_string())
            .ok_or_else(malformed)?;

        Ok(CaseReference {
            id: token.to_string(),
            year,
            url: format!("{}/{year}/{number}", self.cross_reference_base),
            number,
            suffix: captures.get(3).map(|suffix| suffix.as_str().to_string()),
        })
    }
}

fn repair(raw: &str) -> String {
    let mut repaired = raw.to_string();
    for (typo, fixed) in REPAIRS {
        if let Some(rest) = repaired.strip_prefix(typo) {
            repaired = format!("{fixed}{rest}");
        }
    }
    repaired.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://norske-postlister.no/sak/sivilombudsmannen";

    fn normalizer() -> CaseNumberNormalizer {
        CaseNumberNormalizer::new(BASE)
    }

    fn ids(numbers: &CaseNumbers) -> Vec<&str> {
        numbers
            .references
            .iter()
            .map(|reference| reference.id.as_str())
            .collect()
    }

    #[test]
    fn single_case_number_maps_to_cross_reference_url() {
        let numbers = normalizer().normalize("2019/1234").expect("valid case number");

        assert_eq!(numbers.display, "2019/1234");
        assert_eq!(numbers.references.len(), 1);
        let reference = &numbers.references[0];
        assert_eq!(reference.year, 2019);
        assert_eq!(reference.number, "1234");
        assert_eq!(reference.suffix, None);
        assert_eq!(reference.url, format!("{BASE}/2019/1234"));
    }

    #[test]
    fn normalizing_display_again_is_stable() {
        let first = normalizer().normalize("2019/1234").expect("valid case number");
        let second = normalizer()
            .normalize(&first.display)
            .expect("display should normalize again");

        assert_eq!(first.references, second.references);
    }

    #[test]
    fn two_digit_years_are_repaired() {
        let numbers = normalizer().normalize("12/345").expect("repairable case number");

        assert_eq!(numbers.display, "2012/345");
        assert_eq!(numbers.references[0].year, 2012);
        assert_eq!(numbers.references[0].number, "345");

        let numbers = normalizer().normalize("209/2897").expect("repairable case number");
        assert_eq!(ids(&numbers), vec!["2009/2897"]);

        let numbers = normalizer().normalize("20/5000").expect("repairable case number");
        assert_eq!(ids(&numbers), vec!["2020/5000"]);
    }

    #[test]
    fn repairs_only_apply_at_the_start() {
        let numbers = normalizer()
            .normalize("2012/345 og 2013/12")
            .expect("valid case numbers");

        assert_eq!(ids(&numbers), vec!["2012/345", "2013/12"]);
    }

    #[test]
    fn malformed_multi_case_field_is_repaired() {
        let numbers = normalizer()
            .normalize("2024/1381, 2024/ 1817 og 2024/2588")
            .expect("repairable case numbers");

        assert_eq!(ids(&numbers), vec!["2024/1381", "2024/1817", "2024/2588"]);
    }

    #[test]
    fn connector_words_and_parentheses_are_stripped() {
        let numbers = normalizer()
            .normalize("2018/12 (tidl. sak 2017/99), Sak 2019/1-2 og tidligere 2016/7")
            .expect("valid case numbers");

        assert_eq!(
            ids(&numbers),
            vec!["2018/12", "2017/99", "2019/1-2", "2016/7"]
        );
        assert_eq!(numbers.references[2].suffix.as_deref(), Some("-2"));
        assert_eq!(numbers.references[2].url, format!("{BASE}/2019/1"));
    }

    #[test]
    fn repeated_case_numbers_collapse() {
        let numbers = normalizer()
            .normalize("2019/1 og 2019/1")
            .expect("valid case numbers");

        assert_eq!(ids(&numbers), vec!["2019/1"]);
    }

    #[test]
    fn malformed_token_is_a_parse_error() {
        let error = normalizer()
            .normalize("2019/1 og 2019-2")
            .expect_err("malformed token should fail");

        match error {
            ParseError::MalformedCaseNumber { token, raw, .. } => {
                assert_eq!(token, "2019-2");
                assert_eq!(raw, "2019/1 og 2019-2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let numbers = CaseNumberNormalizer::new("https://example.org/sak/")
            .normalize("2021/77")
            .expect("valid case number");

        assert_eq!(numbers.references[0].url, "https://example.org/sak/2021/77");
    }
}
