use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::case_number::CaseReference;
use crate::citation::{CitationMatch, merge_citations};

pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// One published opinion with its metadata and statute citations.
#[derive(Debug, Clone, Serialize)]
pub struct OpinionItem {
    #[serde(rename = "datoUttalelse", serialize_with = "serialize_date")]
    pub opinion_date: NaiveDate,
    #[serde(rename = "datoPublisert", serialize_with = "serialize_date")]
    pub published_date: NaiveDate,
    #[serde(rename = "sivilombudetSaksnummer")]
    pub case_number: String,
    pub url: String,
    #[serde(rename = "tittel")]
    pub title: String,
    #[serde(rename = "beskrivelse")]
    pub description: String,
    #[serde(
        rename = "url-norske-postlister.no",
        serialize_with = "serialize_case_urls"
    )]
    pub case_references: Vec<CaseReference>,
    #[serde(rename = "uttalelse", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "tittel_lovRef", serialize_with = "serialize_citations")]
    pub title_citations: Vec<CitationMatch>,
    #[serde(rename = "beskrivelse_lovRef", serialize_with = "serialize_citations")]
    pub description_citations: Vec<CitationMatch>,
    #[serde(rename = "uttalelse_lovRef", serialize_with = "serialize_citations")]
    pub body_citations: Vec<CitationMatch>,
}

impl OpinionItem {
    /// Citations from title, description and body, unique and sorted.
    pub fn merged_citations(&self) -> Vec<String> {
        merge_citations([
            self.title_citations.as_slice(),
            self.description_citations.as_slice(),
            self.body_citations.as_slice(),
        ])
    }

    pub fn opinion_date_display(&self) -> String {
        self.opinion_date.format(DATE_FORMAT).to_string()
    }

    pub fn published_date_display(&self) -> String {
        self.published_date.format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub page_count: usize,
    pub item_count: usize,
    pub last_updated: String,
    pub source_info: String,
    pub items: Vec<OpinionItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputFile {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub base_url: String,
    pub page_count: usize,
    pub item_count: usize,
    pub details_fetched: bool,
    pub miss_words: usize,
    pub miss_total: usize,
    pub outputs: Vec<OutputFile>,
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

fn serialize_case_urls<S: Serializer>(
    references: &[CaseReference],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        references
            .iter()
            .map(|reference| (&reference.id, &reference.url)),
    )
}

fn serialize_citations<S: Serializer>(
    citations: &[CitationMatch],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(citations.iter().map(|found| &found.citation))
}
