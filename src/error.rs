use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server did not respond with 200 OK: {url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("404 Not Found and no cached copy: {url}")]
    NotFoundWithoutCache { url: String },

    #[error("empty response from {url}")]
    EmptyBody { url: String },

    #[error("cache file {path}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing expected element `{selector}` in {context}")]
    MissingElement {
        selector: &'static str,
        context: String,
    },

    #[error("unrecognized footer field `{field}` (footer: {footer:?})")]
    UnrecognizedFooterField { field: String, footer: Vec<String> },

    #[error("missing required footer field `{field}` (footer: {footer:?})")]
    MissingRequiredField {
        field: &'static str,
        footer: Vec<String>,
    },

    #[error("malformed case number `{token}` in `{raw}` (footer: {footer:?})")]
    MalformedCaseNumber {
        token: String,
        raw: String,
        footer: Vec<String>,
    },

    #[error("invalid date `{value}` in footer field `{field}`")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid page count `{value}`")]
    InvalidPageCount { value: String },
}

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("statute entry #{index} has no aliases")]
    EmptyAliasSet { index: usize },

    #[error("statute entry #{index} lists alias `{alias}` more than once")]
    DuplicateAlias { index: usize, alias: String },

    #[error("alias `{alias}` is not lowercase")]
    AliasNotLowercase { alias: String },

    #[error("failed to compile citation pattern for `{alias}`: {source}")]
    Pattern {
        alias: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("too few items found: {found} (minimum {minimum})")]
    SanityCheck { found: usize, minimum: usize },
}
