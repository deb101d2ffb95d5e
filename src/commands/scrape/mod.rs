use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use tracing::{info, warn};

use crate::assemble::ItemAssembler;
use crate::case_number::CaseNumberNormalizer;
use crate::citation::{Grammar, MissCounter, default_statutes};
use crate::cli::ScrapeArgs;
use crate::crawl::{parse_detail, parse_listing};
use crate::error::ScrapeError;
use crate::fetch::{Fetcher, cache_key_for_page, cache_key_for_url};
use crate::model::{Dataset, OpinionItem, OutputFile, RunManifest};
use crate::util::{
    escape_html, now_utc_string, sha256_file, utc_compact_string, write_json_pretty, write_text,
};

const DATASET_JSON: &str = "sivilombudet-uttalelser.json";
const DATASET_CSV: &str = "sivilombudet-uttalelser.csv";
const INDEX_HTML: &str = "index.html";
const RUN_MANIFEST: &str = "run_manifest.json";

/// Who built the dataset and where it came from.
pub(super) struct Provenance {
    pub base_url: String,
    pub dataset_home: String,
    pub publisher: String,
}

impl Provenance {
    fn source_info(&self) -> String {
        format!(
            "Datasett hentet fra {}, laget av {}. Kilde: {}",
            self.dataset_home, self.publisher, self.base_url
        )
    }
}

mod output;
mod run;
#[cfg(test)]
mod tests;

pub use run::run;

use output::*;
use run::*;
