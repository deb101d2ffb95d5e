use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "uttalelser",
    version,
    about = "Scraper and statute citation extractor for Sivilombudet opinions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every listing page and write the JSON, CSV and HTML outputs.
    Scrape(ScrapeArgs),
    /// Run the citation extractor on a piece of text.
    Extract(ExtractArgs),
    /// Show the statute table and any alias conflicts.
    Grammar(GrammarArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    #[arg(long, default_value = "https://www.sivilombudet.no/uttalelser/")]
    pub base_url: String,

    #[arg(long, default_value = "cache")]
    pub cache_dir: PathBuf,

    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Cached pages younger than this are not fetched again.
    #[arg(long, default_value_t = 60 * 60 * 24 * 4)]
    pub cache_ttl_secs: u64,

    #[arg(long, default_value_t = 200)]
    pub timeout_secs: u64,

    /// Refuse to write outputs when fewer items were scraped.
    #[arg(long, default_value_t = 1000)]
    pub min_items: usize,

    /// Minimum count for a word to appear in the unmatched-§ report.
    #[arg(long, default_value_t = 100)]
    pub miss_report_threshold: usize,

    #[arg(
        long,
        default_value = "https://norske-postlister.no/sak/sivilombudsmannen"
    )]
    pub cross_reference_base: String,

    /// Where the generated dataset is published; named in the provenance lines.
    #[arg(long, default_value = "https://hnygard.github.io/sivilombudet-uttalelser/")]
    pub dataset_home: String,

    #[arg(long, default_value = "@hallny / Norske-postlister.no")]
    pub publisher: String,

    /// Only read listing pages; no opinion body or body citations.
    #[arg(long, default_value_t = false)]
    pub skip_details: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,

    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GrammarArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
