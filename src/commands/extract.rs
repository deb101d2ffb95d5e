use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::citation::{CitationMatch, Grammar, MissCounter, default_statutes, extract_citations};
use crate::cli::ExtractArgs;

#[derive(Debug, Serialize)]
struct MissWord {
    word: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ExtractResponse {
    returned: usize,
    citations: Vec<CitationMatch>,
    misses: Vec<MissWord>,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };

    let grammar = Grammar::new(default_statutes()).context("failed to compile statute grammar")?;
    let mut misses = MissCounter::new();
    let citations = extract_citations(&text, &grammar, &mut misses);
    info!(
        citations = citations.len(),
        unmatched = misses.total(),
        "extracted citations"
    );

    if args.json {
        write_json_response(citations, &misses)
    } else {
        write_text_response(&citations, &misses)
    }
}

fn write_json_response(citations: Vec<CitationMatch>, misses: &MissCounter) -> Result<()> {
    let response = ExtractResponse {
        returned: citations.len(),
        citations,
        misses: misses
            .report(1)
            .into_iter()
            .map(|(word, count)| MissWord {
                word: word.to_string(),
                count,
            })
            .collect(),
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &response)
        .context("failed to serialize extract json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(citations: &[CitationMatch], misses: &MissCounter) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Citations: {}", citations.len())?;
    for (index, found) in citations.iter().enumerate() {
        writeln!(output, "{}.\t{}", index + 1, found.citation)?;
        if found.span != found.citation {
            writeln!(output, "\tmatched={:?} alias={}", found.span, found.alias)?;
        }
    }

    if !misses.is_empty() {
        writeln!(output, "Unmatched § after:")?;
        for (word, count) in misses.report(1) {
            writeln!(output, "\t{word}\t{count}")?;
        }
    }

    output.flush()?;
    Ok(())
}
