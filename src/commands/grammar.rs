use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::citation::{AliasConflict, ConflictKind, Grammar, StatuteEntry, default_statutes};
use crate::cli::GrammarArgs;

#[derive(Debug, Serialize)]
struct GrammarResponse<'a> {
    entry_count: usize,
    alias_count: usize,
    entries: &'a [StatuteEntry],
    conflicts: &'a [AliasConflict],
}

pub fn run(args: GrammarArgs) -> Result<()> {
    let grammar = Grammar::new(default_statutes()).context("failed to compile statute grammar")?;

    if args.json {
        write_json_response(&grammar)
    } else {
        write_text_response(&grammar)
    }
}

fn alias_count(grammar: &Grammar) -> usize {
    grammar
        .entries()
        .iter()
        .map(|entry| entry.aliases.len())
        .sum()
}

fn write_json_response(grammar: &Grammar) -> Result<()> {
    let response = GrammarResponse {
        entry_count: grammar.entries().len(),
        alias_count: alias_count(grammar),
        entries: grammar.entries(),
        conflicts: grammar.conflicts(),
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &response)
        .context("failed to serialize grammar json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(grammar: &Grammar) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Entries: {} aliases={}",
        grammar.entries().len(),
        alias_count(grammar)
    )?;
    for (index, entry) in grammar.entries().iter().enumerate() {
        let label = entry
            .name
            .as_deref()
            .or(entry.short_name.as_deref())
            .unwrap_or("(unnamed)");
        writeln!(output, "{index}.\t{label}\taliases={}", entry.aliases.len())?;
        if let Some(short_name) = &entry.short_name {
            writeln!(output, "\tshort_name={short_name}")?;
        }
        if let Some(link) = &entry.link {
            writeln!(output, "\tlink={link}")?;
        }
    }

    writeln!(output, "Conflicts: {}", grammar.conflicts().len())?;
    for conflict in grammar.conflicts() {
        let kind = match conflict.kind {
            ConflictKind::Duplicate => "duplicate",
            ConflictKind::Shadowed => "shadowed",
        };
        writeln!(
            output,
            "\t{kind}\t{:?} (entry {}) vs {:?} (entry {})",
            conflict.alias, conflict.first_entry, conflict.other_alias, conflict.other_entry
        )?;
    }

    output.flush()?;
    Ok(())
}
