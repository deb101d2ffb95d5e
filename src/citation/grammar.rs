use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::GrammarError;

/// Section number followed by the optional qualifiers, in the fixed order
/// they appear in citations: `-8`, `a-11`, `nr. 3`, `første ledd`,
/// `annet punktum`, `bokstav c`, `fjerde ledd`, `(1) (b)`.
///
/// Matched against lowercased text, so the `A-11` chapter form is `a-11`.
pub(super) const SECTION_TAIL: &str = concat!(
    r"[0-9]*",
    r"(?:-[0-9]*)*",
    r"(?: [a-zæøå]-[0-9]*)?",
    r"(?: nr\. [0-9]*)?",
    r"(?: [a-zæøå]* ledd)?",
    r"(?: [a-zæøå]* punktum)?",
    r"(?: bokstav [a-zæøå]*)?",
    r"(?: [a-zæøå]* ledd)?",
    r"(?: ?\([0-9a-zA-ZæøåÆØÅ]{0,4}\))*",
);

/// One statute and the names it goes by in running text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatuteEntry {
    pub name: Option<String>,
    /// Display form every alias collapses to in emitted citations.
    pub short_name: Option<String>,
    pub aliases: Vec<String>,
    pub link: Option<String>,
}

impl StatuteEntry {
    pub fn new(aliases: &[&str]) -> Self {
        Self {
            name: None,
            short_name: None,
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            link: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_short_name(mut self, short_name: &str) -> Self {
        self.short_name = Some(short_name.to_string());
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Same alias text in two entries; the later one never matches.
    Duplicate,
    /// The earlier alias is a suffix of the later one and claims its citations.
    Shadowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasConflict {
    pub kind: ConflictKind,
    pub alias: String,
    pub first_entry: usize,
    pub other_alias: String,
    pub other_entry: usize,
}

#[derive(Debug)]
pub(super) struct AliasPattern {
    pub entry: usize,
    pub alias: String,
    pub split: Regex,
    pub citation: Regex,
}

/// Compiled statute table. Aliases are tried in table order.
#[derive(Debug)]
pub struct Grammar {
    entries: Vec<StatuteEntry>,
    patterns: Vec<AliasPattern>,
    conflicts: Vec<AliasConflict>,
}

impl Grammar {
    pub fn new(entries: Vec<StatuteEntry>) -> Result<Self, GrammarError> {
        let mut patterns = Vec::new();
        let mut conflicts = Vec::new();
        let mut owners: HashMap<&str, usize> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.aliases.is_empty() {
                return Err(GrammarError::EmptyAliasSet { index });
            }

            let mut seen = HashSet::new();
            for alias in &entry.aliases {
                if !seen.insert(alias.as_str()) {
                    return Err(GrammarError::DuplicateAlias {
                        index,
                        alias: alias.clone(),
                    });
                }
                if alias.to_lowercase() != *alias {
                    return Err(GrammarError::AliasNotLowercase {
                        alias: alias.clone(),
                    });
                }

                if let Some(&first_entry) = owners.get(alias.as_str()) {
                    conflicts.push(AliasConflict {
                        kind: ConflictKind::Duplicate,
                        alias: alias.clone(),
                        first_entry,
                        other_alias: alias.clone(),
                        other_entry: index,
                    });
                    continue;
                }
                owners.insert(alias.as_str(), index);
                patterns.push(compile_alias(index, alias)?);
            }
        }

        for (position, earlier) in patterns.iter().enumerate() {
            for later in &patterns[position + 1..] {
                if later.alias.len() > earlier.alias.len() && later.alias.ends_with(&earlier.alias)
                {
                    conflicts.push(AliasConflict {
                        kind: ConflictKind::Shadowed,
                        alias: earlier.alias.clone(),
                        first_entry: earlier.entry,
                        other_alias: later.alias.clone(),
                        other_entry: later.entry,
                    });
                }
            }
        }

        for conflict in &conflicts {
            warn!(
                kind = ?conflict.kind,
                alias = %conflict.alias,
                first_entry = conflict.first_entry,
                other_alias = %conflict.other_alias,
                other_entry = conflict.other_entry,
                "statute alias conflict"
            );
        }
        debug!(
            entries = entries.len(),
            aliases = patterns.len(),
            "compiled citation grammar"
        );

        Ok(Self {
            entries,
            patterns,
            conflicts,
        })
    }

    pub fn entries(&self) -> &[StatuteEntry] {
        &self.entries
    }

    pub fn conflicts(&self) -> &[AliasConflict] {
        &self.conflicts
    }

    pub(super) fn patterns(&self) -> &[AliasPattern] {
        &self.patterns
    }
}

fn compile_alias(entry: usize, alias: &str) -> Result<AliasPattern, GrammarError> {
    let escaped = regex::escape(alias);
    let compile = |pattern: String| {
        Regex::new(&pattern).map_err(|source| GrammarError::Pattern {
            alias: alias.to_string(),
            source,
        })
    };

    Ok(AliasPattern {
        entry,
        alias: alias.to_string(),
        split: compile(format!(r"{escaped} §§ ([0-9]*) og ([0-9]*)"))?,
        citation: compile(format!(r"(?P<alias>{escaped}s?) ?§ ?{SECTION_TAIL}"))?,
    })
}
