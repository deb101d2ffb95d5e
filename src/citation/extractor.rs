use std::collections::{BTreeSet, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::grammar::{AliasPattern, Grammar, SECTION_TAIL};
use super::misses::MissCounter;

/// Characters in front of an unclaimed `§` searched for the preceding word.
const MISS_WINDOW_CHARS: usize = 50;

/// `... § 5 og § 24` and `... § 5 § 6` continue the citation that just matched.
static CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?: og)? ?(§ ?{SECTION_TAIL})")).expect("valid continuation regex")
});

/// One statute reference found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationMatch {
    /// Table alias that matched.
    pub alias: String,
    /// Lowercased source text the citation was read from.
    pub span: String,
    /// Emitted form, with the statute's short name substituted when it has one.
    pub citation: String,
}

/// Finds statute citations in `text`, in alias-table order and then text order.
///
/// A span repeated later in the text is claimed again but reported once.
/// Every `§` left unclaimed afterwards is counted in `misses`.
pub fn extract_citations(
    text: &str,
    grammar: &Grammar,
    misses: &mut MissCounter,
) -> Vec<CitationMatch> {
    let mut working = text.to_lowercase();
    for pattern in grammar.patterns() {
        working = split_multi_section(&working, pattern);
    }

    let mut consumed: Vec<Range<usize>> = Vec::new();
    let mut found = Vec::new();

    for pattern in grammar.patterns() {
        let short_name = grammar.entries()[pattern.entry].short_name.as_deref();
        let display = short_name.unwrap_or(&pattern.alias);
        let mut claimed = Vec::new();
        let mut reported: HashSet<String> = HashSet::new();

        for gap in free_ranges(&consumed, working.len()) {
            let segment = &working[gap.clone()];
            let mut cursor = 0;

            while let Some(captures) = pattern.citation.captures_at(segment, cursor) {
                let Some(whole) = captures.get(0) else {
                    break;
                };
                if reported.insert(whole.as_str().to_string()) {
                    found.push(CitationMatch {
                        alias: pattern.alias.clone(),
                        span: whole.as_str().to_string(),
                        citation: render_citation(&captures, short_name),
                    });
                }

                let mut end = whole.end();
                while let Some(next) = CONTINUATION.captures(&segment[end..]) {
                    let (Some(continued), Some(section)) = (next.get(0), next.get(1)) else {
                        break;
                    };
                    let span = format!("{} {}", pattern.alias, section.as_str());
                    if reported.insert(span.clone()) {
                        found.push(CitationMatch {
                            alias: pattern.alias.clone(),
                            span,
                            citation: format!("{display} {}", section.as_str()),
                        });
                    }
                    end += continued.end();
                }

                claimed.push(gap.start + whole.start()..gap.start + end);
                cursor = end;
            }
        }

        consumed.extend(claimed);
        consumed.sort_by_key(|range| range.start);
    }

    count_misses(&working, &consumed, misses);
    found
}

/// Union of citation lists, deduplicated and sorted for display.
pub fn merge_citations<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [CitationMatch]>,
{
    lists
        .into_iter()
        .flatten()
        .map(|found| found.citation.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `alias §§ 14 og 15` → `alias § 14 og alias § 15`.
///
/// Only two section numbers are handled; `§§ 1, 2 og 3` is left as is.
fn split_multi_section(text: &str, pattern: &AliasPattern) -> String {
    pattern
        .split
        .replace_all(text, |captures: &Captures| {
            format!(
                "{alias} § {} og {alias} § {}",
                &captures[1],
                &captures[2],
                alias = pattern.alias
            )
        })
        .into_owned()
}

fn render_citation(captures: &Captures, short_name: Option<&str>) -> String {
    let (Some(whole), Some(alias), Some(short_name)) =
        (captures.get(0), captures.name("alias"), short_name)
    else {
        return captures
            .get(0)
            .map(|whole| whole.as_str().to_string())
            .unwrap_or_default();
    };

    format!(
        "{short_name}{}",
        &whole.as_str()[alias.end() - whole.start()..]
    )
}

fn free_ranges(consumed: &[Range<usize>], len: usize) -> Vec<Range<usize>> {
    let mut gaps = Vec::with_capacity(consumed.len() + 1);
    let mut start = 0;
    for range in consumed {
        if range.start > start {
            gaps.push(start..range.start);
        }
        start = start.max(range.end);
    }
    if start < len {
        gaps.push(start..len);
    }
    gaps
}

fn count_misses(text: &str, consumed: &[Range<usize>], misses: &mut MissCounter) {
    let mut previous_mark_end = 0;

    for (index, mark) in text.match_indices('§') {
        let mark_end = index + mark.len();
        if consumed.iter().any(|range| range.contains(&index)) {
            previous_mark_end = mark_end;
            continue;
        }

        let window_start = text[..index]
            .char_indices()
            .rev()
            .nth(MISS_WINDOW_CHARS - 1)
            .map(|(position, _)| position)
            .unwrap_or(0)
            .max(previous_mark_end);

        let word = text[window_start..index]
            .split_whitespace()
            .last()
            .unwrap_or_default();
        misses.record(word);
        previous_mark_end = mark_end;
    }
}
