//! Statute citation extraction for Norwegian legal text.
//!
//! A [`Grammar`] is compiled once from the statute table. [`extract_citations`]
//! scans lowercased text alias by alias, records each citation with its
//! section qualifiers, and counts `§` marks no alias claimed in a
//! [`MissCounter`].

mod extractor;
mod grammar;
mod misses;
mod table;

pub use extractor::{CitationMatch, extract_citations, merge_citations};
pub use grammar::{AliasConflict, ConflictKind, Grammar, StatuteEntry};
pub use misses::MissCounter;
pub use table::default_statutes;
