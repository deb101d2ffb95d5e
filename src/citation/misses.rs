use std::collections::BTreeMap;

/// Counts the word in front of every `§` that no statute alias claimed.
///
/// Purely diagnostic: the report tells which alias to add to the table next.
#[derive(Debug, Clone, Default)]
pub struct MissCounter {
    counts: BTreeMap<String, usize>,
}

impl MissCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, word: &str) {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
    }

    #[cfg(test)]
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Words seen at least `threshold` times, sorted by word.
    pub fn report(&self, threshold: usize) -> Vec<(&str, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count >= threshold)
            .map(|(word, count)| (word.as_str(), *count))
            .collect()
    }
}
