use super::types::{CombinedMap, PartialMap, RankedEntry};
use std::cmp::Ordering;

/// Merges partial maps into one table, unioning the posting sets of words
/// seen by more than one mapper.
pub fn merge_partials<'a, I>(partials: I) -> CombinedMap
where
    I: IntoIterator<Item = &'a PartialMap>,
{
    let mut combined = CombinedMap::new();
    for partial in partials {
        for (word, postings) in partial.iter() {
            combined
                .entry(word.clone())
                .or_default()
                .extend(postings.iter().copied());
        }
    }
    combined
}

/// Orders entries by number of files (descending), ties broken by word
/// (ascending).
pub fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.document_frequency()
        .cmp(&a.document_frequency())
        .then_with(|| a.word.cmp(&b.word))
}

/// Consumes a combined map and returns its entries in output order.
pub fn rank(combined: CombinedMap) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = combined
        .into_iter()
        .map(|(word, postings)| RankedEntry::new(word, postings))
        .collect();

    entries.sort_by(compare_entries);
    entries
}
