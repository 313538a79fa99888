use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// 1-based position of an input file in the manifest.
pub type FileId = usize;

/// Unique file ids a word occurs in. Ordered, so output is ascending for free.
pub type PostingSet = BTreeSet<FileId>;

/// Word -> postings table built by one mapper for one reducer partition.
///
/// Only the owning mapper writes to it; once published it is read-only.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartialMap {
    entries: HashMap<String, PostingSet>,
}

impl PartialMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `word` occurs in `file_id`. Repeated inserts are no-ops.
    pub fn insert(&mut self, word: String, file_id: FileId) {
        self.entries.entry(word).or_default().insert(file_id);
    }

    pub fn get(&self, word: &str) -> Option<&PostingSet> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PostingSet)> {
        self.entries.iter()
    }
}

/// Union of every mapper's partial map for one reducer.
pub type CombinedMap = BTreeMap<String, PostingSet>;

/// A word and its postings, ready to be written.
///
/// Formats as one output line without the trailing newline: `word:[1 2 3]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub word: String,
    pub postings: PostingSet,
}

impl RankedEntry {
    pub fn new(word: String, postings: PostingSet) -> Self {
        Self { word, postings }
    }

    /// First letter of the word; words are never empty once indexed.
    pub fn letter(&self) -> Option<char> {
        self.word.chars().next()
    }

    pub fn document_frequency(&self) -> usize {
        self.postings.len()
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:[", self.word)?;
        for (i, id) in self.postings.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", id)?;
        }
        f.write_str("]")
    }
}
