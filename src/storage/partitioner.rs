//! Letter Partitioning
//!
//! The single routing function shared by both phases. Mappers call it to decide which
//! partial map a word goes into; reducers call it to decide which partial maps they
//! read and which output files they own. Keeping one implementation here is what
//! guarantees the two phases agree.

/// Number of letters (and output files) in the index.
pub const ALPHABET_SIZE: usize = 26;

/// Maps a lowercase ASCII letter to the reducer that owns it.
///
/// `reducer_id = floor(letter_index * num_reducers / 26)`. The mapping is monotonic in
/// the letter, so every reducer owns a contiguous (possibly empty) range of letters and
/// no letter has two owners.
pub fn reducer_of(letter: char, num_reducers: usize) -> usize {
    debug_assert!(letter.is_ascii_lowercase(), "not a lowercase letter: {letter:?}");
    debug_assert!(num_reducers > 0);
    let letter_index = (letter as u8).wrapping_sub(b'a') as usize;
    (letter_index * num_reducers) / ALPHABET_SIZE
}

/// All 26 letters, `a` to `z`.
pub fn alphabet() -> impl Iterator<Item = char> {
    'a'..='z'
}

/// Fixed partitioning for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionManager {
    num_reducers: usize,
}

impl PartitionManager {
    pub fn new(num_reducers: usize) -> Self {
        Self { num_reducers }
    }

    pub fn num_reducers(&self) -> usize {
        self.num_reducers
    }

    /// Reducer owning `word`, from its first letter. `None` for words outside `[a-z]`.
    pub fn reducer_for_word(&self, word: &str) -> Option<usize> {
        let first = word.chars().next()?;
        first
            .is_ascii_lowercase()
            .then(|| reducer_of(first, self.num_reducers))
    }

    /// Letters owned by `reducer_id`, in order.
    pub fn letters_of(&self, reducer_id: usize) -> Vec<char> {
        alphabet()
            .filter(|&letter| reducer_of(letter, self.num_reducers) == reducer_id)
            .collect()
    }

    /// True if `letter` belongs to `reducer_id`.
    pub fn owns(&self, reducer_id: usize, letter: char) -> bool {
        letter.is_ascii_lowercase() && reducer_of(letter, self.num_reducers) == reducer_id
    }
}
