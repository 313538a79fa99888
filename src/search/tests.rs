//! Search Module Tests
//!
//! Validates word normalization, the posting data model and ranking order.
//!
//! ## Test Scopes
//! - **Tokenizer**: Ensures tokens are lowercased, stripped and rejected on digits.
//! - **Types**: Checks posting deduplication and the output line format.
//! - **Ranking**: Verifies merging across mappers and the frequency/alphabetical sort.

#[cfg(test)]
mod tests {
    use crate::search::ranking::{merge_partials, rank};
    use crate::search::tokenizer::{normalize_token, tokenize_text};
    use crate::search::types::{PartialMap, PostingSet, RankedEntry};

    // ============================================================
    // TOKENIZER TESTS - normalize_token
    // ============================================================

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_token("APPLE"), Some("apple".to_string()));
        assert_eq!(normalize_token("Apple"), Some("apple".to_string()));
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize_token("hello,"), Some("hello".to_string()));
        assert_eq!(normalize_token("\"quoted\""), Some("quoted".to_string()));
        assert_eq!(normalize_token("don't"), Some("dont".to_string()));
        assert_eq!(normalize_token("well-known"), Some("wellknown".to_string()));
    }

    #[test]
    fn test_normalize_rejects_any_digit() {
        // The whole token goes, not just the digits
        assert_eq!(normalize_token("abc123"), None);
        assert_eq!(normalize_token("v2"), None);
        assert_eq!(normalize_token("2024"), None);
        assert_eq!(normalize_token("a1b"), None);
    }

    #[test]
    fn test_normalize_rejects_empty_result() {
        assert_eq!(normalize_token("--"), None);
        assert_eq!(normalize_token("!?."), None);
        assert_eq!(normalize_token(""), None);
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        assert_eq!(normalize_token("café"), Some("caf".to_string()));
        assert_eq!(normalize_token("ÄÖÜ"), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Hello!", "WORLD", "it's", "x", "Mixed-Case_Word"] {
            let once = normalize_token(raw).expect("token should be accepted");
            assert_eq!(normalize_token(&once), Some(once.clone()));
            assert!(once.bytes().all(|b| b.is_ascii_lowercase()), "{} is not [a-z]+", once);
        }
    }

    // ============================================================
    // TOKENIZER TESTS - tokenize_text
    // ============================================================

    #[test]
    fn test_tokenize_text_keeps_order_and_repeats() {
        let words: Vec<String> = tokenize_text("Apple apple APPLE\nbanana").flatten().collect();
        assert_eq!(words, vec!["apple", "apple", "apple", "banana"]);
    }

    #[test]
    fn test_tokenize_text_reports_rejected_tokens() {
        let tokens: Vec<Option<String>> = tokenize_text("rust 2024 edition v2 -- ok").collect();
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens.iter().filter(|t| t.is_none()).count(), 3);

        let words: Vec<String> = tokens.into_iter().flatten().collect();
        assert_eq!(words, vec!["rust", "edition", "ok"]);
    }

    #[test]
    fn test_tokenize_text_splits_on_ascii_whitespace_only() {
        // No-break and em spaces are stripped, not split on
        let words: Vec<String> = tokenize_text("foo\u{a0}bar em\u{2003}dash\ttab")
            .flatten()
            .collect();
        assert_eq!(words, vec!["foobar", "emdash", "tab"]);
    }

    #[test]
    fn test_tokenize_text_empty() {
        assert_eq!(tokenize_text("   \n\t ").count(), 0);
    }

    // ============================================================
    // TYPES TESTS
    // ============================================================

    #[test]
    fn test_partial_map_deduplicates_postings() {
        let mut map = PartialMap::new();
        map.insert("apple".to_string(), 1);
        map.insert("apple".to_string(), 1);
        map.insert("apple".to_string(), 3);

        assert_eq!(map.len(), 1);
        let postings: Vec<usize> = map.get("apple").unwrap().iter().copied().collect();
        assert_eq!(postings, vec![1, 3]);
    }

    #[test]
    fn test_ranked_entry_display() {
        let entry = RankedEntry::new("apple".to_string(), PostingSet::from([2, 1, 10]));
        assert_eq!(entry.to_string(), "apple:[1 2 10]");
        assert_eq!(entry.letter(), Some('a'));
    }

    #[test]
    fn test_ranked_entry_display_single_posting() {
        let entry = RankedEntry::new("banana".to_string(), PostingSet::from([2]));
        assert_eq!(entry.to_string(), "banana:[2]");
    }

    // ============================================================
    // RANKING TESTS
    // ============================================================

    #[test]
    fn test_merge_unions_postings_across_mappers() {
        // ARRANGE: two mappers saw the same word in different files
        let mut first = PartialMap::new();
        first.insert("cat".to_string(), 1);
        first.insert("cat".to_string(), 4);
        let mut second = PartialMap::new();
        second.insert("cat".to_string(), 2);
        second.insert("cow".to_string(), 2);

        // ACT
        let combined = merge_partials([&first, &second]);

        // ASSERT
        assert_eq!(combined.len(), 2);
        assert_eq!(combined["cat"], PostingSet::from([1, 2, 4]));
        assert_eq!(combined["cow"], PostingSet::from([2]));
    }

    #[test]
    fn test_rank_orders_by_frequency_then_word() {
        let mut partial = PartialMap::new();
        for (word, files) in [("cat", [1, 2]), ("ant", [3, 4])] {
            for f in files {
                partial.insert(word.to_string(), f);
            }
        }
        partial.insert("dog".to_string(), 5);

        let ranked = rank(merge_partials([&partial]));
        let words: Vec<&str> = ranked.iter().map(|e| e.word.as_str()).collect();

        assert_eq!(words, vec!["ant", "cat", "dog"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(merge_partials(std::iter::empty())).is_empty());
    }
}
