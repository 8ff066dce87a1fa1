//! Property-based tests for tag matching.
//!
//! - ALL mode is never looser than ANY mode
//! - Matching ignores case and surrounding whitespace on both sides
//! - Duplicate note tags do not change the outcome

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use crate::note::TagEntry;
    use crate::tags::{matches, MatchMode};

    // Small alphabet so note and query tags overlap often.
    fn tag_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("cardio".to_string()),
            Just("gym".to_string()),
            Just("yoga".to_string()),
            Just("Strength".to_string()),
            "[a-c]{1,3}",
        ]
    }

    fn note_tags() -> impl Strategy<Value = Vec<TagEntry>> {
        prop::collection::vec(
            (tag_name(), 0.0f64..10.0, any::<bool>()).prop_map(|(name, weight, legacy)| {
                if legacy {
                    TagEntry::legacy(name)
                } else {
                    TagEntry::weighted(name, weight)
                }
            }),
            0..6,
        )
    }

    fn query_tags() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set(tag_name(), 1..4)
    }

    fn scramble(name: &str, upper: bool, pad: usize) -> String {
        let cased = if upper {
            name.to_uppercase()
        } else {
            name.to_lowercase()
        };
        format!("{}{}{}", " ".repeat(pad), cased, "\t".repeat(pad))
    }

    proptest! {
        /// Anything matched in ALL mode is matched in ANY mode.
        #[test]
        fn all_implies_any(tags in note_tags(), query in query_tags()) {
            if matches(&tags, &query, MatchMode::All) {
                prop_assert!(matches(&tags, &query, MatchMode::Any));
            }
        }

        /// Re-casing and padding tag names never changes the result.
        #[test]
        fn case_and_whitespace_invariant(
            tags in note_tags(),
            query in query_tags(),
            upper in any::<bool>(),
            pad in 0usize..3,
        ) {
            let scrambled_tags: Vec<TagEntry> = tags
                .iter()
                .map(|t| match t {
                    TagEntry::Weighted(name, w) => {
                        TagEntry::weighted(scramble(name, upper, pad), *w)
                    }
                    TagEntry::Legacy(name) => TagEntry::legacy(scramble(name, !upper, pad)),
                })
                .collect();
            let scrambled_query: BTreeSet<String> =
                query.iter().map(|q| scramble(q, !upper, pad)).collect();

            for mode in [MatchMode::All, MatchMode::Any] {
                prop_assert_eq!(
                    matches(&tags, &query, mode),
                    matches(&scrambled_tags, &scrambled_query, mode)
                );
            }
        }

        /// Duplicating every note tag is a no-op.
        #[test]
        fn duplicates_are_one_logical_tag(tags in note_tags(), query in query_tags()) {
            let doubled: Vec<TagEntry> = tags.iter().chain(tags.iter()).cloned().collect();
            for mode in [MatchMode::All, MatchMode::Any] {
                prop_assert_eq!(matches(&tags, &query, mode), matches(&doubled, &query, mode));
            }
        }
    }
}
