//! Source merging.
//!
//! Combines the sources the model declared with the raw citations search
//! grounding returned, deduplicated by exact URL in first-seen order.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{Citation, Source};

/// Merge model-declared sources with grounding citations.
///
/// Declared sources come first in their original order, followed by
/// citations whose URL has not been seen yet. A declared source is only ever
/// dropped when an earlier one has the same URL; one with a blank URL is
/// kept as is. Citations without a URL are skipped. A citation without a
/// title is kept with an empty title so it renders as its URL (see
/// [`Source::display_title`]).
pub fn merge(primary: &[Source], secondary: &[Citation]) -> Vec<Source> {
    let mut merged: IndexMap<&str, Source> =
        IndexMap::with_capacity(primary.len() + secondary.len());

    for source in primary {
        merged
            .entry(source.url.as_str())
            .or_insert_with(|| source.clone());
    }

    let declared = merged.len();

    for citation in secondary {
        let Some(url) = citation.uri.as_deref().filter(|u| !u.trim().is_empty()) else {
            continue;
        };
        merged.entry(url).or_insert_with(|| Source {
            title: citation.title.clone().unwrap_or_default(),
            url: url.to_string(),
        });
    }

    debug!(
        declared,
        citations = secondary.len(),
        added = merged.len() - declared,
        "Merged sources"
    );

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_distinct_citation_appended() {
        let primary = vec![Source::new("Reuters", "https://r.example/1")];
        let secondary = vec![Citation::new("https://ap.example/2", "AP")];

        let merged = merge(&primary, &secondary);

        assert_eq!(
            merged,
            vec![
                Source::new("Reuters", "https://r.example/1"),
                Source::new("AP", "https://ap.example/2"),
            ]
        );
    }

    #[test]
    fn test_duplicate_citation_dropped() {
        let primary = vec![Source::new("Reuters", "https://r.example/1")];
        let secondary = vec![Citation::new("https://r.example/1", "Dup")];

        let merged = merge(&primary, &secondary);

        assert_eq!(merged, vec![Source::new("Reuters", "https://r.example/1")]);
    }

    #[test]
    fn test_duplicates_within_citations_keep_first() {
        let secondary = vec![
            Citation::new("https://a.example", "first"),
            Citation::new("https://b.example", "b"),
            Citation::new("https://a.example", "second"),
        ];

        let merged = merge(&[], &secondary);

        assert_eq!(
            merged,
            vec![
                Source::new("first", "https://a.example"),
                Source::new("b", "https://b.example"),
            ]
        );
    }

    #[test]
    fn test_url_comparison_is_case_sensitive() {
        let primary = vec![Source::new("lower", "https://x.example/page")];
        let secondary = vec![Citation::new("https://x.example/Page", "upper")];

        assert_eq!(merge(&primary, &secondary).len(), 2);
    }

    #[test]
    fn test_citation_without_uri_skipped() {
        let secondary = vec![
            Citation {
                uri: None,
                title: Some("orphan".into()),
            },
            Citation {
                uri: Some("   ".into()),
                title: Some("blank".into()),
            },
        ];

        assert!(merge(&[], &secondary).is_empty());
    }

    #[test]
    fn test_citation_without_title_kept() {
        let secondary = vec![Citation {
            uri: Some("https://untitled.example".into()),
            title: None,
        }];

        let merged = merge(&[], &secondary);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "");
        assert_eq!(merged[0].display_title(), "https://untitled.example");
    }

    #[test]
    fn test_repeated_declared_source_collapsed() {
        let primary = vec![
            Source::new("BBC", "https://bbc.example/a"),
            Source::new("BBC again", "https://bbc.example/a"),
        ];

        assert_eq!(merge(&primary, &[]), vec![Source::new("BBC", "https://bbc.example/a")]);
    }

    #[test]
    fn test_declared_source_without_url_kept() {
        let primary = vec![
            Source::new("Agency statement", ""),
            Source::new("BBC", "https://bbc.example/a"),
        ];
        let secondary = vec![Citation::new("https://ap.example/2", "AP")];

        assert_eq!(
            merge(&primary, &secondary),
            vec![
                Source::new("Agency statement", ""),
                Source::new("BBC", "https://bbc.example/a"),
                Source::new("AP", "https://ap.example/2"),
            ]
        );
    }

    // Small URL pool so collisions are common.
    fn url() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "https://a.example/1",
            "https://b.example/2",
            "https://c.example/3",
            "https://C.example/3",
            "https://d.example/4",
            "",
        ])
        .prop_map(String::from)
    }

    fn source() -> impl Strategy<Value = Source> {
        ("[a-z]{0,6}", url()).prop_map(|(title, url)| Source { title, url })
    }

    fn citation() -> impl Strategy<Value = Citation> {
        (prop::option::of(url()), prop::option::of("[a-z]{0,6}"))
            .prop_map(|(uri, title)| Citation { uri, title })
    }

    /// Straightforward quadratic reference implementation.
    fn reference_merge(primary: &[Source], secondary: &[Citation]) -> Vec<Source> {
        let mut out: Vec<Source> = Vec::new();
        for s in primary {
            if !out.iter().any(|o| o.url == s.url) {
                out.push(s.clone());
            }
        }
        for c in secondary {
            if let Some(uri) = c.uri.as_deref() {
                if !uri.trim().is_empty() && !out.iter().any(|o| o.url == uri) {
                    out.push(Source::new(c.title.clone().unwrap_or_default(), uri));
                }
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_no_duplicate_urls(
            primary in prop::collection::vec(source(), 0..8),
            secondary in prop::collection::vec(citation(), 0..8),
        ) {
            let merged = merge(&primary, &secondary);
            let urls: HashSet<&str> = merged.iter().map(|s| s.url.as_str()).collect();
            prop_assert_eq!(urls.len(), merged.len());
        }

        #[test]
        fn prop_every_valid_url_present(
            primary in prop::collection::vec(source(), 0..8),
            secondary in prop::collection::vec(citation(), 0..8),
        ) {
            let merged = merge(&primary, &secondary);
            let urls: HashSet<&str> = merged.iter().map(|s| s.url.as_str()).collect();

            for s in &primary {
                prop_assert!(urls.contains(s.url.as_str()));
            }
            for c in &secondary {
                if let Some(uri) = c.uri.as_deref().filter(|u| !u.trim().is_empty()) {
                    prop_assert!(urls.contains(uri));
                }
            }
        }

        #[test]
        fn prop_order_matches_reference(
            primary in prop::collection::vec(source(), 0..8),
            secondary in prop::collection::vec(citation(), 0..8),
        ) {
            prop_assert_eq!(merge(&primary, &secondary), reference_merge(&primary, &secondary));
        }

        #[test]
        fn prop_idempotent(
            primary in prop::collection::vec(source(), 0..8),
            secondary in prop::collection::vec(citation(), 0..8),
        ) {
            let once = merge(&primary, &secondary);
            prop_assert_eq!(merge(&once, &[]), once);
        }
    }
}
