//! Backfill documentation from the secondary (header) graph.
//!
//! The primary-language compiler does not carry over comments written on
//! header declarations, so the only route for that text into the primary
//! symbols is a join on precise id.

use std::collections::HashMap;

use crate::symbolgraph::{DocComment, Symbol};

/// Copy secondary doc comments onto primary symbols that have none.
///
/// Existing primary documentation always wins. Returns the number of symbols
/// that received a comment.
pub fn merge_doc_comments(primary: &mut [Symbol], secondary: &[Symbol]) -> usize {
    let docs: HashMap<&str, &DocComment> = secondary
        .iter()
        .filter_map(|s| match &s.doc_comment {
            Some(doc) if !doc.is_empty() => Some((s.precise_id.as_str(), doc)),
            _ => None,
        })
        .collect();

    let mut merged = 0;
    for symbol in primary.iter_mut() {
        if symbol.has_doc_comment() {
            continue;
        }
        if let Some(doc) = docs.get(symbol.precise_id.as_str()) {
            symbol.doc_comment = Some((*doc).clone());
            merged += 1;
        }
    }

    tracing::info!("[merge] merged {merged} doc comments from the secondary graph");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolgraph::test_support::{documented, symbol};

    #[test]
    fn test_backfills_missing_docs() {
        let mut primary = vec![
            symbol("c:objc(cs)ARTRealtime", "Class", "ARTRealtime", "class ARTRealtime"),
            symbol("s:4Demo3BarC", "Class", "Bar", "class Bar"),
        ];
        let secondary = vec![documented(
            symbol("c:objc(cs)ARTRealtime", "Class", "ARTRealtime", "@interface ARTRealtime"),
            &["The realtime client."],
        )];

        let merged = merge_doc_comments(&mut primary, &secondary);

        assert_eq!(merged, 1);
        assert_eq!(primary[0].doc_text(), "The realtime client.");
        assert!(primary[1].doc_comment.is_none());
    }

    #[test]
    fn test_never_overwrites_existing_docs() {
        let mut primary = vec![documented(
            symbol("c:objc(cs)A", "Class", "A", "class A"),
            &["Swift side."],
        )];
        let secondary = vec![documented(
            symbol("c:objc(cs)A", "Class", "A", "@interface A"),
            &["Header side."],
        )];

        assert_eq!(merge_doc_comments(&mut primary, &secondary), 0);
        assert_eq!(primary[0].doc_text(), "Swift side.");
    }

    #[test]
    fn test_empty_primary_comment_is_backfilled() {
        let mut primary = vec![documented(symbol("c:objc(cs)A", "Class", "A", "class A"), &[])];
        let secondary = vec![documented(
            symbol("c:objc(cs)A", "Class", "A", "@interface A"),
            &["Header side."],
        )];

        assert_eq!(merge_doc_comments(&mut primary, &secondary), 1);
        assert_eq!(primary[0].doc_text(), "Header side.");
    }

    #[test]
    fn test_undocumented_secondary_contributes_nothing() {
        let mut primary = vec![symbol("c:objc(cs)A", "Class", "A", "class A")];
        let secondary = vec![
            symbol("c:objc(cs)A", "Class", "A", "@interface A"),
            documented(symbol("c:objc(cs)Other", "Class", "Other", ""), &["Unrelated"]),
        ];

        assert_eq!(merge_doc_comments(&mut primary, &secondary), 0);
        assert!(primary[0].doc_comment.is_none());
    }

    #[test]
    fn test_duplicate_primary_ids_each_merged() {
        let mut primary = vec![
            symbol("c:objc(cs)A", "Class", "A", "class A"),
            symbol("c:objc(cs)A", "Class", "A", "class A"),
        ];
        let secondary = vec![documented(symbol("c:objc(cs)A", "Class", "A", ""), &["Doc"])];

        assert_eq!(merge_doc_comments(&mut primary, &secondary), 2);
    }
}
