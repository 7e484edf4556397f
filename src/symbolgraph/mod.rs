//! In-memory model of compiler-emitted symbol graphs.
//!
//! A symbol graph is a bag of [`Symbol`]s plus a list of [`Relationship`]s.
//! Symbols never point at their parents or children; all structure comes from
//! the relationship list.

pub mod loader;
mod records;

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{RelationKind, SymbolKind};

pub use loader::{LoadedGraphs, discover_primary_graphs, load_graph, load_graphs, parse_graph};

/// A documented API declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    /// Stable identifier shared between the primary and secondary graphs
    pub precise_id: String,
    pub kind: SymbolKind,
    /// Display name
    pub title: String,
    /// Signature spans, concatenated in order to form the declaration
    pub declaration_fragments: Vec<String>,
    pub doc_comment: Option<DocComment>,
    /// Source file uri; only consulted by the visibility filter
    pub source_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocComment {
    pub lines: Vec<String>,
}

impl DocComment {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with newlines, trimmed.
    pub fn text(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

impl Symbol {
    /// Full declaration text.
    pub fn declaration(&self) -> String {
        self.declaration_fragments.concat()
    }

    /// Documentation text, or an empty string when there is none.
    pub fn doc_text(&self) -> String {
        self.doc_comment
            .as_ref()
            .map(DocComment::text)
            .unwrap_or_default()
    }

    pub fn has_doc_comment(&self) -> bool {
        self.doc_comment.as_ref().is_some_and(|doc| !doc.is_empty())
    }

    /// File name of the declaring source, i.e. everything after the last `/`.
    pub fn location_file_name(&self) -> Option<&str> {
        self.source_location
            .as_deref()
            .map(|uri| uri.rsplit('/').next().unwrap_or(uri))
    }
}

/// A directed, kinded edge between two precise ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationKind,
}

/// The working symbol set, keyed by precise id.
///
/// Iteration follows first-seen order; a later symbol with the same id
/// replaces the value but keeps the original position.
pub type SymbolTable = IndexMap<String, Symbol>;

pub fn build_symbol_table(symbols: impl IntoIterator<Item = Symbol>) -> SymbolTable {
    let mut table = SymbolTable::new();
    for symbol in symbols {
        table.insert(symbol.precise_id.clone(), symbol);
    }
    table
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn symbol(id: &str, kind: &str, title: &str, decl: &str) -> Symbol {
        Symbol {
            precise_id: id.to_string(),
            kind: SymbolKind::from_display_name(kind),
            title: title.to_string(),
            declaration_fragments: vec![decl.to_string()],
            doc_comment: None,
            source_location: None,
        }
    }

    pub fn documented(mut symbol: Symbol, lines: &[&str]) -> Symbol {
        symbol.doc_comment = Some(DocComment {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        });
        symbol
    }

    pub fn rel(source: &str, kind: &str, target: &str) -> Relationship {
        Relationship {
            source: source.to_string(),
            target: target.to_string(),
            kind: RelationKind::from_wire(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_declaration_concatenates_fragments() {
        let mut s = symbol("s:1", "Instance Method", "run()", "");
        s.declaration_fragments = vec!["func ".into(), "run".into(), "()".into()];
        assert_eq!(s.declaration(), "func run()");
    }

    #[test]
    fn test_doc_text_joins_and_trims() {
        let s = documented(symbol("s:1", "Class", "A", "class A"), &["", " Hello", "world ", ""]);
        assert_eq!(s.doc_text(), "Hello\nworld");
        assert!(s.has_doc_comment());
    }

    #[test]
    fn test_empty_doc_comment_counts_as_missing() {
        let s = documented(symbol("s:1", "Class", "A", "class A"), &[]);
        assert!(!s.has_doc_comment());
        assert_eq!(s.doc_text(), "");
    }

    #[test]
    fn test_location_file_name() {
        let mut s = symbol("c:objc(cs)A", "Class", "A", "class A");
        s.source_location = Some("file:///repo/Source/include/Ably/ARTPush.h".into());
        assert_eq!(s.location_file_name(), Some("ARTPush.h"));

        s.source_location = Some("Bare.h".into());
        assert_eq!(s.location_file_name(), Some("Bare.h"));
    }

    #[test]
    fn test_symbol_table_last_wins_first_position() {
        let table = build_symbol_table(vec![
            symbol("a", "Class", "First A", "class A"),
            symbol("b", "Class", "B", "class B"),
            symbol("a", "Class", "Second A", "class A"),
        ]);
        let ids: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(table["a"].title, "Second A");
    }
}
