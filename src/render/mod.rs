//! Markdown rendering of the resolved symbol set.
//!
//! Rendering never fails and never iterates a hash-keyed collection into the
//! output: sections follow the symbol table's order followed by stable sorts
//! on the raw title, so identical inputs produce identical bytes.

pub mod markdown;

use std::collections::HashSet;

use serde::Serialize;

use crate::indexing::RelationshipIndex;
use crate::symbolgraph::{Symbol, SymbolTable};
use crate::types::Category;

pub use markdown::render_reference;

/// Text knobs for the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    /// Paragraph under the title; omitted when empty
    pub intro: String,
    /// Info string for declaration code fences
    pub fence_language: String,
    pub opt_out_marker: String,
    /// Text shown in place of missing or opted-out documentation
    pub placeholder: String,
}

impl RenderOptions {
    pub fn for_module(module: &str) -> Self {
        Self {
            title: format!("{module} Public API Reference"),
            intro: format!(
                "This document describes the public API surface of the `{module}` module."
            ),
            fence_language: "swift".to_string(),
            opt_out_marker: ":nodoc:".to_string(),
            placeholder: "*Not documented.*".to_string(),
        }
    }
}

/// Everything the renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub table: &'a SymbolTable,
    pub index: &'a RelationshipIndex,
    pub opted_out: &'a HashSet<String>,
}

/// Top-level symbols bucketed by section, each bucket sorted by title.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    pub classes: Vec<&'a Symbol>,
    pub protocols: Vec<&'a Symbol>,
    pub enumerations: Vec<&'a Symbol>,
    pub structures: Vec<&'a Symbol>,
    pub type_aliases: Vec<&'a Symbol>,
    pub functions: Vec<&'a Symbol>,
    pub variables: Vec<&'a Symbol>,
    pub uncategorized: Vec<&'a Symbol>,
}

impl<'a> Catalog<'a> {
    pub fn build(table: &'a SymbolTable) -> Self {
        let mut catalog = Self::default();
        for symbol in table.values() {
            match symbol.kind.category() {
                Category::Class => catalog.classes.push(symbol),
                Category::Protocol => catalog.protocols.push(symbol),
                Category::Enumeration => catalog.enumerations.push(symbol),
                Category::Structure => catalog.structures.push(symbol),
                Category::TypeAlias => catalog.type_aliases.push(symbol),
                Category::GlobalFunction => catalog.functions.push(symbol),
                Category::GlobalVariable => catalog.variables.push(symbol),
                Category::Member => {}
                Category::Uncategorized => catalog.uncategorized.push(symbol),
            }
        }

        for bucket in [
            &mut catalog.classes,
            &mut catalog.protocols,
            &mut catalog.enumerations,
            &mut catalog.structures,
            &mut catalog.type_aliases,
            &mut catalog.functions,
            &mut catalog.variables,
            &mut catalog.uncategorized,
        ] {
            // Stable: equal titles keep table order.
            bucket.sort_by(|a, b| a.title.cmp(&b.title));
        }
        catalog
    }

    pub fn section(&self, category: Category) -> &[&'a Symbol] {
        match category {
            Category::Class => &self.classes,
            Category::Protocol => &self.protocols,
            Category::Enumeration => &self.enumerations,
            Category::Structure => &self.structures,
            Category::TypeAlias => &self.type_aliases,
            Category::GlobalFunction => &self.functions,
            Category::GlobalVariable => &self.variables,
            Category::Uncategorized => &self.uncategorized,
            Category::Member => &[],
        }
    }

    pub fn counts(&self) -> SectionCounts {
        SectionCounts {
            classes: self.classes.len(),
            protocols: self.protocols.len(),
            enumerations: self.enumerations.len(),
            structures: self.structures.len(),
            type_aliases: self.type_aliases.len(),
            global_functions: self.functions.len(),
            global_variables: self.variables.len(),
            uncategorized: self.uncategorized.len(),
        }
    }
}

/// Number of top-level symbols per section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub classes: usize,
    pub protocols: usize,
    pub enumerations: usize,
    pub structures: usize,
    pub type_aliases: usize,
    pub global_functions: usize,
    pub global_variables: usize,
    pub uncategorized: usize,
}

/// A finished document plus what went into it.
#[derive(Debug, Clone)]
pub struct RenderedReference {
    pub markdown: String,
    pub counts: SectionCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolgraph::build_symbol_table;
    use crate::symbolgraph::test_support::symbol;

    #[test]
    fn test_catalog_buckets_and_sorts() {
        let table = build_symbol_table(vec![
            symbol("foo", "Class", "Foo", "class Foo"),
            symbol("bar", "Class", "Bar", "class Bar"),
            symbol("lower", "Class", "alpha", "class alpha"),
            symbol("p", "Protocol", "P", "protocol P"),
            symbol("f", "Function", "log(_:)", "func log(_: String)"),
            symbol("m", "Instance Method", "run()", "func run()"),
            symbol("op", "Operator", "+", "static func +"),
        ]);

        let catalog = Catalog::build(&table);
        let classes: Vec<&str> = catalog.classes.iter().map(|s| s.title.as_str()).collect();
        // Raw string order: uppercase before lowercase.
        assert_eq!(classes, vec!["Bar", "Foo", "alpha"]);
        assert_eq!(catalog.section(Category::Protocol).len(), 1);
        assert_eq!(catalog.section(Category::Member).len(), 0);

        let counts = catalog.counts();
        assert_eq!(counts.classes, 3);
        assert_eq!(counts.global_functions, 1);
        assert_eq!(counts.uncategorized, 1);
    }

    #[test]
    fn test_catalog_ties_keep_table_order() {
        let table = build_symbol_table(vec![
            symbol("second", "Structure", "Same", "struct Same // 1"),
            symbol("first", "Structure", "Same", "struct Same // 2"),
        ]);
        let catalog = Catalog::build(&table);
        let ids: Vec<&str> = catalog
            .structures
            .iter()
            .map(|s| s.precise_id.as_str())
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn test_default_options_follow_module_name() {
        let options = RenderOptions::for_module("Ably");
        assert_eq!(options.title, "Ably Public API Reference");
        assert!(options.intro.contains("`Ably`"));
        assert_eq!(options.opt_out_marker, ":nodoc:");
    }
}
