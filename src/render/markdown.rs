use indexmap::IndexMap;

use super::{Catalog, RenderContext, RenderOptions, RenderedReference};
use crate::indexing::{HierarchyResolver, ResolvedMember, is_opted_out};
use crate::symbolgraph::Symbol;
use crate::types::{Category, SymbolKind};

/// Sections listed in the table of contents.
const TOC_SECTIONS: [Category; 5] = [
    Category::Class,
    Category::Protocol,
    Category::Enumeration,
    Category::Structure,
    Category::TypeAlias,
];

/// Sections rendered with full member hierarchies.
const TYPE_SECTIONS: [Category; 4] = [
    Category::Class,
    Category::Protocol,
    Category::Enumeration,
    Category::Structure,
];

/// Sections rendered as flat lists.
const FLAT_SECTIONS: [Category; 3] = [
    Category::TypeAlias,
    Category::GlobalFunction,
    Category::GlobalVariable,
];

/// Render the whole reference document.
pub fn render_reference(ctx: &RenderContext<'_>, options: &RenderOptions) -> RenderedReference {
    let catalog = Catalog::build(ctx.table);
    let mut writer = MarkdownWriter {
        ctx,
        options,
        resolver: HierarchyResolver::new(ctx.table, ctx.index),
        lines: Vec::new(),
    };

    writer.header();
    writer.table_of_contents(&catalog);
    for category in TYPE_SECTIONS {
        writer.type_section(category, catalog.section(category));
    }
    for category in FLAT_SECTIONS {
        writer.flat_section(category, catalog.section(category));
    }

    RenderedReference {
        markdown: writer.lines.join("\n"),
        counts: catalog.counts(),
    }
}

/// Anchor for a top-level symbol heading.
pub fn anchor(title: &str) -> String {
    title.to_lowercase()
}

struct MarkdownWriter<'a> {
    ctx: &'a RenderContext<'a>,
    options: &'a RenderOptions,
    resolver: HierarchyResolver<'a>,
    lines: Vec<String>,
}

impl<'a> MarkdownWriter<'a> {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn header(&mut self) {
        self.push(format!("# {}\n", self.options.title));
        if !self.options.intro.is_empty() {
            self.push(format!("{}\n", self.options.intro));
        }
        self.push("---\n");
    }

    fn table_of_contents(&mut self, catalog: &Catalog<'_>) {
        self.push("## Table of Contents\n");
        for category in TOC_SECTIONS {
            let items = catalog.section(category);
            if items.is_empty() {
                continue;
            }
            self.push(format!("### {}\n", category.heading()));
            for symbol in items {
                self.push(format!("- [{}](#{})", symbol.title, anchor(&symbol.title)));
            }
            self.push("");
        }
        self.push("---\n");
    }

    fn type_section(&mut self, category: Category, items: &[&Symbol]) {
        if items.is_empty() {
            return;
        }
        self.push(format!("## {}\n", category.heading()));
        for symbol in items {
            self.type_entry(symbol);
        }
    }

    fn type_entry(&mut self, symbol: &Symbol) {
        self.push(format!("## {}\n", symbol.title));
        self.declaration(symbol);
        self.documentation(symbol);

        let conformances = self.resolver.conformance_titles(&symbol.precise_id);
        if !conformances.is_empty() {
            self.push(format!("**Conforms to:** {}\n", conformances.join(", ")));
        }
        let parents = self.resolver.superclass_titles(&symbol.precise_id);
        if !parents.is_empty() {
            self.push(format!("**Inherits from:** {}\n", parents.join(", ")));
        }

        let members = self.resolver.resolve_members(&symbol.precise_id);
        for (kind, group) in self.group_members(&members) {
            self.push(format!("### {}\n", kind.plural()));
            for (member, resolved) in group {
                self.member_entry(member, resolved);
            }
            self.push("");
        }

        self.push("---\n");
    }

    /// Bucket members by kind, order buckets by kind priority then display
    /// name, and sort each bucket by title.
    fn group_members<'m>(
        &self,
        members: &'m [ResolvedMember],
    ) -> Vec<(SymbolKind, Vec<(&'a Symbol, &'m ResolvedMember)>)> {
        let mut groups: IndexMap<SymbolKind, Vec<(&'a Symbol, &'m ResolvedMember)>> =
            IndexMap::new();
        for resolved in members {
            let Some(member) = self.ctx.table.get(&resolved.id) else {
                continue;
            };
            groups
                .entry(member.kind.clone())
                .or_default()
                .push((member, resolved));
        }

        let mut groups: Vec<_> = groups.into_iter().collect();
        for (_, group) in &mut groups {
            group.sort_by(|a, b| a.0.title.cmp(&b.0.title));
        }
        groups.sort_by(|(a, _), (b, _)| {
            a.member_priority()
                .cmp(&b.member_priority())
                .then_with(|| a.display_name().cmp(b.display_name()))
        });
        groups
    }

    fn member_entry(&mut self, member: &Symbol, resolved: &ResolvedMember) {
        let attribution = if resolved.inherited {
            self.ctx
                .table
                .get(&resolved.declared_in)
                .map(|protocol| format!(" *(from {})*", protocol.title))
                .unwrap_or_default()
        } else {
            String::new()
        };

        self.push(format!("#### `{}`{attribution}\n", member.title));
        self.declaration(member);
        self.documentation(member);
    }

    fn flat_section(&mut self, category: Category, items: &[&Symbol]) {
        if items.is_empty() {
            return;
        }
        self.push(format!("## {}\n", category.heading()));
        for symbol in items {
            self.push(format!("### {}\n", symbol.title));
            self.declaration(symbol);
            self.documentation(symbol);
        }
        self.push("---\n");
    }

    fn declaration(&mut self, symbol: &Symbol) {
        self.push(format!(
            "```{}\n{}\n```\n",
            self.options.fence_language,
            symbol.declaration()
        ));
    }

    fn documentation(&mut self, symbol: &Symbol) {
        let doc = symbol.doc_text();
        let undocumented = self.ctx.opted_out.contains(&symbol.precise_id)
            || doc.is_empty()
            || is_opted_out(&doc, &self.options.opt_out_marker);

        if undocumented {
            let placeholder = format!("{}\n", self.options.placeholder);
            self.push(placeholder);
        } else {
            self.push(format!("{doc}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexing::RelationshipIndex;
    use crate::symbolgraph::test_support::{documented, rel, symbol};
    use crate::symbolgraph::{Relationship, Symbol, build_symbol_table};
    use std::collections::HashSet;

    fn render(symbols: Vec<Symbol>, rels: Vec<Relationship>, nodoc: &[&str]) -> String {
        let table = build_symbol_table(symbols);
        let opted_out: HashSet<String> = nodoc.iter().map(|s| s.to_string()).collect();
        let index = RelationshipIndex::build(&rels, &opted_out, &HashSet::new());
        let ctx = RenderContext {
            table: &table,
            index: &index,
            opted_out: &opted_out,
        };
        render_reference(&ctx, &RenderOptions::for_module("Demo")).markdown
    }

    #[test]
    fn test_single_class_layout() {
        let markdown = render(
            vec![
                documented(symbol("c", "Class", "Client", "class Client"), &["A client."]),
                symbol("i", "Initializer", "init()", "init()"),
            ],
            vec![rel("i", "memberOf", "c")],
            &[],
        );

        let expected = "\
# Demo Public API Reference

This document describes the public API surface of the `Demo` module.

---

## Table of Contents

### Classes

- [Client](#client)

---

## Classes

## Client

```swift
class Client
```

A client.

### Initializers

#### `init()`

```swift
init()
```

*Not documented.*


---
";
        assert_eq!(markdown, expected);
    }

    #[test]
    fn test_member_groups_follow_kind_priority() {
        let markdown = render(
            vec![
                symbol("e", "Enumeration", "State", "enum State"),
                symbol("c1", "Case", "idle", "case idle"),
                symbol("m", "Instance Method", "describe()", "func describe()"),
                symbol("tp", "Type Property", "all", "static var all"),
                symbol("sub", "Instance Subscript", "subscript(_:)", "subscript(i: Int)"),
                symbol("alias", "Associated Type", "Element", "associatedtype Element"),
            ],
            vec![
                rel("c1", "memberOf", "e"),
                rel("sub", "memberOf", "e"),
                rel("m", "memberOf", "e"),
                rel("alias", "memberOf", "e"),
                rel("tp", "memberOf", "e"),
            ],
            &[],
        );

        let order: Vec<&str> = markdown
            .lines()
            .filter(|l| l.starts_with("### "))
            .collect();
        assert_eq!(
            order,
            vec![
                "### Enumerations",
                "### Type Properties",
                "### Instance Methods",
                "### Cases",
                "### Associated Types",
                "### Instance Subscripts",
            ]
        );
    }

    #[test]
    fn test_members_sorted_by_title() {
        let markdown = render(
            vec![
                symbol("s", "Structure", "Options", "struct Options"),
                symbol("b", "Instance Property", "beta", "var beta: Int"),
                symbol("a", "Instance Property", "alpha", "var alpha: Int"),
                symbol("z", "Instance Property", "Zed", "var Zed: Int"),
            ],
            vec![
                rel("b", "memberOf", "s"),
                rel("a", "memberOf", "s"),
                rel("z", "memberOf", "s"),
            ],
            &[],
        );

        let titles: Vec<&str> = markdown
            .lines()
            .filter(|l| l.starts_with("#### "))
            .collect();
        assert_eq!(titles, vec!["#### `Zed`", "#### `alpha`", "#### `beta`"]);
    }

    #[test]
    fn test_conformance_and_inheritance_lines() {
        let markdown = render(
            vec![
                symbol("base", "Class", "Base", "class Base"),
                symbol("c", "Class", "Child", "class Child: Base"),
                symbol("p", "Protocol", "Named", "protocol Named"),
                symbol("q", "Protocol", "Ordered", "protocol Ordered"),
            ],
            vec![
                rel("c", "inheritsFrom", "base"),
                rel("c", "conformsTo", "q"),
                rel("c", "conformsTo", "s:s8SendableP"),
                rel("c", "conformsTo", "p"),
            ],
            &[],
        );

        assert!(markdown.contains("**Conforms to:** Ordered, Named\n"));
        assert!(markdown.contains("**Inherits from:** Base\n"));
    }

    #[test]
    fn test_opted_out_doc_with_trailing_text_uses_placeholder() {
        let markdown = render(
            vec![
                documented(
                    symbol("c", "Class", "Legacy", "class Legacy"),
                    &[":nodoc: kept for source compatibility"],
                ),
            ],
            vec![],
            &[],
        );

        assert!(markdown.contains("```swift\nclass Legacy\n```\n\n*Not documented.*\n"));
        assert!(!markdown.contains("source compatibility"));
    }

    #[test]
    fn test_opted_out_id_uses_placeholder_even_with_docs() {
        let markdown = render(
            vec![documented(symbol("c", "Class", "Hidden", "class Hidden"), &["Real docs."])],
            vec![],
            &["c"],
        );
        assert!(markdown.contains("*Not documented.*"));
        assert!(!markdown.contains("Real docs."));
    }

    #[test]
    fn test_flat_sections_after_types() {
        let markdown = render(
            vec![
                symbol("f2", "Function", "warn(_:)", "func warn(_ s: String)"),
                symbol("t", "Type Alias", "Callback", "typealias Callback = () -> Void"),
                documented(symbol("f1", "Function", "log(_:)", "func log(_ s: String)"), &["Logs."]),
                symbol("v", "Global Variable", "version", "let version: String"),
                symbol("c", "Class", "Client", "class Client"),
            ],
            vec![],
            &[],
        );

        let headings: Vec<&str> = markdown
            .lines()
            .filter(|l| l.starts_with("## ") || l.starts_with("### "))
            .collect();
        assert_eq!(
            headings,
            vec![
                "## Table of Contents",
                "### Classes",
                "### Type Aliases",
                "## Classes",
                "## Client",
                "## Type Aliases",
                "### Callback",
                "## Global Functions",
                "### log(_:)",
                "### warn(_:)",
                "## Global Variables",
                "### version",
            ]
        );
        assert!(markdown.contains("### log(_:)\n\n```swift\nfunc log(_ s: String)\n```\n\nLogs.\n"));
    }

    #[test]
    fn test_inherited_attribution_suffix() {
        let markdown = render(
            vec![
                symbol("c", "Class", "Channel", "class Channel"),
                symbol("p", "Protocol", "Publishing", "protocol Publishing"),
                symbol("r", "Instance Method", "publish()", "func publish()"),
            ],
            vec![rel("r", "requirementOf", "p"), rel("c", "conformsTo", "p")],
            &[],
        );
        assert!(markdown.contains("#### `publish()` *(from Publishing)*\n"));
    }

    #[test]
    fn test_empty_intro_is_omitted() {
        let table = build_symbol_table(vec![]);
        let index = RelationshipIndex::default();
        let opted_out = HashSet::new();
        let ctx = RenderContext {
            table: &table,
            index: &index,
            opted_out: &opted_out,
        };
        let mut options = RenderOptions::for_module("Demo");
        options.intro.clear();

        let markdown = render_reference(&ctx, &options).markdown;
        assert_eq!(
            markdown,
            "# Demo Public API Reference\n\n---\n\n## Table of Contents\n\n---\n"
        );
    }

    #[test]
    fn test_anchor_is_lowercased_title() {
        assert_eq!(anchor("ARTRealtimeChannel"), "artrealtimechannel");
    }
}
