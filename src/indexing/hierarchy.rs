use std::collections::HashSet;

use serde::Serialize;

use super::RelationshipIndex;
use crate::symbolgraph::SymbolTable;
use crate::types::SymbolKind;

/// A member as it should appear in a type's section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMember {
    pub id: String,
    /// The type itself for direct members, otherwise the first protocol the
    /// member was reached through.
    pub declared_in: String,
    pub inherited: bool,
}

/// Resolves the documented member set of a type, including requirements it
/// picks up from the protocols it conforms to.
#[derive(Debug)]
pub struct HierarchyResolver<'a> {
    table: &'a SymbolTable,
    index: &'a RelationshipIndex,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(table: &'a SymbolTable, index: &'a RelationshipIndex) -> Self {
        Self { table, index }
    }

    /// Direct members first (relationship order), then inherited ones in
    /// traversal order. Ids missing from the table contribute nothing.
    pub fn resolve_members(&self, type_id: &str) -> Vec<ResolvedMember> {
        let Some(owner) = self.table.get(type_id) else {
            return Vec::new();
        };

        let mut direct_ids: Vec<&str> = self
            .index
            .members_of(type_id)
            .iter()
            .map(String::as_str)
            .collect();
        if owner.kind == SymbolKind::Protocol {
            direct_ids.extend(self.index.requirements_of(type_id).iter().map(String::as_str));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut resolved: Vec<ResolvedMember> = direct_ids
            .into_iter()
            .filter(|id| self.table.contains_key(*id) && seen.insert(*id))
            .map(|id| ResolvedMember {
                id: id.to_string(),
                declared_in: type_id.to_string(),
                inherited: false,
            })
            .collect();

        if !owner.kind.inherits_protocol_members() {
            return resolved;
        }

        // A class that redeclares a requirement with its own signature shows
        // its own declaration only.
        let direct_decls: HashSet<String> = resolved
            .iter()
            .filter_map(|m| self.table.get(&m.id))
            .map(|s| s.declaration())
            .collect();

        let mut visited: HashSet<&str> = HashSet::new();
        let mut candidates: Vec<(&str, &str)> = Vec::new();
        for protocol_id in self.index.conforms_to(type_id) {
            self.collect_protocol_members(protocol_id, &mut visited, &mut candidates);
        }

        for (member_id, protocol_id) in candidates {
            if seen.contains(member_id) {
                continue;
            }
            let Some(member) = self.table.get(member_id) else {
                continue;
            };
            if direct_decls.contains(&member.declaration()) {
                tracing::trace!(
                    "[hierarchy] {type_id}: {member_id} overridden by a direct declaration"
                );
                continue;
            }
            seen.insert(member_id);
            resolved.push(ResolvedMember {
                id: member_id.to_string(),
                declared_in: protocol_id.to_string(),
                inherited: true,
            });
        }

        resolved
    }

    /// Depth-first walk over a protocol and everything it conforms to.
    ///
    /// Pushes `(member, owning protocol)` pairs: requirements, then members,
    /// then the parents' contributions. `visited` holds protocol ids for the
    /// whole walk, so conformance cycles terminate.
    fn collect_protocol_members(
        &self,
        protocol_id: &'a str,
        visited: &mut HashSet<&'a str>,
        out: &mut Vec<(&'a str, &'a str)>,
    ) {
        if !visited.insert(protocol_id) {
            return;
        }

        let own = self
            .index
            .requirements_of(protocol_id)
            .iter()
            .chain(self.index.members_of(protocol_id))
            .map(String::as_str)
            .filter(|id| self.table.contains_key(*id));
        out.extend(own.map(|id| (id, protocol_id)));

        for parent in self.index.conforms_to(protocol_id) {
            self.collect_protocol_members(parent, visited, out);
        }
    }

    /// Titles of the protocols `type_id` conforms to, in relationship order.
    pub fn conformance_titles(&self, type_id: &str) -> Vec<&'a str> {
        self.titles(self.index.conforms_to(type_id))
    }

    /// Titles of the superclasses of `type_id`, in relationship order.
    pub fn superclass_titles(&self, type_id: &str) -> Vec<&'a str> {
        self.titles(self.index.inherits_from(type_id))
    }

    fn titles(&self, ids: &'a [String]) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.table.get(id))
            .map(|s| s.title.as_str())
            .collect()
    }
}
