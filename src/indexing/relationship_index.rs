//! Lookup tables derived from the relationship list.

use std::collections::{HashMap, HashSet};

use crate::symbolgraph::Relationship;
use crate::types::RelationKind;

/// Structural edges grouped by the symbol they describe.
///
/// Lists keep relationship order and may contain duplicates; consumers treat
/// membership as existence.
#[derive(Debug, Default, Clone)]
pub struct RelationshipIndex {
    /// type id -> member ids
    members_of: HashMap<String, Vec<String>>,
    /// protocol id -> requirement ids
    requirements_of: HashMap<String, Vec<String>>,
    /// type id -> protocol ids
    conforms_to: HashMap<String, Vec<String>>,
    /// type id -> superclass ids
    inherits_from: HashMap<String, Vec<String>>,
    dropped: usize,
}

impl RelationshipIndex {
    /// Index `relationships`, skipping any edge that touches an opted-out or
    /// excluded id.
    pub fn build(
        relationships: &[Relationship],
        opted_out: &HashSet<String>,
        excluded: &HashSet<String>,
    ) -> Self {
        let mut index = Self::default();

        for rel in relationships {
            let hidden = |id: &str| opted_out.contains(id) || excluded.contains(id);
            if hidden(&rel.source) || hidden(&rel.target) {
                index.dropped += 1;
                continue;
            }

            let (table, key, value) = match rel.kind {
                RelationKind::MemberOf => (&mut index.members_of, &rel.target, &rel.source),
                RelationKind::RequirementOf => {
                    (&mut index.requirements_of, &rel.target, &rel.source)
                }
                RelationKind::ConformsTo => (&mut index.conforms_to, &rel.source, &rel.target),
                RelationKind::InheritsFrom => {
                    (&mut index.inherits_from, &rel.source, &rel.target)
                }
                RelationKind::Other(ref kind) => {
                    tracing::trace!("[index] ignoring {kind} edge {} -> {}", rel.source, rel.target);
                    continue;
                }
            };
            table.entry(key.clone()).or_default().push(value.clone());
        }

        tracing::debug!(
            "[index] {} member lists, {} requirement lists, {} conformance lists, {} inheritance lists ({} edges dropped)",
            index.members_of.len(),
            index.requirements_of.len(),
            index.conforms_to.len(),
            index.inherits_from.len(),
            index.dropped
        );
        index
    }

    pub fn members_of(&self, type_id: &str) -> &[String] {
        Self::lookup(&self.members_of, type_id)
    }

    pub fn requirements_of(&self, protocol_id: &str) -> &[String] {
        Self::lookup(&self.requirements_of, protocol_id)
    }

    pub fn conforms_to(&self, type_id: &str) -> &[String] {
        Self::lookup(&self.conforms_to, type_id)
    }

    pub fn inherits_from(&self, type_id: &str) -> &[String] {
        Self::lookup(&self.inherits_from, type_id)
    }

    /// Number of relationships skipped because an endpoint was hidden.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Whether `id` appears anywhere in the tables, as key or value.
    #[cfg(test)]
    pub(crate) fn mentions(&self, id: &str) -> bool {
        [
            &self.members_of,
            &self.requirements_of,
            &self.conforms_to,
            &self.inherits_from,
        ]
        .iter()
        .any(|table| {
            table.contains_key(id) || table.values().any(|ids| ids.iter().any(|v| v == id))
        })
    }

    fn lookup<'a>(table: &'a HashMap<String, Vec<String>>, id: &str) -> &'a [String] {
        table.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
