//! Wire records for symbol-graph JSON documents.
//!
//! These mirror only the fields the pipeline reads. Everything else in the
//! extractor output (`accessLevel`, `pathComponents`, `functionSignature`, ...)
//! is ignored by serde. Conversion into the domain types happens once, here,
//! so the rest of the crate never touches loosely-shaped JSON.

use serde::Deserialize;

use super::{DocComment, Relationship, Symbol};
use crate::types::{RelationKind, SymbolKind};

#[derive(Debug, Deserialize)]
pub(crate) struct GraphRecord {
    pub symbols: Vec<SymbolRecord>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SymbolRecord {
    pub identifier: IdentifierRecord,
    pub kind: KindRecord,
    pub names: NamesRecord,
    #[serde(default)]
    pub declaration_fragments: Vec<FragmentRecord>,
    #[serde(default)]
    pub doc_comment: Option<DocCommentRecord>,
    #[serde(default)]
    pub location: Option<LocationRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdentifierRecord {
    pub precise: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct KindRecord {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamesRecord {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FragmentRecord {
    #[serde(default)]
    pub spelling: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocCommentRecord {
    #[serde(default)]
    pub lines: Vec<DocLineRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocLineRecord {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationRecord {
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelationshipRecord {
    pub source: String,
    pub target: String,
    pub kind: String,
}

impl From<SymbolRecord> for Symbol {
    fn from(record: SymbolRecord) -> Self {
        Symbol {
            precise_id: record.identifier.precise,
            kind: SymbolKind::from_display_name(&record.kind.display_name),
            title: record.names.title,
            declaration_fragments: record
                .declaration_fragments
                .into_iter()
                .map(|f| f.spelling)
                .collect(),
            doc_comment: record.doc_comment.map(|doc| DocComment {
                lines: doc.lines.into_iter().map(|l| l.text).collect(),
            }),
            source_location: record
                .location
                .map(|loc| loc.uri)
                .filter(|uri| !uri.is_empty()),
        }
    }
}

impl From<RelationshipRecord> for Relationship {
    fn from(record: RelationshipRecord) -> Self {
        Relationship {
            source: record.source,
            target: record.target,
            kind: RelationKind::from_wire(&record.kind),
        }
    }
}
