pub mod doc_merge;
pub mod hierarchy;
pub mod relationship_index;
pub mod visibility;

pub use doc_merge::merge_doc_comments;
pub use hierarchy::{HierarchyResolver, ResolvedMember};
pub use relationship_index::RelationshipIndex;
pub use visibility::{
    excluded_ids, is_opted_out, load_internal_headers, parse_umbrella_header, primary_opt_outs,
    secondary_opt_outs,
};
