//! Merge compiler symbol graphs into a Markdown API reference.
//!
//! The pipeline loads primary (Swift) symbol graphs and a secondary
//! (Objective-C header) graph, copies header documentation onto the primary
//! symbols, drops internal and opted-out declarations, resolves each type's
//! members through its protocol conformances, and renders one deterministic
//! Markdown document.

pub mod cli;
pub mod config;
pub mod error;
pub mod indexing;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod symbolgraph;
pub mod types;

pub use config::Settings;
pub use error::{SymdocError, SymdocResult};
pub use indexing::{HierarchyResolver, RelationshipIndex, ResolvedMember};
pub use pipeline::{PreparedGraph, RunConfig, RunStats, generate, load_prepared};
pub use render::{RenderOptions, RenderedReference, render_reference};
pub use symbolgraph::{DocComment, Relationship, Symbol, SymbolTable};
pub use types::{Category, RelationKind, SymbolKind};
