//! End-to-end generation run.
//!
//! load -> merge docs -> filter -> index -> resolve/render -> write.
//! Everything is rebuilt per run from a [`RunConfig`]; nothing is cached or
//! shared between runs.

use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{SymdocError, SymdocResult};
use crate::indexing::{
    HierarchyResolver, RelationshipIndex, ResolvedMember, excluded_ids, load_internal_headers,
    merge_doc_comments, primary_opt_outs, secondary_opt_outs,
};
use crate::render::{
    RenderContext, RenderOptions, RenderedReference, SectionCounts, render_reference,
};
use crate::symbolgraph::{LoadedGraphs, Symbol, SymbolTable, build_symbol_table, load_graphs};

/// Inputs and knobs for one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Module being documented; also the umbrella header's import namespace
    pub module_name: String,
    pub primary_graphs: Vec<PathBuf>,
    pub secondary_graph: PathBuf,
    pub umbrella_header: Option<PathBuf>,
    pub output: PathBuf,
    pub render: RenderOptions,
}

/// Summary of a run, reported alongside (never inside) the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub sections: SectionCounts,
    /// Symbols left after exclusion
    pub total_symbols: usize,
    pub merged_doc_comments: usize,
    pub excluded_symbols: usize,
    pub opted_out_symbols: usize,
    pub dropped_relationships: usize,
}

/// The merged, filtered and indexed symbol set, ready to render or query.
#[derive(Debug)]
pub struct PreparedGraph {
    pub table: SymbolTable,
    pub index: RelationshipIndex,
    pub opted_out: HashSet<String>,
    pub excluded: HashSet<String>,
    pub merged_doc_comments: usize,
}

impl PreparedGraph {
    /// Run the merge, filter and index stages over loaded graphs.
    pub fn prepare(
        loaded: LoadedGraphs,
        internal_headers: &BTreeSet<String>,
        opt_out_marker: &str,
    ) -> Self {
        let LoadedGraphs {
            mut symbols,
            relationships,
            secondary,
        } = loaded;

        let merged_doc_comments = merge_doc_comments(&mut symbols, &secondary);
        let mut table = build_symbol_table(symbols);

        let excluded = excluded_ids(&secondary, internal_headers, &table);
        for id in &excluded {
            table.shift_remove(id);
        }
        if !excluded.is_empty() {
            tracing::info!("[filter] excluded {} internal symbols", excluded.len());
        }

        let mut opted_out = secondary_opt_outs(&secondary, opt_out_marker);
        opted_out.extend(primary_opt_outs(&table, opt_out_marker));
        tracing::debug!("[filter] {} opted-out ids", opted_out.len());

        let index = RelationshipIndex::build(&relationships, &opted_out, &excluded);

        Self {
            table,
            index,
            opted_out,
            excluded,
            merged_doc_comments,
        }
    }

    pub fn context(&self) -> RenderContext<'_> {
        RenderContext {
            table: &self.table,
            index: &self.index,
            opted_out: &self.opted_out,
        }
    }

    pub fn render(&self, options: &RenderOptions) -> (RenderedReference, RunStats) {
        let rendered = render_reference(&self.context(), options);
        let stats = RunStats {
            sections: rendered.counts,
            total_symbols: self.table.len(),
            merged_doc_comments: self.merged_doc_comments,
            excluded_symbols: self.excluded.len(),
            opted_out_symbols: self.opted_out.len(),
            dropped_relationships: self.index.dropped_count(),
        };
        (rendered, stats)
    }

    /// Look a symbol up by precise id, falling back to the first symbol whose
    /// title matches.
    pub fn find_symbol(&self, query: &str) -> Option<&Symbol> {
        self.table
            .get(query)
            .or_else(|| self.table.values().find(|s| s.title == query))
    }

    pub fn resolve_members(&self, type_id: &str) -> Vec<ResolvedMember> {
        HierarchyResolver::new(&self.table, &self.index).resolve_members(type_id)
    }
}

/// Load the inputs named by `config` and prepare them.
pub fn load_prepared(config: &RunConfig) -> SymdocResult<PreparedGraph> {
    let loaded = load_graphs(&config.primary_graphs, &config.secondary_graph)?;
    let headers = load_internal_headers(config.umbrella_header.as_deref(), &config.module_name);
    Ok(PreparedGraph::prepare(
        loaded,
        &headers,
        &config.render.opt_out_marker,
    ))
}

/// Run the whole pipeline and write the document to `config.output`.
///
/// Parsing happens before anything is written, so a malformed input leaves
/// any previous output untouched.
pub fn generate(config: &RunConfig) -> SymdocResult<RunStats> {
    let prepared = load_prepared(config)?;
    let (rendered, stats) = prepared.render(&config.render);
    write_output(&config.output, &rendered.markdown)?;

    log_stats(&config.output, &stats);
    Ok(stats)
}

/// Replace `path` with `contents` via a temp file in the same directory.
pub fn write_output(path: &Path, contents: &str) -> SymdocResult<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| SymdocError::io(&parent, e))?;

    let mut file =
        tempfile::NamedTempFile::new_in(&parent).map_err(|e| SymdocError::io(&parent, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| SymdocError::io(path, e))?;
    file.persist(path)
        .map_err(|e| SymdocError::io(path, e.error))?;
    Ok(())
}

fn log_stats(output: &Path, stats: &RunStats) {
    let s = &stats.sections;
    tracing::info!("[render] generated {}", output.display());
    tracing::info!(
        "[render] {} classes, {} protocols, {} enums, {} structs, {} type aliases",
        s.classes,
        s.protocols,
        s.enumerations,
        s.structures,
        s.type_aliases
    );
    tracing::info!(
        "[render] {} global functions, {} global variables",
        s.global_functions,
        s.global_variables
    );
    tracing::info!(
        "[render] {} total symbols (after filtering {} opted out)",
        stats.total_symbols,
        stats.opted_out_symbols
    );
}
