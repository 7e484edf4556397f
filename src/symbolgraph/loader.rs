//! Reading symbol-graph documents from disk.

use std::path::{Path, PathBuf};

use super::records::GraphRecord;
use super::{Relationship, Symbol};
use crate::error::{SymdocError, SymdocResult};

/// One parsed symbol-graph document.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    pub symbols: Vec<Symbol>,
    pub relationships: Vec<Relationship>,
}

/// Everything a pipeline run reads.
///
/// Primary graphs are concatenated in load order without deduplication. The
/// secondary graph's relationships are not used.
#[derive(Debug, Clone, Default)]
pub struct LoadedGraphs {
    pub symbols: Vec<Symbol>,
    pub relationships: Vec<Relationship>,
    pub secondary: Vec<Symbol>,
}

/// Parse a symbol-graph document that is already in memory.
///
/// `path` is only used for error reporting.
pub fn parse_graph(path: &Path, text: &str) -> SymdocResult<SymbolGraph> {
    let record: GraphRecord =
        serde_json::from_str(text).map_err(|e| SymdocError::malformed(path, e))?;

    Ok(SymbolGraph {
        symbols: record.symbols.into_iter().map(Symbol::from).collect(),
        relationships: record
            .relationships
            .into_iter()
            .map(Relationship::from)
            .collect(),
    })
}

pub fn load_graph(path: &Path) -> SymdocResult<SymbolGraph> {
    let text = std::fs::read_to_string(path).map_err(|e| SymdocError::io(path, e))?;
    let graph = parse_graph(path, &text)?;
    tracing::debug!(
        "[loader] {}: {} symbols, {} relationships",
        path.display(),
        graph.symbols.len(),
        graph.relationships.len()
    );
    Ok(graph)
}

/// Load every primary graph plus the secondary graph.
///
/// All files are parsed before anything is returned, so a malformed document
/// aborts the run before any output exists.
pub fn load_graphs(primary: &[PathBuf], secondary: &Path) -> SymdocResult<LoadedGraphs> {
    if primary.is_empty() {
        return Err(SymdocError::MissingInput(
            "no primary symbol graphs were given".to_string(),
        ));
    }

    let mut loaded = LoadedGraphs::default();
    for path in primary {
        let graph = load_graph(path)?;
        loaded.symbols.extend(graph.symbols);
        loaded.relationships.extend(graph.relationships);
    }
    loaded.secondary = load_graph(secondary)?.symbols;

    tracing::info!(
        "[loader] loaded {} primary symbols, {} relationships, {} secondary symbols",
        loaded.symbols.len(),
        loaded.relationships.len(),
        loaded.secondary.len()
    );
    Ok(loaded)
}

/// Find the primary graphs the extractor wrote for `module` in `dir`.
///
/// The extractor emits `<Module>.symbols.json` plus one
/// `<Module>@<Extended>.symbols.json` per extended module. Results are sorted
/// so load order (and therefore id collision resolution) is stable.
pub fn discover_primary_graphs(dir: &Path, module: &str) -> SymdocResult<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}*.symbols.json",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(module)
    );

    let entries = glob::glob(&pattern).map_err(|e| SymdocError::Pattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(SymdocError::io(path, e.into_error()));
            }
        }
    }
    paths.sort();
    Ok(paths)
}
