//! Visibility filtering: internal-header exclusion and opt-out markers.
//!
//! Two independent id sets come out of this module:
//! - the exclusion set, removed from the working table before indexing;
//! - the opt-out set, kept for structure but rendered as undocumented.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use regex::Regex;

use crate::symbolgraph::{Symbol, SymbolTable};

/// Collect header file names imported by an umbrella header.
///
/// Only lines of the form `#import <Namespace/Header.h>` are recognized
/// (after trimming). Quoted includes and `@import` are not. Preprocessor
/// conditionals are not evaluated, so an import inside `#if` still counts.
pub fn parse_umbrella_header(text: &str, namespace: &str) -> BTreeSet<String> {
    let pattern = format!(r"^#import\s+<{}/(.+\.h)>", regex::escape(namespace));
    let Ok(re) = Regex::new(&pattern) else {
        return BTreeSet::new();
    };

    text.lines()
        .filter_map(|line| re.captures(line.trim()))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Read and parse the umbrella header, if one is configured.
///
/// A missing or unreadable file disables header-based exclusion instead of
/// failing the run.
pub fn load_internal_headers(path: Option<&Path>, namespace: &str) -> BTreeSet<String> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return BTreeSet::new();
    };

    match std::fs::read_to_string(path) {
        Ok(text) => {
            let headers = parse_umbrella_header(&text, namespace);
            tracing::debug!(
                "[visibility] {} lists {} internal headers",
                path.display(),
                headers.len()
            );
            headers
        }
        Err(e) => {
            tracing::warn!(
                "[visibility] cannot read umbrella header {}: {e}; skipping exclusion",
                path.display()
            );
            BTreeSet::new()
        }
    }
}

/// Ids of secondary symbols declared in an internal header that also exist in
/// the primary table.
pub fn excluded_ids(
    secondary: &[Symbol],
    internal_headers: &BTreeSet<String>,
    table: &SymbolTable,
) -> HashSet<String> {
    if internal_headers.is_empty() {
        return HashSet::new();
    }

    secondary
        .iter()
        .filter(|s| {
            s.location_file_name()
                .is_some_and(|name| internal_headers.contains(name))
        })
        .filter(|s| table.contains_key(&s.precise_id))
        .map(|s| s.precise_id.clone())
        .collect()
}

/// Whether documentation text carries the opt-out marker.
///
/// Matches the bare marker and the marker followed by more text.
pub fn is_opted_out(doc_text: &str, marker: &str) -> bool {
    !marker.is_empty() && doc_text.trim().starts_with(marker)
}

/// Opt-outs declared in the secondary graph.
///
/// Their documentation is never copied, but the marker still applies to the
/// matching primary symbol.
pub fn secondary_opt_outs(secondary: &[Symbol], marker: &str) -> HashSet<String> {
    secondary
        .iter()
        .filter(|s| {
            s.doc_comment
                .as_ref()
                .is_some_and(|doc| is_opted_out(&doc.lines.join(" "), marker))
        })
        .map(|s| s.precise_id.clone())
        .collect()
}

/// Opt-outs among the working symbols, checked after the doc merge.
pub fn primary_opt_outs(table: &SymbolTable, marker: &str) -> HashSet<String> {
    table
        .values()
        .filter(|s| is_opted_out(&s.doc_text(), marker))
        .map(|s| s.precise_id.clone())
        .collect()
}
