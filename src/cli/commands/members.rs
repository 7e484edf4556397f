//! Members command: show what a type's section would list.

use std::process::ExitCode;
use std::time::Instant;

use serde::Serialize;

use super::{report_error, resolve_run_config};
use crate::config::Settings;
use crate::io::{EntityType, Envelope};
use crate::pipeline::{PreparedGraph, load_prepared};

/// One resolved member, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct MemberRow {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub declaration: String,
    pub inherited: bool,
    /// Title of the protocol an inherited member came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Resolve `query` (id or title) to its member rows, or `None` if no such
/// symbol exists.
pub fn member_rows(prepared: &PreparedGraph, query: &str) -> Option<(String, Vec<MemberRow>)> {
    let owner = prepared.find_symbol(query)?;
    let rows = prepared
        .resolve_members(&owner.precise_id)
        .into_iter()
        .filter_map(|member| {
            let symbol = prepared.table.get(&member.id)?;
            let from = if member.inherited {
                prepared
                    .table
                    .get(&member.declared_in)
                    .map(|p| p.title.clone())
            } else {
                None
            };
            Some(MemberRow {
                id: member.id.clone(),
                title: symbol.title.clone(),
                kind: symbol.kind.display_name().to_string(),
                declaration: symbol.declaration(),
                inherited: member.inherited,
                from,
            })
        })
        .collect();
    Some((format!("{} ({})", owner.title, owner.kind), rows))
}

pub fn run_members(settings: &Settings, query: &str, json: bool) -> ExitCode {
    let started = Instant::now();

    let prepared = match resolve_run_config(settings).and_then(|config| load_prepared(&config)) {
        Ok(prepared) => prepared,
        Err(e) => return report_error(&e, json),
    };

    let Some((heading, rows)) = member_rows(&prepared, query) else {
        if json {
            let envelope: Envelope<()> =
                Envelope::not_found(format!("Type '{query}' not found")).with_query(query);
            if let Ok(text) = envelope.to_json() {
                println!("{text}");
            }
        } else {
            eprintln!("Type '{query}' not found");
        }
        return ExitCode::FAILURE;
    };

    if json {
        let count = rows.len();
        let envelope = Envelope::success(rows)
            .with_entity_type(EntityType::Members)
            .with_message(heading)
            .with_count(count)
            .with_query(query)
            .with_duration_ms(started.elapsed().as_millis() as u64);
        match envelope.to_json() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: failed to serialize output: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("{heading}");
    if rows.is_empty() {
        println!("  (no members)");
    }
    for row in &rows {
        let mut line = format!("  {:<20} {}", row.kind, row.title);
        if let Some(from) = &row.from {
            line.push_str(&format!("  (from {from})"));
        }
        println!("{line}");
    }

    ExitCode::SUCCESS
}
