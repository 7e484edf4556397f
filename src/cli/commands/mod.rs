//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod init;
pub mod members;
pub mod render;

use std::process::ExitCode;

use crate::config::Settings;
use crate::error::{SymdocError, SymdocResult};
use crate::io::Envelope;
use crate::pipeline::RunConfig;
use crate::symbolgraph::discover_primary_graphs;

/// Turn settings (with CLI overrides already applied) into a run.
///
/// Explicit primary graphs win; otherwise `graph_dir` is searched for
/// `<module>*.symbols.json`.
pub fn resolve_run_config(settings: &Settings) -> SymdocResult<RunConfig> {
    let primary_graphs = if !settings.inputs.primary.is_empty() {
        settings.inputs.primary.clone()
    } else if let Some(dir) = &settings.inputs.graph_dir {
        discover_primary_graphs(dir, &settings.module_name)?
    } else {
        return Err(SymdocError::MissingInput(
            "no primary symbol graphs given (use --primary or --graph-dir)".to_string(),
        ));
    };

    let secondary_graph = settings.inputs.secondary.clone().ok_or_else(|| {
        SymdocError::MissingInput("no secondary symbol graph given (use --secondary)".to_string())
    })?;

    Ok(RunConfig {
        module_name: settings.module_name.clone(),
        primary_graphs,
        secondary_graph,
        umbrella_header: settings.inputs.umbrella_header.clone(),
        output: settings.output.path.clone(),
        render: settings.render_options(),
    })
}

/// Print a pipeline failure and return the failing exit code.
pub(crate) fn report_error(err: &SymdocError, json: bool) -> ExitCode {
    if json {
        let envelope: Envelope<()> = Envelope::from_error(err);
        match envelope.to_json() {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Error: failed to serialize output: {e}"),
        }
    } else {
        eprintln!("Error: {err}");
        if let Some(hint) = err.suggestion() {
            eprintln!("  Suggestion: {hint}");
        }
    }
    ExitCode::FAILURE
}
