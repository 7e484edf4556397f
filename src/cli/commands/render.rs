//! Render command: produce the Markdown reference file.

use std::process::ExitCode;
use std::time::Instant;

use super::{report_error, resolve_run_config};
use crate::config::Settings;
use crate::io::{EntityType, Envelope};
use crate::pipeline::{RunConfig, RunStats, generate};

pub fn run_render(settings: &Settings, json: bool) -> ExitCode {
    let started = Instant::now();

    let outcome = resolve_run_config(settings)
        .and_then(|config| generate(&config).map(|stats| (config, stats)));

    let (config, stats) = match outcome {
        Ok(done) => done,
        Err(e) => return report_error(&e, json),
    };

    if json {
        let envelope = Envelope::success(stats)
            .with_entity_type(EntityType::RunStats)
            .with_message(format!("Generated {}", config.output.display()))
            .with_duration_ms(started.elapsed().as_millis() as u64);
        match envelope.to_json() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: failed to serialize output: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&config, &stats);
    }

    ExitCode::SUCCESS
}

fn print_summary(config: &RunConfig, stats: &RunStats) {
    let s = &stats.sections;
    if stats.merged_doc_comments > 0 {
        eprintln!(
            "Merged {} doc comments from the header symbol graph",
            stats.merged_doc_comments
        );
    }
    if stats.excluded_symbols > 0 {
        eprintln!(
            "Excluded {} symbols declared in internal headers",
            stats.excluded_symbols
        );
    }
    eprintln!("Generated {}", config.output.display());
    eprintln!(
        "  {} classes, {} protocols, {} enums, {} structs, {} type aliases",
        s.classes, s.protocols, s.enumerations, s.structures, s.type_aliases
    );
    eprintln!(
        "  {} global functions, {} global variables",
        s.global_functions, s.global_variables
    );
    eprintln!(
        "  {} total symbols (after filtering {} opted out)",
        stats.total_symbols, stats.opted_out_symbols
    );
}
