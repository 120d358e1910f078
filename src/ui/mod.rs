//! User interface module - what a run prints.
//!
//! - `formatter` - single-line primitives
//! - This module - the run banner and the final report

use console::style;

use crate::cli::{RunOutcome, WorkflowResult};
use crate::config::RunOptions;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{display_boundary_warning, display_error, display_status, display_success};

use crate::boundary::BoundaryWarning;
use formatter::{parameter_line, short_message};

/// Print the parameters this run will use.
pub fn display_run_parameters(options: &RunOptions) {
    println!("{}", style("=== Run parameters ===").bold().blue());
    println!("{}", parameter_line("RepoPath", &options.repo_path.display().to_string()));
    println!("{}", parameter_line("Branch", &options.branch));
    println!("{}", parameter_line("Scheme", options.scheme.name()));
    println!("{}", parameter_line("Prefix", &options.naming.prefix));
    println!("{}", parameter_line("Verbose", &options.verbose.to_string()));
    println!("{}", parameter_line("DryRun", &options.dry_run.to_string()));
    println!("{}", style("Metadata:").yellow());
    if options.meta.is_empty() {
        println!("  {}", style("(none)").cyan());
    } else {
        for (key, value) in &options.meta {
            println!("  • {} = {}", style(key).cyan(), style(value).green());
        }
    }
}

/// Print the outcome of a finished run.
pub fn display_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::NothingToRelease { branch, scanned } => {
            display_boundary_warning(&BoundaryWarning::NoBaselineTag {
                branch: branch.clone(),
                scanned: *scanned,
            });
        }
        RunOutcome::Published(result) => display_published(result),
    }
}

fn display_published(result: &WorkflowResult) {
    let resolution = &result.resolution;
    display_status(&format!(
        "Baseline {} on branch '{}', {} new commit(s)",
        resolution.baseline_tag,
        result.branch,
        resolution.pending.len()
    ));
    display_success(&format!(
        "Next version: {} -> {}",
        resolution.baseline_version, resolution.next_version
    ));

    if resolution.is_unchanged() {
        display_boundary_warning(&BoundaryWarning::UnchangedVersion {
            tag: resolution.tag.version.clone(),
            commit_hash: resolution.tag.commit_hash.clone(),
        });
    }

    for tag in &result.report.created {
        display_success(&format!(
            "Created tag {} at {} ({})",
            tag.version,
            tag.commit_hash,
            short_message(&tag.message, 60)
        ));
    }

    match &result.report.push_output {
        Some(output) if result.report.pushed => {
            display_success("Pushed tags to remote");
            let output = output.trim();
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        _ => display_status("Dry run: tags created locally, push skipped"),
    }
}
