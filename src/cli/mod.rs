//! Command line workflow, decoupled from clap argument parsing.

pub mod orchestration;

pub use orchestration::{publish_tags, run_autotag, PublishReport, RunOutcome, WorkflowResult};
