use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autotag::cli::run_autotag;
use autotag::config::{self, Overrides};
use autotag::git::Git2Repository;
use autotag::ui;

#[derive(clap::Parser)]
#[command(
    name = "autotag",
    version,
    about = "Compute the next semantic version from commit markers and publish it as a git tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Path of the git repository to operate on [default: .]")]
    repo: Option<PathBuf>,

    #[arg(short, long, help = "Branch whose history is analysed [default: main]")]
    branch: Option<String>,

    #[arg(short, long, help = "Commit message scheme [default: default]")]
    scheme: Option<String>,

    #[arg(short, long, help = "Prefix placed before the 'v' of created tags")]
    prefix: Option<String>,

    #[arg(long, help = "Remote to push tags to [default: git's default remote]")]
    remote: Option<String>,

    #[arg(
        short,
        long,
        value_name = "KEY=VALUE",
        help = "Extra metadata, repeatable or comma separated"
    )]
    meta: Vec<String>,

    #[arg(short, long, help = "Create tags locally but do not push them")]
    dry_run: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())?;
    let warnings = config.apply(Overrides {
        repo_path: args.repo,
        branch: args.branch,
        scheme: args.scheme,
        prefix: args.prefix,
        remote: args.remote,
        dry_run: args.dry_run,
        verbose: args.verbose,
        meta: args.meta,
    });

    init_logging(config.verbose);
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }

    // Scheme validation happens here, before the repository is opened.
    let options = config.into_options()?;
    ui::display_run_parameters(&options);

    let repo = Git2Repository::open(&options.repo_path)?.with_remote(options.remote.clone());
    let outcome = run_autotag(&repo, &options)?;
    ui::display_outcome(&outcome);

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
