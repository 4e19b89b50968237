use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_bump::cli::orchestration::{run_release, ReleaseOutcome, ReleaseRequest};
use release_bump::config::{self, Backend};
use release_bump::domain::ReleaseDirective;
use release_bump::git::{CliRepository, Git2Repository, Repository, SystemRunner};
use release_bump::ui::{self, StdinPrompt};

/// Exit status when the operator declines to continue (the image of -1)
const DECLINED_EXIT_CODE: i32 = 255;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    version,
    about = "Bump the manifest version and commit it on a release branch"
)]
struct Args {
    #[arg(help = "Release type: \"minor\" or \"patch\"")]
    directive: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Continue over uncommitted changes without asking")]
    yes: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(ReleaseOutcome::Declined) => {
            println!("Release cancelled by user.");
            process::exit(DECLINED_EXIT_CODE);
        }
        Ok(_) => {}
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<ReleaseOutcome> {
    // Rejected before the manifest is touched
    let directive = ReleaseDirective::from_arg(args.directive.as_deref())?;

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let request = ReleaseRequest {
        directive,
        dry_run: args.dry_run,
        assume_yes: args.yes,
    };

    let root = Path::new(".");
    let repo: Box<dyn Repository> = match config.backend {
        Backend::Cli => Box::new(CliRepository::new(SystemRunner::in_dir(root))),
        Backend::Git2 => {
            Box::new(Git2Repository::open(root).context("Git repository error")?)
        }
    };

    let outcome = run_release(&request, &config, root, repo.as_ref(), &StdinPrompt)?;
    match &outcome {
        ReleaseOutcome::Planned(plan) => ui::display_dry_run(plan),
        ReleaseOutcome::Committed(plan) => println!(
            "\n\x1b[32m✓\x1b[0m Version {} committed on branch {}\n",
            plan.bumped, plan.branch
        ),
        ReleaseOutcome::Declined => {}
    }
    Ok(outcome)
}
