use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use version_publisher::config;
use version_publisher::project_key::resolve_project_key;
use version_publisher::store::{DryRunStore, FileVersionStore};
use version_publisher::ui;
use version_publisher::workflow::{publish, PublishRequest};

/// Store file used when neither the CLI nor the config names one
const DEFAULT_STORE_FILE: &str = "tracker-versions.json";

#[derive(clap::Parser)]
#[command(
    name = "version-publisher",
    version,
    about = "Mark a tracker version released and create the next one"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Version string of the release that was just cut")]
    release_version: String,

    #[arg(short, long, help = "Artifact id, checked against the skipped prefixes")]
    artifact: String,

    #[arg(long, default_value = ".", help = "Directory containing the project key file")]
    project_dir: PathBuf,

    #[arg(short = 'k', long, help = "Tracker project key, overrides the key file")]
    project_key: Option<String>,

    #[arg(short, long, help = "JSON version store file, overrides the config")]
    store: Option<PathBuf>,

    #[arg(long, help = "Preview tracker changes without applying them")]
    dry_run: bool,

    #[arg(long, help = "Do not touch tracker versions at all")]
    skip: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    config.apply_env_overrides();

    if args.skip || config.policy.skip {
        ui::display_skip_switch();
        return Ok(());
    }

    let project_key = match args.project_key {
        Some(key) => key.trim().to_string(),
        None => resolve_project_key(&args.project_dir, &config.project.key_file_name),
    };
    let request = PublishRequest::new(project_key, args.release_version, args.artifact);
    let policy = config.policy.publish_policy();

    let store_path = args
        .store
        .or_else(|| config.store.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
    let store = FileVersionStore::new(&store_path);
    ui::display_status(&format!("Using version store {}", store_path.display()));

    if args.dry_run {
        let store = DryRunStore::new(store);
        let outcome = publish(&request, &policy, &store).with_context(|| {
            format!("Failed to publish version {}", request.release_version)
        })?;
        ui::display_planned_operations(&store.planned());
        if outcome.is_skip() {
            ui::display_outcome(&outcome);
        }
        return Ok(());
    }

    let outcome = publish(&request, &policy, &store)
        .with_context(|| format!("Failed to publish version {}", request.release_version))?;
    ui::display_outcome(&outcome);

    Ok(())
}
