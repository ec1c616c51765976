mod cli;
mod output;

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use tfprobe::query::{attributes, index};
use tfprobe::{MANAGED, QueryError, ResourceMap, Snapshot, TfProbeError};

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state_path = cli.state_path().cloned();

    run(cli.command, state_path.as_deref())?;

    Ok(())
}

fn load(state_path: Option<&Path>) -> Result<Snapshot, TfProbeError> {
    let snapshot = match state_path {
        Some(path) => Snapshot::from_path(path)?,
        None => Snapshot::from_reader(std::io::stdin().lock())?,
    };
    tracing::info!(
        resources = snapshot.state().resources.len(),
        "state snapshot loaded"
    );
    Ok(snapshot)
}

// Only the snapshot commands read the state, so `capture` never waits on stdin.
fn run(command: Command, state_path: Option<&Path>) -> Result<(), TfProbeError> {
    match command {
        Command::Find(args) => {
            let snapshot = load(state_path)?;
            let state = snapshot.state();
            let resources = match (&args.resource_type, &args.name) {
                (Some(resource_type), _) => {
                    index::by_type_and_mode(state, resource_type, &args.mode)
                }
                (None, Some(name)) => index::by_name(state, name),
                (None, None) => Ok(ResourceMap::new()),
            }
            .map_err(QueryError::from)?;
            println!("{}", output::resource_table(&resources));
        }
        Command::Names(args) => {
            let snapshot = load(state_path)?;
            let resources =
                index::by_type_and_mode(snapshot.state(), &args.resource_type, MANAGED)
                    .map_err(QueryError::from)?;
            for name in index::instance_names(&resources)? {
                println!("{name}");
            }
        }
        Command::Values(args) => {
            let snapshot = load(state_path)?;
            let extraction =
                attributes::extract(snapshot.raw(), &args.identifier, &args.attribute)?;
            for value in &extraction.values {
                println!("{}", serde_json::to_string(value)?);
            }
            for failure in &extraction.failures {
                eprintln!("warning: {failure}");
            }
            if !extraction.failures.is_empty() {
                return Err(TfProbeError::MissingAttributes {
                    attribute: args.attribute,
                    failures: extraction.failures.len(),
                });
            }
        }
        Command::Capture(args) => {
            let groups = tfprobe::capture_named_groups(&args.pattern, &args.input);
            if groups.is_empty() {
                eprintln!("no match (or invalid pattern)");
            }
            println!("{}", output::capture_table(&groups));
        }
        Command::Tree => {
            let snapshot = load(state_path)?;
            println!("{}", output::snapshot_tree(snapshot.state()));
        }
    }

    Ok(())
}
