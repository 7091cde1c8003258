// Copyright (c) 2025, TheByteSlayer, InfraID
// Stable infrastructure identifiers for provisioned clusters, written in Rust.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use infraid::configuration::INSTALL_CONFIG_FILE;
use infraid::{ClusterId, InstallConfig, Overrides, state};

/// Derive the cluster UUID and InfraID for an install directory.
#[derive(Debug, Parser)]
#[command(name = "infraid-cli", version)]
struct Args {
    /// Directory holding override dot-files and the saved cluster id
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Install config to read the cluster name from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cluster name, instead of reading the install config
    #[arg(long)]
    name: Option<String>,

    /// Generate a new cluster id even if one was saved before
    #[arg(long)]
    fresh: bool,

    /// Neither read nor write the saved cluster id
    #[arg(long, conflicts_with = "fresh")]
    no_state: bool,

    /// Print written-back override values as KEY=value lines
    #[arg(long)]
    print_env: bool,

    #[arg(long)]
    silent: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.silent {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    }

    let result = run(&args);
    if let Err(e) = &result {
        error!("Failed to generate cluster id: {}", e);
    }
    result
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let config = match &args.name {
        Some(name) => InstallConfig::new(name),
        None => {
            let path = args.config.clone().unwrap_or_else(|| dir.join(INSTALL_CONFIG_FILE));
            info!("Reading cluster name from {}", path.display());
            InstallConfig::load(&path)?
        }
    };

    let mut overrides = Overrides::from_process(&dir);

    let cluster_id = if args.no_state {
        ClusterId::generate(&config, &mut overrides)?
    } else if args.fresh {
        let cluster_id = ClusterId::generate(&config, &mut overrides)?;
        state::save(&dir, &cluster_id)?;
        cluster_id
    } else {
        state::load_or_generate(&dir, &config, &mut overrides)?
    };

    println!("{}", serde_json::to_string_pretty(&cluster_id)?);

    if args.print_env {
        for (key, value) in overrides.exported() {
            println!("{}={}", key, value);
        }
    }

    Ok(())
}
