//! Meshkit CLI - Procedural mesh generator
//!
//! # Commands
//!
//! - `meshkit init` - Create a new meshkit.toml manifest
//! - `meshkit generate` - Build a single primitive and write it to a file
//! - `meshkit batch` - Build every mesh listed in a manifest
//!
//! # Usage
//!
//! ```bash
//! # One capsule as OBJ
//! meshkit generate capsule --radius 0.5 --height 1.0 -o capsule.obj
//!
//! # Debug outline of a cuboid, quads drawn without their diagonals
//! meshkit generate cuboid --size 1 2 1 --wireframe --de-triangulate -o crate.json
//!
//! # Everything in meshkit.toml
//! meshkit batch
//! ```
//!
//! # Manifest (meshkit.toml)
//!
//! ```toml
//! [output]
//! dir = "out"
//! format = "obj"
//!
//! [[mesh]]
//! name = "crate"
//! shape = "cuboid"
//! size = [1.0, 2.0, 1.0]
//! tangents = true
//! ```

mod batch;
mod generate;
mod init;
mod manifest;
mod shape;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Meshkit CLI - Procedural mesh generator
#[derive(Parser)]
#[command(name = "meshkit")]
#[command(about = "Generate procedural meshes as OBJ or JSON")]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new meshkit.toml manifest
    Init(init::InitArgs),

    /// Build a single primitive and write it to a file
    Generate(generate::GenerateArgs),

    /// Build every mesh listed in a manifest
    Batch(batch::BatchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init(args) => init::execute(args),
        Commands::Generate(args) => generate::execute(args),
        Commands::Batch(args) => {
            batch::execute(args)?;
            Ok(())
        }
    }
}
