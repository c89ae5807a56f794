//! Init command - write a starter meshkit.toml

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Starter manifest, one entry per kind of post-processing
pub const STARTER_MANIFEST: &str = r#"# meshkit manifest
#
# Run `meshkit batch` in this directory to build every [[mesh]] entry.

[output]
dir = "meshes"
format = "obj"          # "obj" or "json"

[[mesh]]
name = "crate"
shape = "cuboid"
size = [1.0, 1.0, 1.0]
tangents = true

[[mesh]]
name = "ball"
shape = "sphere"
radius = 0.5

[[mesh]]
name = "pill"
shape = "capsule"
radius = 0.25
height = 1.0

[[mesh]]
name = "crate-outline"
shape = "cuboid"
size = [1.0, 1.0, 1.0]
wireframe = true
de_triangulate = true

[[mesh]]
name = "origin"
shape = "crosshairs"
length = 0.5
"#;

/// Arguments for the init command
#[derive(Args)]
pub struct InitArgs {
    /// Path of the manifest to create
    #[arg(default_value = "meshkit.toml")]
    pub path: PathBuf,

    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    std::fs::write(&args.path, STARTER_MANIFEST)
        .with_context(|| format!("Failed to write manifest: {}", args.path.display()))?;

    info!("Created {}", args.path.display());
    Ok(())
}
