//! Generate command - build one primitive and write it to a file

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::shape::{
    MeshOptions, OutputFormat, Shape, ShapeParams, build_mesh, describe, write_mesh,
};

/// Arguments for the generate command
#[derive(Args)]
pub struct GenerateArgs {
    /// Shape to build
    #[arg(value_enum)]
    pub shape: Shape,

    /// Radius (sphere, cylinder, cone, capsule, capsule-banded)
    #[arg(long)]
    pub radius: Option<f32>,

    /// Height (cylinder, cone, capsule, capsule-banded)
    #[arg(long)]
    pub height: Option<f32>,

    /// Full extents: X Y for plane, X Y Z for cuboid and wire-cuboid
    #[arg(long, num_args = 2..=3, value_name = "EXTENT")]
    pub size: Option<Vec<f32>>,

    /// Segment length (crosshairs)
    #[arg(long)]
    pub length: Option<f32>,

    /// Synthesize tangents (plane and cuboid)
    #[arg(long)]
    pub tangents: bool,

    /// Reduce to a line mesh
    #[arg(long)]
    pub wireframe: bool,

    /// Drop diagonals between coplanar triangles when reducing
    #[arg(long)]
    pub de_triangulate: bool,

    /// Output format (defaults to the output file's extension, then obj)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,
}

impl GenerateArgs {
    fn params(&self) -> ShapeParams {
        ShapeParams {
            radius: self.radius,
            height: self.height,
            size: self.size.clone(),
            length: self.length,
        }
    }

    fn options(&self) -> MeshOptions {
        MeshOptions {
            tangents: self.tangents,
            wireframe: self.wireframe,
            de_triangulate: self.de_triangulate,
        }
    }
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let format = args
        .format
        .or_else(|| OutputFormat::from_path(&args.output))
        .unwrap_or_default();

    let mesh = build_mesh(args.shape, &args.params(), args.options())
        .with_context(|| format!("Failed to generate {}", args.shape))?;

    let name = args
        .output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(args.shape.name());

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    write_mesh(&mesh, &args.output, name, format)?;

    info!(
        "Generated {} ({}) -> {}",
        args.shape,
        describe(&mesh),
        args.output.display()
    );
    Ok(())
}
