//! Batch command - build every mesh listed in a manifest

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::manifest::MeshManifest;
use crate::shape::{build_mesh, describe, write_mesh};

/// Arguments for the batch command
#[derive(Args)]
pub struct BatchArgs {
    /// Path to meshkit.toml manifest file
    #[arg(default_value = "meshkit.toml")]
    pub manifest: PathBuf,

    /// Output directory (overrides [output] dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the batch command
///
/// # Returns
/// Paths of the written mesh files, in manifest order
pub fn execute(args: BatchArgs) -> Result<Vec<PathBuf>> {
    let manifest = MeshManifest::load(&args.manifest)?;

    // Relative output directories resolve against the manifest's directory
    let project_dir = args.manifest.parent().unwrap_or_else(|| Path::new("."));
    let output_dir = match args.output {
        Some(dir) => dir,
        None => project_dir.join(&manifest.output.dir),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let format = manifest.output.format;
    debug!(
        "Building {} meshes into {}",
        manifest.mesh.len(),
        output_dir.display()
    );

    let mut written = Vec::with_capacity(manifest.mesh.len());
    for entry in &manifest.mesh {
        let mesh = build_mesh(entry.shape, &entry.params(), entry.options())
            .with_context(|| format!("Failed to build mesh '{}'", entry.name))?;

        let path = output_dir.join(format!("{}.{}", entry.name, format.extension()));
        write_mesh(&mesh, &path, &entry.name, format)?;

        info!("  {} ({}): {}", entry.name, entry.shape, describe(&mesh));
        written.push(path);
    }

    info!(
        "Wrote {} meshes to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::STARTER_MANIFEST;

    #[test]
    fn test_batch_starter_manifest() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let manifest = dir.path().join("meshkit.toml");
        std::fs::write(&manifest, STARTER_MANIFEST).unwrap();

        let written = execute(BatchArgs {
            manifest,
            output: None,
        })
        .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["crate.obj", "ball.obj", "pill.obj", "crate-outline.obj", "origin.obj"]
        );
        for path in &written {
            assert!(path.starts_with(dir.path().join("meshes")));
            assert!(path.is_file());
        }

        let outline = std::fs::read_to_string(&written[3]).unwrap();
        assert_eq!(outline.lines().filter(|l| l.starts_with("l ")).count(), 12);
        assert_eq!(outline.lines().filter(|l| l.starts_with("v ")).count(), 8);
    }

    #[test]
    fn test_batch_json_with_output_override() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let manifest = dir.path().join("meshkit.toml");
        std::fs::write(
            &manifest,
            r#"
[output]
format = "json"

[[mesh]]
name = "grid"
shape = "wire-cuboid"
size = [2.0, 2.0, 2.0]
"#,
        )
        .unwrap();

        let out = dir.path().join("elsewhere");
        let written = execute(BatchArgs {
            manifest,
            output: Some(out.clone()),
        })
        .unwrap();

        assert_eq!(written, [out.join("grid.json")]);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(value["topology"], "lines");
        assert_eq!(value["positions"].as_array().unwrap().len(), 24);
    }

    #[test]
    fn test_batch_missing_manifest() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = execute(BatchArgs {
            manifest: dir.path().join("missing.toml"),
            output: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read manifest"));
    }
}
