//! meshkit.toml manifest parsing

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::shape::{MeshOptions, OutputFormat, Shape, ShapeParams};

/// meshkit.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct MeshManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub mesh: Vec<MeshEntry>,
}

/// Where and how generated meshes are written
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest's directory.
    /// Default: "."
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// File format for every mesh.
    /// Default: obj
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Single mesh entry
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    /// Output file stem and OBJ object name
    pub name: String,
    pub shape: Shape,

    #[serde(default)]
    pub radius: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub size: Option<Vec<f32>>,
    #[serde(default)]
    pub length: Option<f32>,

    /// Synthesize tangents (UV-mapped shapes only).
    /// Default: false
    #[serde(default)]
    pub tangents: bool,

    /// Reduce to a line mesh.
    /// Default: false
    #[serde(default)]
    pub wireframe: bool,

    /// Drop diagonals between coplanar triangles when reducing.
    /// Default: false
    #[serde(default)]
    pub de_triangulate: bool,
}

impl MeshEntry {
    pub fn params(&self) -> ShapeParams {
        ShapeParams {
            radius: self.radius,
            height: self.height,
            size: self.size.clone(),
            length: self.length,
        }
    }

    pub fn options(&self) -> MeshOptions {
        MeshOptions {
            tangents: self.tangents,
            wireframe: self.wireframe,
            de_triangulate: self.de_triangulate,
        }
    }
}

impl MeshManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content).context("Failed to parse meshkit.toml")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check entry names and that each entry's parameters fit its shape
    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for entry in &self.mesh {
            if !names.insert(entry.name.as_str()) {
                bail!("Duplicate mesh name '{}' in manifest", entry.name);
            }
            if entry.name.is_empty() || entry.name.contains(['/', '\\']) {
                bail!("Invalid mesh name '{}': must be a plain file name", entry.name);
            }
            entry
                .params()
                .check(entry.shape)
                .with_context(|| format!("Invalid mesh entry '{}'", entry.name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let manifest = MeshManifest::parse(
            r#"
[[mesh]]
name = "ball"
shape = "sphere"
radius = 1.0
"#,
        )
        .unwrap();

        assert_eq!(manifest.output.dir, PathBuf::from("."));
        assert_eq!(manifest.output.format, OutputFormat::Obj);
        assert_eq!(manifest.mesh.len(), 1);

        let entry = &manifest.mesh[0];
        assert_eq!(entry.shape, Shape::Sphere);
        assert_eq!(entry.radius, Some(1.0));
        assert!(!entry.tangents && !entry.wireframe && !entry.de_triangulate);
    }

    #[test]
    fn test_parse_full() {
        let manifest = MeshManifest::parse(
            r#"
[output]
dir = "out"
format = "json"

[[mesh]]
name = "crate"
shape = "cuboid"
size = [1, 2.5, 1]
tangents = true

[[mesh]]
name = "pill"
shape = "capsule-banded"
radius = 0.5
height = 2.0
wireframe = true
de_triangulate = true
"#,
        )
        .unwrap();

        assert_eq!(manifest.output.dir, PathBuf::from("out"));
        assert_eq!(manifest.output.format, OutputFormat::Json);
        assert_eq!(manifest.mesh[0].size, Some(vec![1.0, 2.5, 1.0]));
        assert_eq!(manifest.mesh[1].shape, Shape::CapsuleBanded);
        assert!(manifest.mesh[1].options().de_triangulate);
    }

    #[test]
    fn test_rejects_mismatched_parameters() {
        let err = MeshManifest::parse(
            r#"
[[mesh]]
name = "ball"
shape = "sphere"
size = [1.0, 1.0, 1.0]
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("'ball'"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = MeshManifest::parse(
            r#"
[[mesh]]
name = "a"
shape = "crosshairs"
length = 1.0

[[mesh]]
name = "a"
shape = "sphere"
radius = 1.0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_rejects_unknown_shape() {
        assert!(MeshManifest::parse("[[mesh]]\nname = \"x\"\nshape = \"torus\"\n").is_err());
    }
}
