//! Shape selection, parameter checking and mesh output shared by the
//! generate and batch commands

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::warn;

use meshkit_core::{
    MeshData, Topology, generate_capsule, generate_capsule_banded, generate_cone,
    generate_crosshairs, generate_cuboid, generate_cylinder, generate_plane, generate_sphere,
    generate_wire_cuboid, write_obj,
};

/// Primitive shapes the CLI can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    Plane,
    Cuboid,
    WireCuboid,
    Sphere,
    Cylinder,
    Cone,
    Capsule,
    CapsuleBanded,
    Crosshairs,
}

/// A shape parameter, named as in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Radius,
    Height,
    Size,
    Length,
}

impl Param {
    fn name(self) -> &'static str {
        match self {
            Param::Radius => "radius",
            Param::Height => "height",
            Param::Size => "size",
            Param::Length => "length",
        }
    }
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Plane => "plane",
            Shape::Cuboid => "cuboid",
            Shape::WireCuboid => "wire-cuboid",
            Shape::Sphere => "sphere",
            Shape::Cylinder => "cylinder",
            Shape::Cone => "cone",
            Shape::Capsule => "capsule",
            Shape::CapsuleBanded => "capsule-banded",
            Shape::Crosshairs => "crosshairs",
        }
    }

    /// Topology of the generated mesh; line shapes carry positions only
    pub fn topology(self) -> Topology {
        match self {
            Shape::WireCuboid | Shape::Crosshairs => Topology::Lines,
            _ => Topology::Triangles,
        }
    }

    fn params(self) -> &'static [Param] {
        match self {
            Shape::Plane | Shape::Cuboid | Shape::WireCuboid => &[Param::Size],
            Shape::Sphere => &[Param::Radius],
            Shape::Cylinder | Shape::Cone | Shape::Capsule | Shape::CapsuleBanded => {
                &[Param::Radius, Param::Height]
            }
            Shape::Crosshairs => &[Param::Length],
        }
    }

    /// Number of `size` components the shape takes
    fn size_len(self) -> usize {
        match self {
            Shape::Plane => 2,
            _ => 3,
        }
    }

    /// Whether the shape carries texture coordinates
    fn has_uvs(self) -> bool {
        matches!(self, Shape::Plane | Shape::Cuboid)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mesh file formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Obj,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Obj => "obj",
            OutputFormat::Json => "json",
        }
    }

    /// Format implied by a file extension, if any
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "obj" => Some(OutputFormat::Obj),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Raw shape parameters, from the command line or a manifest entry
#[derive(Debug, Clone, Default)]
pub struct ShapeParams {
    pub radius: Option<f32>,
    pub height: Option<f32>,
    pub size: Option<Vec<f32>>,
    pub length: Option<f32>,
}

impl ShapeParams {
    fn get(&self, param: Param) -> bool {
        match param {
            Param::Radius => self.radius.is_some(),
            Param::Height => self.height.is_some(),
            Param::Size => self.size.is_some(),
            Param::Length => self.length.is_some(),
        }
    }

    /// Check that exactly the parameters `shape` takes are present
    ///
    /// Values themselves are range-checked by the generators.
    pub fn check(&self, shape: Shape) -> Result<()> {
        let wanted = shape.params();
        for param in [Param::Radius, Param::Height, Param::Size, Param::Length] {
            match (wanted.contains(&param), self.get(param)) {
                (true, false) => bail!("{shape} requires `{}`", param.name()),
                (false, true) => bail!("{shape} does not take `{}`", param.name()),
                _ => {}
            }
        }

        if let Some(size) = &self.size {
            if size.len() != shape.size_len() {
                bail!(
                    "{shape} takes {} `size` values, got {}",
                    shape.size_len(),
                    size.len()
                );
            }
        }
        Ok(())
    }

    fn value(&self, shape: Shape, param: Param) -> Result<f32> {
        let value = match param {
            Param::Radius => self.radius,
            Param::Height => self.height,
            Param::Length => self.length,
            Param::Size => None,
        };
        value.with_context(|| format!("{shape} requires `{}`", param.name()))
    }

    fn size<const N: usize>(&self, shape: Shape) -> Result<[f32; N]> {
        let size = self.size.as_deref().unwrap_or_default();
        <[f32; N]>::try_from(size)
            .ok()
            .with_context(|| format!("{shape} takes {N} `size` values"))
    }
}

/// Post-processing applied after generation
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshOptions {
    pub tangents: bool,
    pub wireframe: bool,
    pub de_triangulate: bool,
}

/// Build a mesh from a shape, its parameters and post-processing options
pub fn build_mesh(shape: Shape, params: &ShapeParams, options: MeshOptions) -> Result<MeshData> {
    params.check(shape)?;

    let radius = || params.value(shape, Param::Radius);
    let height = || params.value(shape, Param::Height);

    let mut mesh: MeshData = match shape {
        Shape::Plane => {
            let [width, depth] = params.size::<2>(shape)?;
            generate_plane(width, depth)?
        }
        Shape::Cuboid => {
            let [x, y, z] = params.size::<3>(shape)?;
            generate_cuboid(x, y, z)?
        }
        Shape::WireCuboid => {
            let [x, y, z] = params.size::<3>(shape)?;
            generate_wire_cuboid(x, y, z)?
        }
        Shape::Sphere => generate_sphere(radius()?)?,
        Shape::Cylinder => generate_cylinder(radius()?, height()?)?,
        Shape::Cone => generate_cone(radius()?, height()?)?,
        Shape::Capsule => generate_capsule(radius()?, height()?)?,
        Shape::CapsuleBanded => generate_capsule_banded(radius()?, height()?)?,
        Shape::Crosshairs => generate_crosshairs(params.value(shape, Param::Length)?)?,
    };

    if options.tangents {
        if shape.topology() == Topology::Lines {
            bail!("{shape} is a line mesh and cannot carry tangents");
        }
        if !shape.has_uvs() {
            warn!("{shape} has no texture coordinates, tangents skipped");
        } else if options.wireframe {
            warn!("Wireframe output drops tangents, skipped");
        } else {
            mesh.generate_tangents()?;
        }
    }

    if options.wireframe {
        mesh.to_wireframe(options.de_triangulate)?;
    } else if options.de_triangulate {
        warn!("--de-triangulate has no effect without --wireframe");
    }

    Ok(mesh)
}

/// Write a mesh in the given format; `name` becomes the OBJ object name
pub fn write_mesh(mesh: &MeshData, path: &Path, name: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Obj => write_obj(mesh, path, name)
            .with_context(|| format!("Failed to write OBJ: {}", path.display())),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(mesh).context("Failed to serialize mesh")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write JSON: {}", path.display()))
        }
    }
}

/// One-line summary of a mesh's size
pub fn describe(mesh: &MeshData) -> String {
    match mesh.topology {
        Topology::Triangles => format!(
            "{} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        ),
        Topology::Lines => format!(
            "{} vertices, {} lines",
            mesh.vertex_count(),
            mesh.line_count()
        ),
    }
}
