//! Wavefront OBJ export
//!
//! Writes positions, texture coordinates and normals with a shared 1-based
//! index, so every face corner uses the same number for all three.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::types::{MeshData, Topology};

/// Render a mesh as OBJ text
///
/// Triangle meshes produce `f` records (`a/a/a`, `a//a`, `a/a` or `a` depending
/// on which attributes are present); line meshes produce `l` records.
pub fn obj_string(mesh: &MeshData, name: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_obj_records(&mut out, mesh, name);
    out
}

/// Write a mesh to an OBJ file
pub fn write_obj(mesh: &MeshData, path: &Path, name: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(obj_string(mesh, name).as_bytes())?;
    writer.flush()
}

fn write_obj_records(out: &mut String, mesh: &MeshData, name: &str) -> std::fmt::Result {
    writeln!(out, "# meshkit OBJ export")?;
    writeln!(
        out,
        "# {} vertices, {} indices",
        mesh.vertex_count(),
        mesh.indices.len()
    )?;
    writeln!(out, "o {name}")?;

    for p in mesh.positions.chunks_exact(3) {
        writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for uv in mesh.texture_coords.chunks_exact(2) {
        writeln!(out, "vt {} {}", uv[0], uv[1])?;
    }
    for n in mesh.normals.chunks_exact(3) {
        writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
    }

    match mesh.topology {
        Topology::Triangles => {
            let corner = |i: u32| {
                let i = i + 1;
                match (mesh.has_texture_coords(), mesh.has_normals()) {
                    (true, true) => format!("{i}/{i}/{i}"),
                    (false, true) => format!("{i}//{i}"),
                    (true, false) => format!("{i}/{i}"),
                    (false, false) => i.to_string(),
                }
            };
            for tri in mesh.indices.chunks_exact(3) {
                writeln!(
                    out,
                    "f {} {} {}",
                    corner(tri[0]),
                    corner(tri[1]),
                    corner(tri[2])
                )?;
            }
        }
        Topology::Lines => {
            for line in mesh.indices.chunks_exact(2) {
                writeln!(out, "l {} {}", line[0] + 1, line[1] + 1)?;
            }
        }
    }

    Ok(())
}
