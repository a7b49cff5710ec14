//! Mesh file readers and convex hull writers.

pub use self::export::{combined_vertex_offsets, ExportMode, ExportReport, HullExporter};
pub use self::material::Material;
pub use self::off::{parse_off, read_off, write_off};
pub use self::vrml::{write_vrml, write_vrml_shape};
pub use self::wavefront::{parse_obj, read_obj, write_obj_hull};

use crate::{Error, Mesh, MeshFormat};
use std::path::Path;

mod export;
mod material;
mod off;
mod vrml;
mod wavefront;

/// Reads a mesh, selecting the reader from the extension of `path`.
///
/// `.off` and `.obj` files are supported, regardless of case.
pub fn read_mesh(path: impl AsRef<Path>) -> Result<Mesh, Error> {
    let path = path.as_ref();
    let mesh = match MeshFormat::from_input_path(path)? {
        MeshFormat::Off => read_off(path)?,
        MeshFormat::Obj => read_obj(path)?,
        MeshFormat::Vrml2 => {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    log::info!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn read_to_string(path: &Path) -> Result<String, Error> {
    let bytes = std::fs::read(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
