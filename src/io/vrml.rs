//! VRML 2.0 (`.wrl`) writing.

use super::Material;
use crate::ConvexHull;
use std::io::{self, Write};

/// Writes a complete VRML 2.0 document holding one `Shape` per hull.
///
/// Each entry is a hull, the index used to name its coordinates, and its
/// material. All shapes are children of a single `Group`; each keeps its own
/// 0-based `coordIndex`.
pub fn write_vrml<W: Write>(out: &mut W, shapes: &[(usize, &ConvexHull, Material)]) -> io::Result<()> {
    let num_vertices: usize = shapes.iter().map(|(_, hull, _)| hull.vertex_count()).sum();
    let num_triangles: usize = shapes.iter().map(|(_, hull, _)| hull.triangle_count()).sum();

    writeln!(out, "#VRML V2.0 utf8")?;
    writeln!(out)?;
    writeln!(out, "# Vertices: {}", num_vertices)?;
    writeln!(out, "# Triangles: {}", num_triangles)?;
    writeln!(out)?;
    writeln!(out, "Group {{")?;
    writeln!(out, "    children [")?;
    for (index, hull, material) in shapes {
        write_vrml_shape(out, hull, material, *index)?;
    }
    writeln!(out, "    ]")?;
    writeln!(out, "}}")
}

/// Writes one hull as a VRML `Shape` node, indented as a child of a `Group`.
pub fn write_vrml_shape<W: Write>(
    out: &mut W,
    hull: &ConvexHull,
    material: &Material,
    index: usize,
) -> io::Result<()> {
    let [dr, dg, db] = material.diffuse_color;
    let [sr, sg, sb] = material.specular_color;
    let [er, eg, eb] = material.emissive_color;

    writeln!(out, "        Shape {{")?;
    writeln!(out, "            appearance Appearance {{")?;
    writeln!(out, "                material Material {{")?;
    writeln!(out, "                    diffuseColor {:.6} {:.6} {:.6}", dr, dg, db)?;
    writeln!(out, "                    ambientIntensity {:.6}", material.ambient_intensity)?;
    writeln!(out, "                    specularColor {:.6} {:.6} {:.6}", sr, sg, sb)?;
    writeln!(out, "                    emissiveColor {:.6} {:.6} {:.6}", er, eg, eb)?;
    writeln!(out, "                    shininess {:.6}", material.shininess)?;
    writeln!(out, "                    transparency {:.6}", material.transparency)?;
    writeln!(out, "                }}")?;
    writeln!(out, "            }}")?;
    writeln!(out, "            geometry IndexedFaceSet {{")?;
    writeln!(out, "                ccw TRUE")?;
    writeln!(out, "                solid TRUE")?;
    writeln!(out, "                convex TRUE")?;
    if !hull.points.is_empty() {
        writeln!(out, "                coord DEF co_{} Coordinate {{", index)?;
        writeln!(out, "                    point [")?;
        for p in &hull.points {
            writeln!(out, "                        {:.6} {:.6} {:.6},", p.x, p.y, p.z)?;
        }
        writeln!(out, "                    ]")?;
        writeln!(out, "                }}")?;
    }
    if !hull.triangles.is_empty() {
        writeln!(out, "                coordIndex [")?;
        for tri in &hull.triangles {
            writeln!(out, "                        {}, {}, {}, -1,", tri[0], tri[1], tri[2])?;
        }
        writeln!(out, "                ]")?;
    }
    writeln!(out, "            }}")?;
    writeln!(out, "        }}")
}
