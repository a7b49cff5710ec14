//! Wavefront (`.obj`) reading and writing.

use crate::{ConvexHull, Error, Mesh};
use na::Point3;
use std::io::{self, Write};
use std::path::Path;

/// Reads the Wavefront file at `path`.
pub fn read_obj(path: impl AsRef<Path>) -> Result<Mesh, Error> {
    let path = path.as_ref();
    let text = super::read_to_string(path)?;
    parse_obj(&text, path)
}

/// Parses the content of a Wavefront file. `path` is only used in error messages.
///
/// Only `v` and `f` statements are interpreted, every other line is ignored.
/// Triangles are kept as-is, quads are split into the two triangles
/// `(0, 1, 2)` and `(0, 2, 3)`, and faces with any other number of vertices
/// are dropped.
pub fn parse_obj(text: &str, path: &Path) -> Result<Mesh, Error> {
    let parse_error = |line: usize, details: String| Error::Parse {
        path: path.to_path_buf(),
        line,
        details,
    };

    let mut points = Vec::new();
    // Triangles along with the line they come from, validated once every vertex is known.
    let mut triangles: Vec<(usize, [u32; 3])> = Vec::new();
    let mut dropped = 0;

    for (i, line) in text.lines().enumerate() {
        let line_number = i + 1;

        if let Some(rest) = statement(line, 'v') {
            let mut coords = [0.0f32; 3];
            let mut words = rest.split_whitespace();
            for coord in &mut coords {
                let word = words.next().ok_or_else(|| {
                    parse_error(
                        line_number,
                        "a vertex needs three coordinates".to_string(),
                    )
                })?;
                *coord = word.parse().map_err(|_| {
                    parse_error(line_number, format!("invalid vertex coordinate `{}`", word))
                })?;
            }
            points.push(Point3::from(coords));
        } else if let Some(rest) = statement(line, 'f') {
            let mut face = Vec::with_capacity(4);
            for word in rest.split_whitespace() {
                let index = resolve_index(word, points.len())
                    .ok_or_else(|| parse_error(line_number, format!("invalid face index `{}`", word)))?;
                face.push(index);
            }

            match face[..] {
                [a, b, c] => triangles.push((line_number, [a, b, c])),
                [a, b, c, d] => {
                    triangles.push((line_number, [a, b, c]));
                    triangles.push((line_number, [a, c, d]));
                }
                _ => dropped += 1,
            }
        }
    }

    if dropped > 0 {
        log::debug!(
            "{}: dropped {} faces that are neither triangles nor quads",
            path.display(),
            dropped
        );
    }

    let num_points = points.len();
    let triangles = triangles
        .into_iter()
        .map(|(line, tri)| match tri.iter().find(|&&i| i as usize >= num_points) {
            Some(&i) => Err(parse_error(
                line,
                format!(
                    "vertex index {} out of range (the mesh has {} vertices)",
                    i as u64 + 1,
                    num_points
                ),
            )),
            None => Ok(tri),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Mesh::new(points, triangles))
}

/// The arguments of `line` if it is a `keyword` statement.
fn statement(line: &str, keyword: char) -> Option<&str> {
    let rest = line.strip_prefix(keyword)?;
    rest.starts_with([' ', '\t']).then_some(rest)
}

/// Converts a face vertex reference (`i`, `i/t`, `i//n` or `i/t/n`) to a
/// 0-based position index.
///
/// Negative references are relative to the `num_points` vertices read so far.
fn resolve_index(word: &str, num_points: usize) -> Option<u32> {
    let position = word.split('/').next()?;
    let index: i64 = position.parse().ok()?;

    let resolved = match index {
        0 => return None,
        i if i > 0 => i - 1,
        i => num_points as i64 + i,
    };
    u32::try_from(resolved).ok()
}

/// Writes one hull as an OBJ object named `convex_<index>`.
///
/// Face indices are shifted by `vertex_offset`, which is `1` for the first
/// object of a file (OBJ indices are 1-based) and grows by the vertex count
/// of every object written before. Coordinates are written in fixed-point
/// notation with six decimals.
pub fn write_obj_hull<W: Write>(
    out: &mut W,
    hull: &ConvexHull,
    index: usize,
    vertex_offset: u64,
) -> io::Result<()> {
    writeln!(out, "o convex_{}", index)?;
    for p in &hull.points {
        writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    for tri in &hull.triangles {
        writeln!(
            out,
            "f {} {} {}",
            tri[0] as u64 + vertex_offset,
            tri[1] as u64 + vertex_offset,
            tri[2] as u64 + vertex_offset
        )?;
    }
    Ok(())
}
