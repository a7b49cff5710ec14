//! Object File Format (OFF) reading and writing.

use crate::{Error, Mesh};
use na::{Point3, Scalar};
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

/// Reads the OFF file at `path`.
pub fn read_off(path: impl AsRef<Path>) -> Result<Mesh, Error> {
    let path = path.as_ref();
    let text = super::read_to_string(path)?;
    parse_off(&text, path)
}

/// Parses the content of an OFF file. `path` is only used in error messages.
///
/// Only triangular faces are kept. Faces with any other number of vertices
/// are skipped, but their indices are still consumed so the following faces
/// stay aligned.
pub fn parse_off(text: &str, path: &Path) -> Result<Mesh, Error> {
    let mut tokens = Tokens::new(text, path);

    match tokens.next_token() {
        Some((_, "OFF")) => {}
        found => {
            return Err(Error::Format {
                path: path.to_path_buf(),
                details: match found {
                    Some((_, token)) => format!("expected `OFF`, found `{}`", token),
                    None => "expected `OFF`, found an empty file".to_string(),
                },
            })
        }
    }

    let num_vertices: usize = tokens.parse("vertex count")?;
    let num_faces: usize = tokens.parse("face count")?;
    let _num_edges: usize = tokens.parse("edge count")?;

    // The header counts are untrusted: each vertex takes at least six bytes
    // of text and each face at least eight.
    let mut points = Vec::with_capacity(num_vertices.min(text.len() / 6));
    for _ in 0..num_vertices {
        let x = tokens.parse("vertex coordinate")?;
        let y = tokens.parse("vertex coordinate")?;
        let z = tokens.parse("vertex coordinate")?;
        points.push(Point3::new(x, y, z));
    }

    let mut triangles = Vec::with_capacity(num_faces.min(text.len() / 8));
    let mut skipped = 0;
    for _ in 0..num_faces {
        let size: usize = tokens.parse("face size")?;
        if size == 3 {
            let mut tri = [0u32; 3];
            for index in &mut tri {
                let (line, value) = tokens.parse_with_line::<u32>("vertex index")?;
                if value as usize >= num_vertices {
                    return Err(Error::Parse {
                        path: path.to_path_buf(),
                        line,
                        details: format!(
                            "vertex index {} out of range (the mesh has {} vertices)",
                            value, num_vertices
                        ),
                    });
                }
                *index = value;
            }
            triangles.push(tri);
        } else {
            for _ in 0..size {
                let _ = tokens.expect("vertex index")?;
            }
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::warn!(
            "{}: skipped {} non-triangular faces",
            path.display(),
            skipped
        );
    }

    Ok(Mesh::new(points, triangles))
}

/// Writes a triangle mesh in OFF format.
///
/// Coordinates are written in fixed-point notation with six decimals.
pub fn write_off<W: Write, N: Scalar + Display>(
    out: &mut W,
    points: &[Point3<N>],
    triangles: &[[u32; 3]],
) -> io::Result<()> {
    writeln!(out, "OFF")?;
    writeln!(out, "{} {} 0", points.len(), triangles.len())?;
    for p in points {
        writeln!(out, "{:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
    }
    for tri in triangles {
        writeln!(out, "3 {} {} {}", tri[0], tri[1], tri[2])?;
    }
    Ok(())
}

/// Whitespace-separated tokens, skipping `#` comments, tagged with their line.
struct Tokens<'a> {
    path: &'a Path,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    current: Option<(usize, std::str::SplitWhitespace<'a>)>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str, path: &'a Path) -> Self {
        Self {
            path,
            lines: text.lines().enumerate(),
            current: None,
            last_line: 1,
        }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        loop {
            if let Some((line, words)) = &mut self.current {
                if let Some(word) = words.next() {
                    return Some((*line, word));
                }
            }

            let (i, line) = self.lines.next()?;
            let content = line.split('#').next().unwrap_or_default();
            self.last_line = i + 1;
            self.current = Some((i + 1, content.split_whitespace()));
        }
    }

    fn expect(&mut self, what: &str) -> Result<(usize, &'a str), Error> {
        self.next_token().ok_or_else(|| Error::Parse {
            path: self.path.to_path_buf(),
            line: self.last_line,
            details: format!("unexpected end of file, expected {}", what),
        })
    }

    fn parse_with_line<T: FromStr>(&mut self, what: &str) -> Result<(usize, T), Error> {
        let (line, token) = self.expect(what)?;
        token
            .parse()
            .map(|value| (line, value))
            .map_err(|_| Error::Parse {
                path: self.path.to_path_buf(),
                line,
                details: format!("invalid {} `{}`", what, token),
            })
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T, Error> {
        self.parse_with_line(what).map(|(_, value)| value)
    }
}
