use crate::Error;
use std::fmt;
use std::path::Path;

/// The mesh file formats known to this crate.
///
/// Input files can be [`MeshFormat::Off`] or [`MeshFormat::Obj`]; output
/// files can be any of the three.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Object File Format.
    Off,
    /// Wavefront OBJ.
    Obj,
    /// VRML 2.0 scene graph.
    Vrml2,
}

impl MeshFormat {
    /// Selects the reader for `path` from the text after its last `.`,
    /// ignoring case.
    pub fn from_input_path(path: &Path) -> Result<Self, Error> {
        let name = path.to_string_lossy();
        let ext = name
            .rfind('.')
            .map(|dot| name[dot + 1..].to_ascii_lowercase());

        match ext.as_deref() {
            Some("off") => Ok(MeshFormat::Off),
            Some("obj") => Ok(MeshFormat::Obj),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Selects the writer for `path` from its last four characters, ignoring case.
    pub fn from_output_path(path: &Path) -> Result<Self, Error> {
        let unsupported = || Error::UnsupportedFormat {
            path: path.to_path_buf(),
        };
        let (_, ext) = split_output_path(path).ok_or_else(unsupported)?;

        match ext.as_str() {
            ".obj" => Ok(MeshFormat::Obj),
            ".wrl" => Ok(MeshFormat::Vrml2),
            ".off" => Ok(MeshFormat::Off),
            _ => Err(unsupported()),
        }
    }

    /// The extension written for this format, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            MeshFormat::Off => ".off",
            MeshFormat::Obj => ".obj",
            MeshFormat::Vrml2 => ".wrl",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshFormat::Off => f.write_str("OFF"),
            MeshFormat::Obj => f.write_str("OBJ"),
            MeshFormat::Vrml2 => f.write_str("VRML 2.0"),
        }
    }
}

/// Splits an output path into everything but its last four characters and
/// those four characters, lower-cased.
///
/// Returns `None` if the path is not longer than four characters.
pub(crate) fn split_output_path(path: &Path) -> Option<(String, String)> {
    let name = path.to_string_lossy();
    let len = name.chars().count();
    if len <= 4 {
        return None;
    }

    let split = name.char_indices().nth(len - 4).map(|(i, _)| i)?;
    Some((
        name[..split].to_string(),
        name[split..].to_lowercase(),
    ))
}
