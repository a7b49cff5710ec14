use std::io;
use std::path::PathBuf;

/// Errors raised while reading, decomposing or writing meshes.
///
/// Cancellation is not an error: a cancelled decomposition is reported as
/// [`Decomposition::Cancelled`](crate::Decomposition::Cancelled).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input file could not be opened.
    #[error("cannot open `{}`: {source}", path.display())]
    NotFound {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file does not start with the magic token its format requires.
    #[error("`{}` is not a valid mesh file: {details}", path.display())]
    Format {
        /// The offending file.
        path: PathBuf,
        /// What was found instead.
        details: String,
    },
    /// A numeric field or an index could not be parsed, or the file ended early.
    #[error("{}:{line}: {details}", path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The 1-based line the error was detected on.
        line: usize,
        /// Description of the malformed field.
        details: String,
    },
    /// The file extension does not name a format supported in this direction.
    #[error("unsupported mesh format for `{}`", path.display())]
    UnsupportedFormat {
        /// The path whose extension was not recognized.
        path: PathBuf,
    },
    /// The decomposition engine reported a failure.
    #[error("convex decomposition failed: {0}")]
    Engine(String),
    /// An output file could not be created or written.
    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The status code reported by the pipeline for this error.
    pub fn status(&self) -> Status {
        match self {
            Error::NotFound { .. } => Status::InputNotFound,
            Error::Format { .. } => Status::InvalidFormat,
            Error::Parse { .. } => Status::ParseFailure,
            Error::UnsupportedFormat { .. } => Status::UnsupportedFormat,
            Error::Engine(_) => Status::EngineFailure,
            Error::Write { .. } => Status::WriteFailure,
        }
    }
}

/// Outcome of a pipeline run, convertible to the integer code handed to callers.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// The mesh was decomposed (and written, if requested).
    Success = 0,
    /// The input file could not be opened.
    InputNotFound = -1,
    /// The input file has the wrong magic token.
    InvalidFormat = -2,
    /// The input file contains a malformed field.
    ParseFailure = -3,
    /// The input or output extension is not supported.
    UnsupportedFormat = -4,
    /// The decomposition engine failed.
    EngineFailure = -5,
    /// The decomposition was cancelled before completion.
    Cancelled = -6,
    /// The combined output file could not be written.
    WriteFailure = -7,
}

impl Status {
    /// The integer status code: `0` on success, negative otherwise.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns `true` for [`Status::Success`].
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> i32 {
        status.code()
    }
}
