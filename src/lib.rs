/*!
vhacd-io
========

**vhacd-io** moves triangle meshes in and out of an approximate convex
decomposition engine. It reads OFF and OBJ files into flat point/index
buffers, runs the decomposition through the [`DecompositionEngine`]
boundary (backed by parry's V-HACD by default), and writes the resulting
convex hulls back as OBJ, VRML 2.0 or OFF files, either combined into a
single file or split into one file per hull.

```no_run
use vhacd_io::{pipeline, ExportMode, PipelineOptions};

let options = PipelineOptions::new("bunny.obj")
    .with_output("bunny_hulls.obj")
    .with_export_mode(ExportMode::Combined);
let result = pipeline::run(&options);
assert!(result.is_success());
println!("{} convex hulls", result.hull_count());
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(clippy::too_many_arguments)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub use self::aggregate::{aggregate, PipelineResult};
pub use self::engine::{CancelToken, ComputeOutcome, DecompositionEngine, ParryEngine};
pub use self::error::{Error, Status};
pub use self::format::MeshFormat;
pub use self::gateway::{decompose, Decomposition, DecompositionGateway};
pub use self::io::{read_mesh, ExportMode, ExportReport, HullExporter, Material};
pub use self::mesh::{ConvexHull, HullCollection, Mesh};
pub use self::observer::{ConsoleProgress, FileLogSink, LogSink, Observers, ProgressSink};
pub use self::parameters::{DecompositionMode, DecompositionParameters};
pub use self::pipeline::PipelineOptions;

mod aggregate;
pub mod engine;
mod error;
mod format;
mod gateway;
pub mod io;
mod mesh;
mod observer;
mod parameters;
pub mod pipeline;
