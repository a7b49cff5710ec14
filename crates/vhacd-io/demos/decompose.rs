extern crate nalgebra as na;

use std::env;
use std::process::ExitCode;
use vhacd_io::pipeline;
use vhacd_io::{DecompositionParameters, ExportMode, PipelineOptions};

// Usage: decompose <input.off|input.obj> [output.obj|output.wrl|output.off] [resolution]
fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(input) = args.first() else {
        eprintln!("usage: decompose <input> [output] [resolution]");
        return ExitCode::FAILURE;
    };

    let mut params = DecompositionParameters::default();
    if let Some(resolution) = args.get(2) {
        match resolution.parse() {
            Ok(resolution) => params.resolution = resolution,
            Err(e) => {
                eprintln!("invalid resolution `{}`: {}", resolution, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut options = PipelineOptions::new(input)
        .with_params(params)
        .with_verbose(true)
        .with_export_mode(ExportMode::Combined);
    if let Some(output) = args.get(1) {
        options = options.with_output(output);
    }

    let result = pipeline::run(&options);
    for (k, (vertices, faces)) in result.vertices.iter().zip(&result.faces).enumerate() {
        let centroid = vertices
            .iter()
            .fold(na::Vector3::zeros(), |acc, v| acc + na::Vector3::from(*v))
            / vertices.len().max(1) as f64;
        println!(
            "hull {}: {} vertices, {} triangles, centroid {:.3?}",
            k,
            vertices.len(),
            faces.len(),
            centroid.as_slice()
        );
    }

    println!("status: {:?} ({})", result.status, result.code());
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
