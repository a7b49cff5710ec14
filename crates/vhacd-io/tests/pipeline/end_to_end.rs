use crate::common::{hull_with_vertices, write_file, ScriptedEngine, CUBE_OBJ};
use std::fs;
use vhacd_io::pipeline::{run, run_with_engine};
use vhacd_io::{ComputeOutcome, DecompositionParameters, ExportMode, PipelineOptions, Status};

#[test]
fn cube_without_subdivision_is_its_own_hull() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cube.obj", CUBE_OBJ);
    let output = dir.path().join("cube_hulls.obj");
    let params = DecompositionParameters {
        resolution: 10,
        ..Default::default()
    };

    let result = run(&PipelineOptions::new(&input)
        .with_output(&output)
        .with_params(params)
        .with_export_mode(ExportMode::Combined));

    assert!(result.is_success());
    assert_eq!(result.code(), 0);
    assert_eq!(result.hull_count(), 1);
    assert_eq!(result.vertices[0].len(), 8);
    assert_eq!(result.faces[0].len(), 12);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# convex hulls: 1\n"));
}

#[test]
fn cube_is_decomposed_with_vhacd() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cube.obj", CUBE_OBJ);
    let params = DecompositionParameters {
        resolution: 10_000,
        ..Default::default()
    };

    let result = run(&PipelineOptions::new(&input).with_params(params));

    assert!(result.is_success());
    assert!(result.hull_count() >= 1);
    assert_eq!(result.vertices.len(), result.faces.len());
    for (vertices, faces) in result.vertices.iter().zip(&result.faces) {
        assert!(!faces.is_empty());
        assert!(vertices.len() >= 4);
        assert!(faces
            .iter()
            .flatten()
            .all(|&i| (i as usize) < vertices.len()));
    }
}

#[test]
fn per_hull_output_and_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "parts.off", "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n");
    let log = dir.path().join("run.log");
    let (engine, calls) = ScriptedEngine::completed(vec![hull_with_vertices(3), hull_with_vertices(4)]);

    let result = run_with_engine(
        &PipelineOptions::new(&input)
            .with_output(dir.path().join("parts.wrl"))
            .with_log(&log)
            .with_color_seed(7),
        engine,
    );

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.hull_count(), 2);
    assert_eq!(calls.computed.get(), 1);
    assert_eq!(calls.released.get(), 1);
    assert!(dir.path().join("parts_0.wrl").is_file());
    assert!(dir.path().join("parts_1.wrl").is_file());
    assert!(!dir.path().join("parts.wrl").exists());

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.starts_with("+ Files\n"));
    assert!(text.contains("+ Parameters\n"));
    assert!(text.contains("scripted engine running\n"));
    assert!(text.contains("fetching result convex hull #1, #V: 4, #F: 1\n"));
    assert!(text.contains("\t CH[00001] 4 V, 1 T\n"));
}

#[test]
fn cancelled_decomposition_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cube.obj", CUBE_OBJ);
    let output = dir.path().join("out.obj");
    let (engine, calls) =
        ScriptedEngine::with_outcome(Ok(ComputeOutcome::Cancelled), vec![hull_with_vertices(3)]);

    let result = run_with_engine(
        &PipelineOptions::new(&input)
            .with_output(&output)
            .with_export_mode(ExportMode::Combined),
        engine,
    );

    assert_eq!(result.status, Status::Cancelled);
    assert_eq!(result.code(), -6);
    assert_eq!(result.hull_count(), 0);
    assert_eq!(calls.released.get(), 1);
    assert!(!output.exists());
}

#[test]
fn engine_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cube.obj", CUBE_OBJ);
    let (engine, calls) = ScriptedEngine::with_outcome(Err("out of memory".to_string()), vec![]);

    let result = run_with_engine(&PipelineOptions::new(&input), engine);

    assert_eq!(result.status, Status::EngineFailure);
    assert!(result.vertices.is_empty() && result.faces.is_empty());
    assert_eq!(calls.released.get(), 1);
}

#[test]
fn combined_write_failure_keeps_the_hulls() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cube.obj", CUBE_OBJ);
    let (engine, _calls) = ScriptedEngine::completed(vec![hull_with_vertices(3)]);

    let result = run_with_engine(
        &PipelineOptions::new(&input)
            .with_output(dir.path().join("missing").join("out.obj"))
            .with_export_mode(ExportMode::Combined),
        engine,
    );

    assert_eq!(result.status, Status::WriteFailure);
    assert_eq!(result.hull_count(), 1);
}

#[test]
fn bad_input_or_output_never_reaches_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cube.obj", CUBE_OBJ);

    let (engine, calls) = ScriptedEngine::completed(vec![]);
    let result = run_with_engine(&PipelineOptions::new(&input).with_output(dir.path().join("out.ply")), engine);
    assert_eq!(result.status, Status::UnsupportedFormat);
    assert_eq!(calls.computed.get(), 0);
    assert_eq!(calls.released.get(), 1);

    let (engine, calls) = ScriptedEngine::completed(vec![]);
    let missing = dir.path().join("absent.obj");
    let result = run_with_engine(&PipelineOptions::new(&missing).with_output(dir.path().join("out.ply")), engine);
    assert_eq!(result.status, Status::InputNotFound);
    assert_eq!(calls.computed.get(), 0);

    let not_off = write_file(dir.path(), "cube.off", CUBE_OBJ);
    let (engine, calls) = ScriptedEngine::completed(vec![]);
    let result = run_with_engine(&PipelineOptions::new(&not_off), engine);
    assert_eq!(result.status, Status::InvalidFormat);
    assert_eq!(calls.computed.get(), 0);
    assert_eq!(calls.released.get(), 1);
}
