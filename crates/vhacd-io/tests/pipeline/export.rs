use crate::common::hull_with_vertices;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use vhacd_io::io::read_off;
use vhacd_io::{ConvexHull, Error, ExportMode, HullExporter, Observers, Status};

fn three_hulls() -> Vec<ConvexHull> {
    vec![
        hull_with_vertices(4),
        hull_with_vertices(5),
        hull_with_vertices(3),
    ]
}

fn face_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| line.starts_with("f ")).collect()
}

fn export(mode: ExportMode, hulls: &[ConvexHull], path: &Path) -> Result<vhacd_io::ExportReport, Error> {
    HullExporter::with_seed(mode, 42).export(hulls, path, &mut Observers::none())
}

#[test]
fn combined_obj_offsets_follow_previous_hulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hulls.obj");
    let hulls = three_hulls();

    let report = export(ExportMode::Combined, &hulls, &path).unwrap();
    assert_eq!(report.written, vec![path.clone()]);
    assert!(report.failed.is_empty());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# convex hulls: 3\n"));
    assert_eq!(face_lines(&text), vec!["f 1 2 3", "f 5 6 7", "f 10 11 12"]);
    for k in 0..3 {
        assert!(text.contains(&format!("o convex_{}\n", k)));
    }
}

#[test]
fn combined_obj_loads_in_other_readers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hulls.obj");
    let hulls = three_hulls();
    let _ = export(ExportMode::Combined, &hulls, &path).unwrap();

    let data = obj::ObjData::load_buf(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(data.position.len(), 12);
    assert_eq!(data.objects.len(), 3);

    let mut base = 0;
    for (object, hull) in data.objects.iter().zip(&hulls) {
        let polys: Vec<_> = object.groups.iter().flat_map(|g| &g.polys).collect();
        assert_eq!(polys.len(), hull.triangle_count());
        let indices: Vec<usize> = polys[0].0.iter().map(|tuple| tuple.0).collect();
        assert_eq!(indices, vec![base, base + 1, base + 2]);
        base += hull.vertex_count();
    }
}

#[test]
fn per_hull_obj_files_restart_at_one() {
    let dir = tempfile::tempdir().unwrap();
    let hulls = three_hulls();

    let report = export(ExportMode::PerHull, &hulls, &dir.path().join("Hulls.OBJ")).unwrap();
    assert_eq!(report.written.len(), 3);
    assert!(!dir.path().join("Hulls.OBJ").exists());

    for k in 0..3 {
        let path = dir.path().join(format!("Hulls_{}.obj", k));
        assert_eq!(report.written[k], path);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(face_lines(&text), vec!["f 1 2 3"]);
        assert!(text.starts_with(&format!("o convex_{}\n", k)));
    }
}

#[test]
fn per_hull_failures_do_not_stop_the_export() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the second hull file should go.
    fs::create_dir(dir.path().join("hulls_1.wrl")).unwrap();

    let report = export(ExportMode::PerHull, &three_hulls(), &dir.path().join("hulls.wrl")).unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0], Error::Write { .. }));
    assert!(dir.path().join("hulls_0.wrl").is_file());
    assert!(dir.path().join("hulls_2.wrl").is_file());
}

#[test]
fn combined_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("hulls.obj");

    let err = export(ExportMode::Combined, &three_hulls(), &path).unwrap_err();
    assert_eq!(err.status(), Status::WriteFailure);
}

#[test]
fn unknown_output_extension_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let err = export(ExportMode::PerHull, &three_hulls(), &dir.path().join("hulls.stl")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn zero_hulls_give_well_formed_files() {
    let dir = tempfile::tempdir().unwrap();

    let obj = dir.path().join("empty.obj");
    let _ = export(ExportMode::Combined, &[], &obj).unwrap();
    assert_eq!(fs::read_to_string(&obj).unwrap(), "# convex hulls: 0\n");

    let off = dir.path().join("empty.off");
    let _ = export(ExportMode::Combined, &[], &off).unwrap();
    assert!(read_off(&off).unwrap().is_empty());

    let wrl = dir.path().join("empty.wrl");
    let _ = export(ExportMode::Combined, &[], &wrl).unwrap();
    let text = fs::read_to_string(&wrl).unwrap();
    assert!(text.starts_with("#VRML V2.0 utf8\n"));
    assert!(!text.contains("Shape"));

    let report = export(ExportMode::PerHull, &[], &dir.path().join("none.obj")).unwrap();
    assert!(report.written.is_empty());
    assert!(!dir.path().join("none_0.obj").exists());
}

#[test]
fn combined_off_merges_hulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hulls.off");
    let hulls = three_hulls();
    let _ = export(ExportMode::Combined, &hulls, &path).unwrap();

    let mesh = read_off(&path).unwrap();
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [4, 5, 6], [9, 10, 11]]);
}

#[test]
fn vrml_shapes_get_distinct_non_gray_colors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hulls.wrl");
    let _ = export(ExportMode::Combined, &three_hulls(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("#VRML V2.0 utf8").count(), 1);
    assert_eq!(text.matches("Shape {").count(), 3);
    assert!(text.contains("coord DEF co_2 Coordinate"));

    let colors: Vec<Vec<f32>> = text
        .lines()
        .filter_map(|line| line.trim().strip_prefix("diffuseColor "))
        .map(|rgb| rgb.split_whitespace().map(|c| c.parse().unwrap()).collect())
        .collect();
    assert_eq!(colors.len(), 3);
    for rgb in &colors {
        assert!(rgb[0] != rgb[1] && rgb[1] != rgb[2] && rgb[0] != rgb[2]);
    }
}

#[test]
fn seeded_exports_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.wrl");
    let second = dir.path().join("second.wrl");
    let _ = export(ExportMode::Combined, &three_hulls(), &first).unwrap();
    let _ = export(ExportMode::Combined, &three_hulls(), &second).unwrap();

    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}

#[test]
fn export_log_lists_every_hull() {
    let dir = tempfile::tempdir().unwrap();
    let mut lines = String::new();
    let mut log = |text: &str| lines.push_str(text);

    let _ = HullExporter::new(ExportMode::PerHull)
        .export(
            &three_hulls(),
            &dir.path().join("hulls.obj"),
            &mut Observers::none().with_log(&mut log),
        )
        .unwrap();

    assert!(lines.starts_with("+ Generate output: 3 convex-hulls \n"));
    assert!(lines.contains("\t CH[00001] 5 V, 1 T\n"));
}
