use super::{vrml, write_obj_hull, write_off, Material};
use crate::format::split_output_path;
use crate::{ConvexHull, Error, MeshFormat, Observers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// How hulls are distributed over output files.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportMode {
    /// All hulls are written to the output path.
    Combined,
    /// Hull `k` of `base.ext` is written to `base_k.ext`.
    #[default]
    PerHull,
}

/// The files produced by [`HullExporter::export`].
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written successfully, in hull order.
    pub written: Vec<PathBuf>,
    /// Per-hull files that could not be written.
    ///
    /// Always empty in [`ExportMode::Combined`], where a failure aborts the export.
    pub failed: Vec<Error>,
}

/// Writes convex hulls as OBJ, VRML 2.0 or OFF files.
///
/// The format is selected from the last four characters of the output path
/// (`.obj`, `.wrl` or `.off`, ignoring case).
pub struct HullExporter {
    mode: ExportMode,
    rng: StdRng,
}

impl HullExporter {
    /// An exporter whose VRML colors are seeded from the operating system.
    pub fn new(mode: ExportMode) -> Self {
        Self {
            mode,
            rng: StdRng::from_entropy(),
        }
    }

    /// An exporter producing the same VRML colors on every run.
    pub fn with_seed(mode: ExportMode, seed: u64) -> Self {
        Self {
            mode,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The distribution of hulls over files.
    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    /// Writes `hulls` to `path`, or next to it in per-hull mode.
    ///
    /// In combined mode, failing to write the single output file aborts the
    /// export. In per-hull mode, a file that cannot be written is logged and
    /// recorded in [`ExportReport::failed`], and the remaining hulls are still
    /// written.
    pub fn export(
        &mut self,
        hulls: &[ConvexHull],
        path: &Path,
        observers: &mut Observers<'_>,
    ) -> Result<ExportReport, Error> {
        let format = MeshFormat::from_output_path(path)?;
        observers.log(&format!(
            "+ Generate output: {} convex-hulls \n",
            hulls.len()
        ));

        match self.mode {
            ExportMode::Combined => self.export_combined(format, hulls, path, observers),
            ExportMode::PerHull => self.export_per_hull(format, hulls, path, observers),
        }
    }

    fn export_combined(
        &mut self,
        format: MeshFormat,
        hulls: &[ConvexHull],
        path: &Path,
        observers: &mut Observers<'_>,
    ) -> Result<ExportReport, Error> {
        write_file(path, |out| match format {
            MeshFormat::Obj => {
                writeln!(out, "# convex hulls: {}", hulls.len())?;
                let offsets = combined_vertex_offsets(hulls);
                for (k, (hull, offset)) in hulls.iter().zip(offsets).enumerate() {
                    write_obj_hull(out, hull, k, offset)?;
                }
                Ok(())
            }
            MeshFormat::Vrml2 => {
                let shapes: Vec<_> = hulls
                    .iter()
                    .enumerate()
                    .map(|(k, hull)| (k, hull, Material::random(&mut self.rng)))
                    .collect();
                vrml::write_vrml(out, &shapes)
            }
            MeshFormat::Off => {
                let (points, triangles) = merge_hulls(hulls);
                write_off(out, &points, &triangles)
            }
        })?;

        for (k, hull) in hulls.iter().enumerate() {
            log_hull(observers, k, hull);
        }
        log::info!("wrote {} convex hulls to {}", hulls.len(), path.display());

        Ok(ExportReport {
            written: vec![path.to_path_buf()],
            failed: vec![],
        })
    }

    fn export_per_hull(
        &mut self,
        format: MeshFormat,
        hulls: &[ConvexHull],
        path: &Path,
        observers: &mut Observers<'_>,
    ) -> Result<ExportReport, Error> {
        let (base, ext) = split_output_path(path).ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let mut report = ExportReport::default();

        for (k, hull) in hulls.iter().enumerate() {
            let hull_path = PathBuf::from(format!("{}_{}{}", base, k, ext));
            let result = write_file(&hull_path, |out| match format {
                MeshFormat::Obj => write_obj_hull(out, hull, k, 1),
                MeshFormat::Vrml2 => {
                    let material = Material::random(&mut self.rng);
                    vrml::write_vrml(out, &[(k, hull, material)])
                }
                MeshFormat::Off => write_off(out, &hull.points, &hull.triangles),
            });

            match result {
                Ok(()) => {
                    log_hull(observers, k, hull);
                    report.written.push(hull_path);
                }
                Err(e) => {
                    log::error!("{}", e);
                    observers.log(&format!("Can't write file: {}\n", e));
                    report.failed.push(e);
                }
            }
        }

        log::info!(
            "wrote {} of {} convex hull files next to {}",
            report.written.len(),
            hulls.len(),
            path.display()
        );
        Ok(report)
    }
}

/// The base added to the face indices of each hull in a combined OBJ file.
///
/// Hull `k` starts at `1 + (vertex count of hulls 0..k)`.
pub fn combined_vertex_offsets(hulls: &[ConvexHull]) -> Vec<u64> {
    hulls
        .iter()
        .scan(1u64, |next, hull| {
            let offset = *next;
            *next += hull.vertex_count() as u64;
            Some(offset)
        })
        .collect()
}

/// Concatenates hulls into one vertex and triangle buffer with 0-based indices.
fn merge_hulls(hulls: &[ConvexHull]) -> (Vec<na::Point3<f64>>, Vec<[u32; 3]>) {
    let mut points = Vec::with_capacity(hulls.iter().map(ConvexHull::vertex_count).sum());
    let mut triangles = Vec::with_capacity(hulls.iter().map(ConvexHull::triangle_count).sum());

    for hull in hulls {
        let base = points.len() as u32;
        triangles.extend(hull.triangles.iter().map(|t| t.map(|i| i + base)));
        points.extend_from_slice(&hull.points);
    }

    (points, triangles)
}

fn log_hull(observers: &mut Observers<'_>, index: usize, hull: &ConvexHull) {
    observers.log(&format!(
        "\t CH[{:05}] {} V, {} T\n",
        index,
        hull.vertex_count(),
        hull.triangle_count()
    ));
}

/// Creates `path`, fills it with `contents` and flushes it.
fn write_file(
    path: &Path,
    contents: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), Error> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut out = BufWriter::new(file);
    contents(&mut out).map_err(write_error)?;
    out.flush().map_err(write_error)
}
