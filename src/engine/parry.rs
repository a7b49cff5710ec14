use super::{CancelToken, ComputeOutcome, DecompositionEngine};
use crate::{ConvexHull, DecompositionMode, DecompositionParameters, Mesh, Observers};
use na::Point3;
use parry3d_f64::transformation::try_convex_hull;
use parry3d_f64::transformation::vhacd::{VHACDParameters, VHACD};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// A [`DecompositionEngine`] running parry's V-HACD implementation.
///
/// The engine works in double precision, so the hull points are more
/// precise than the single-precision input mesh.
///
/// Parry has no equivalent for the PCA, tetrahedron mode, max. vertices per
/// hull and min. volume per hull parameters: they are reported in the log
/// and otherwise ignored.
#[derive(Default)]
pub struct ParryEngine {
    hulls: Vec<ConvexHull>,
    cancel: Option<CancelToken>,
}

impl ParryEngine {
    /// A new engine, without results.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new engine that stops at its next checkpoint once `token` is cancelled.
    pub fn with_cancel_token(token: CancelToken) -> Self {
        Self {
            hulls: Vec::new(),
            cancel: Some(token),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Translates the parameters into parry's V-HACD parameters.
    ///
    /// The resolution is a voxel budget here, while parry expects a number
    /// of voxels along the largest axis: the cube root of the budget is used.
    pub fn vhacd_parameters(params: &DecompositionParameters) -> VHACDParameters {
        VHACDParameters {
            concavity: params.concavity,
            alpha: params.alpha,
            beta: params.beta,
            resolution: voxels_per_axis(params.resolution),
            plane_downsampling: params.plane_downsampling.max(1) as u32,
            convex_hull_downsampling: params.convex_hull_downsampling.max(1) as u32,
            convex_hull_approximation: params.convex_hull_approximation,
            max_convex_hulls: params.max_convex_hulls,
            ..VHACDParameters::default()
        }
    }

    fn report_ignored_parameters(params: &DecompositionParameters, observers: &mut Observers<'_>) {
        let mut ignored = Vec::new();
        if params.pca {
            ignored.push("pca");
        }
        if params.mode == DecompositionMode::Tetrahedron {
            ignored.push("tetrahedron mode");
        }
        ignored.push("max. vertices per convex-hull");
        ignored.push("min. volume per convex-hull");

        let message = format!("parry V-HACD ignores: {}", ignored.join(", "));
        log::debug!("{}", message);
        observers.log(&format!("\t {}\n", message));
    }
}

fn voxels_per_axis(resolution: i32) -> u32 {
    (resolution.max(1) as f64).cbrt().round().max(1.0) as u32
}

impl DecompositionEngine for ParryEngine {
    fn compute(
        &mut self,
        mesh: &Mesh,
        params: &DecompositionParameters,
        observers: &mut Observers<'_>,
    ) -> Result<ComputeOutcome, String> {
        self.hulls.clear();

        if self.is_cancelled() {
            return Ok(ComputeOutcome::Cancelled);
        }
        if mesh.points.is_empty() || mesh.triangles.is_empty() {
            return Err("the mesh has no triangles".to_string());
        }
        if let Some(t) = mesh.first_invalid_triangle() {
            return Err(format!(
                "triangle {} references a vertex out of range",
                t
            ));
        }

        Self::report_ignored_parameters(params, observers);
        let points: Vec<Point3<f64>> = mesh.points.iter().map(|p| p.cast::<f64>()).collect();
        let indices = &mesh.triangles;

        let hulls = if params.is_subdivision_disabled() {
            observers.progress(0.0, 0.0, 0.0, "Convex hull", "Whole mesh");
            let hull = catch_engine_panic(|| try_convex_hull(&points))?
                .map_err(|e| e.to_string())?;
            vec![hull]
        } else {
            let vhacd_params = Self::vhacd_parameters(params);
            observers.progress(0.0, 0.0, 0.0, "Voxelization", "Decomposition");
            let keep_primitives = !params.convex_hull_approximation;
            let decomposition = catch_engine_panic(|| {
                VHACD::decompose(&vhacd_params, &points, indices, keep_primitives)
            })?;
            observers.progress(50.0, 100.0, 100.0, "Decomposition", "Clipping");

            if self.is_cancelled() {
                return Ok(ComputeOutcome::Cancelled);
            }

            observers.progress(50.0, 0.0, 0.0, "Merging", "Convex hulls");
            catch_engine_panic(|| {
                if params.convex_hull_approximation {
                    decomposition.compute_convex_hulls(vhacd_params.convex_hull_downsampling)
                } else {
                    decomposition.compute_exact_convex_hulls(&points, indices)
                }
            })?
        };

        // V-HACD leaves empty hulls behind for clusters that vanished while clipping.
        let num_produced = hulls.len();
        self.hulls = hulls
            .into_iter()
            .filter(|(points, triangles)| points.len() >= 4 && !triangles.is_empty())
            .map(|(points, triangles)| ConvexHull::new(points, triangles))
            .collect();
        let num_discarded = num_produced - self.hulls.len();
        if num_discarded > 0 {
            log::debug!("discarded {} degenerate convex hulls", num_discarded);
            observers.log(&format!(
                "\t discarded {} degenerate convex-hulls\n",
                num_discarded
            ));
        }
        observers.progress(100.0, 100.0, 100.0, "Merging", "Convex hulls");
        Ok(ComputeOutcome::Completed)
    }

    fn hull_count(&self) -> usize {
        self.hulls.len()
    }

    fn hull(&self, index: usize) -> Option<ConvexHull> {
        self.hulls.get(index).cloned()
    }

    fn clean(&mut self) {
        self.hulls.clear();
    }

    fn release(&mut self) {
        self.hulls = Vec::new();
        self.cancel = None;
    }
}

/// Runs `f`, turning a panic inside parry into an engine failure.
fn catch_engine_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| format!("the engine panicked: {}", panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown cause".to_string()
    }
}
