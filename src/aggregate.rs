use crate::{ConvexHull, Status};

/// What a pipeline run hands back to its caller.
///
/// `vertices` and `faces` always have the same length: entry `k` holds the
/// vertices and the triangles of hull `k`, with indices local to that hull.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineResult {
    /// How the run ended.
    pub status: Status,
    /// The vertices of each hull.
    pub vertices: Vec<Vec<[f64; 3]>>,
    /// The triangles of each hull.
    pub faces: Vec<Vec<[u32; 3]>>,
}

impl PipelineResult {
    /// A result without hulls.
    pub fn empty(status: Status) -> Self {
        Self {
            status,
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// The integer status code.
    pub fn code(&self) -> i32 {
        self.status.code()
    }

    /// Returns `true` if the run succeeded.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The number of hulls.
    pub fn hull_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Repackages hulls into the nested form returned to callers, preserving
/// their order. The status of the returned result is [`Status::Success`].
pub fn aggregate(hulls: &[ConvexHull]) -> PipelineResult {
    let (vertices, faces) = hulls
        .iter()
        .map(|hull| {
            let vertices: Vec<[f64; 3]> = hull.points.iter().map(|p| [p.x, p.y, p.z]).collect();
            (vertices, hull.triangles.clone())
        })
        .unzip();

    PipelineResult {
        status: Status::Success,
        vertices,
        faces,
    }
}
