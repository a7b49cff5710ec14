use na::Point3;

/// A triangle mesh as read from disk.
///
/// Points are stored in single precision, matching what the text readers
/// produce. Each triangle holds three 0-based indices into `points`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// The mesh vertices.
    pub points: Vec<Point3<f32>>,
    /// The mesh triangles, as 0-based indices into `points`.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from its vertices and triangles.
    ///
    /// Indices are not checked; see [`Mesh::first_invalid_triangle`].
    pub fn new(points: Vec<Point3<f32>>, triangles: Vec<[u32; 3]>) -> Self {
        Self { points, triangles }
    }

    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// The number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The position of the first triangle referencing a vertex outside of
    /// `[0, vertex_count)`, if any.
    pub fn first_invalid_triangle(&self) -> Option<usize> {
        let n = self.points.len();
        self.triangles
            .iter()
            .position(|tri| tri.iter().any(|&i| i as usize >= n))
    }

    /// The vertex coordinates flattened as `[x0, y0, z0, x1, ...]`.
    pub fn flat_points(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
    }

    /// The triangle indices flattened as `[a0, b0, c0, a1, ...]`.
    pub fn flat_triangles(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// One convex piece of a decomposition.
///
/// Hulls never share vertices: `triangles` index into this hull's own
/// `points`, starting at 0.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull {
    /// The hull vertices.
    pub points: Vec<Point3<f64>>,
    /// The hull triangles, as 0-based indices into `points`.
    pub triangles: Vec<[u32; 3]>,
}

impl ConvexHull {
    /// Creates a hull from its vertices and triangles.
    pub fn new(points: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self { points, triangles }
    }

    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// The number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// The hulls of a decomposition, in the order assigned by the engine.
///
/// That order is used for file naming and log numbering.
pub type HullCollection = Vec<ConvexHull>;
