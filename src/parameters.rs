use std::fmt;

/// The decomposition strategy requested from the engine.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecompositionMode {
    /// Voxel-based decomposition (recommended).
    #[default]
    Voxel,
    /// Tetrahedron-based decomposition.
    Tetrahedron,
}

impl DecompositionMode {
    /// Maps the integer mode used by V-HACD front-ends: `0` is voxel-based,
    /// anything else is tetrahedron-based.
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            DecompositionMode::Voxel
        } else {
            DecompositionMode::Tetrahedron
        }
    }

    /// The integer code of this mode.
    pub fn code(self) -> i32 {
        match self {
            DecompositionMode::Voxel => 0,
            DecompositionMode::Tetrahedron => 1,
        }
    }
}

/// Parameters of the approximate convex decomposition.
///
/// Out-of-range values are clamped by [`DecompositionParameters::normalized`]
/// rather than rejected.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecompositionParameters {
    /// Maximum number of voxels generated during voxelization.
    ///
    /// Values below 64 disable the volumetric subdivision entirely.
    pub resolution: i32,
    /// Maximum allowed concavity.
    pub concavity: f64,
    /// Granularity of the search for the best clipping plane.
    pub plane_downsampling: i32,
    /// Precision of the convex-hull generation during clipping.
    pub convex_hull_downsampling: i32,
    /// Bias toward clipping along symmetry planes.
    pub alpha: f64,
    /// Bias toward clipping along revolution axes.
    pub beta: f64,
    /// Maximum number of convex hulls produced.
    pub max_convex_hulls: u32,
    /// Normalize the mesh with a principal component analysis before decomposing it.
    pub pca: bool,
    /// Voxel- or tetrahedron-based decomposition.
    pub mode: DecompositionMode,
    /// Maximum number of vertices per convex hull.
    pub max_vertices_per_hull: u32,
    /// Minimum volume of a hull for vertices to be added to it.
    pub min_volume_per_hull: f64,
    /// Approximate hulls from the voxelization instead of the input triangles.
    pub convex_hull_approximation: bool,
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            resolution: 100_000,
            concavity: 0.001,
            plane_downsampling: 4,
            convex_hull_downsampling: 4,
            alpha: 0.05,
            beta: 0.05,
            max_convex_hulls: 1024,
            pca: false,
            mode: DecompositionMode::Voxel,
            max_vertices_per_hull: 64,
            min_volume_per_hull: 0.0001,
            convex_hull_approximation: true,
        }
    }
}

impl DecompositionParameters {
    /// The smallest resolution that keeps the volumetric subdivision enabled.
    pub const MIN_RESOLUTION: i32 = 64;

    /// Returns a copy with the out-of-range values clamped.
    ///
    /// A resolution below [`Self::MIN_RESOLUTION`] becomes `0`, and both
    /// downsampling factors are raised to at least `1`.
    pub fn normalized(mut self) -> Self {
        if self.resolution < Self::MIN_RESOLUTION {
            self.resolution = 0;
        }
        self.plane_downsampling = self.plane_downsampling.max(1);
        self.convex_hull_downsampling = self.convex_hull_downsampling.max(1);
        self
    }

    /// Returns `true` if the volumetric subdivision is disabled.
    pub fn is_subdivision_disabled(&self) -> bool {
        self.resolution < Self::MIN_RESOLUTION
    }
}

impl fmt::Display for DecompositionParameters {
    /// The parameter block written to the log before a decomposition.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+ Parameters")?;
        writeln!(f, "\t resolution                                  {}", self.resolution)?;
        writeln!(f, "\t max. concavity                              {}", self.concavity)?;
        writeln!(f, "\t plane down-sampling                         {}", self.plane_downsampling)?;
        writeln!(f, "\t convex-hull down-sampling                   {}", self.convex_hull_downsampling)?;
        writeln!(f, "\t alpha                                       {}", self.alpha)?;
        writeln!(f, "\t beta                                        {}", self.beta)?;
        writeln!(f, "\t maxhulls                                    {}", self.max_convex_hulls)?;
        writeln!(f, "\t pca                                         {}", u8::from(self.pca))?;
        writeln!(f, "\t mode                                        {}", self.mode.code())?;
        writeln!(f, "\t max. vertices per convex-hull               {}", self.max_vertices_per_hull)?;
        writeln!(f, "\t min. volume to add vertices to convex-hulls {}", self.min_volume_per_hull)?;
        writeln!(
            f,
            "\t convex-hull approximation                   {}",
            u8::from(self.convex_hull_approximation)
        )
    }
}
