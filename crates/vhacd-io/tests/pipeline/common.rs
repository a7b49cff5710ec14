use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use vhacd_io::na::Point3;
use vhacd_io::{ComputeOutcome, ConvexHull, DecompositionEngine, DecompositionParameters, Mesh, Observers};

/// A unit cube with quad faces.
pub const CUBE_OBJ: &str = "\
# unit cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A hull with `n` vertices on a line and a single triangle.
pub fn hull_with_vertices(n: usize) -> ConvexHull {
    ConvexHull::new(
        (0..n).map(|i| Point3::new(i as f64 * 0.5, 1.0, -2.0)).collect(),
        vec![[0, 1, 2]],
    )
}

/// Counters shared between a test and a [`ScriptedEngine`] it gave away.
#[derive(Clone, Default)]
pub struct EngineCalls {
    pub computed: Rc<Cell<usize>>,
    pub released: Rc<Cell<usize>>,
}

/// An engine returning a fixed outcome and fixed hulls.
pub struct ScriptedEngine {
    pub outcome: Result<ComputeOutcome, String>,
    pub hulls: Vec<ConvexHull>,
    pub calls: EngineCalls,
}

impl ScriptedEngine {
    pub fn completed(hulls: Vec<ConvexHull>) -> (Self, EngineCalls) {
        Self::with_outcome(Ok(ComputeOutcome::Completed), hulls)
    }

    pub fn with_outcome(
        outcome: Result<ComputeOutcome, String>,
        hulls: Vec<ConvexHull>,
    ) -> (Self, EngineCalls) {
        let calls = EngineCalls::default();
        let engine = Self {
            outcome,
            hulls,
            calls: calls.clone(),
        };
        (engine, calls)
    }
}

impl DecompositionEngine for ScriptedEngine {
    fn compute(
        &mut self,
        _: &Mesh,
        _: &DecompositionParameters,
        observers: &mut Observers<'_>,
    ) -> Result<ComputeOutcome, String> {
        self.calls.computed.set(self.calls.computed.get() + 1);
        observers.log("scripted engine running\n");
        self.outcome.clone()
    }

    fn hull_count(&self) -> usize {
        self.hulls.len()
    }

    fn hull(&self, index: usize) -> Option<ConvexHull> {
        self.hulls.get(index).cloned()
    }

    fn clean(&mut self) {}

    fn release(&mut self) {
        self.calls.released.set(self.calls.released.get() + 1);
    }
}
