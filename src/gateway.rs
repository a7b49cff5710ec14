use crate::engine::{ComputeOutcome, DecompositionEngine};
use crate::{ConvexHull, DecompositionParameters, Error, HullCollection, Mesh, Observers};

/// The result of a decomposition that did not fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Decomposition {
    /// The hulls, in engine order.
    Completed(HullCollection),
    /// The engine was interrupted on request and produced no hulls.
    Cancelled,
}

impl Decomposition {
    /// The hulls, empty if the decomposition was cancelled.
    pub fn into_hulls(self) -> HullCollection {
        match self {
            Decomposition::Completed(hulls) => hulls,
            Decomposition::Cancelled => Vec::new(),
        }
    }
}

/// Owns a [`DecompositionEngine`] for the duration of one decomposition.
///
/// The engine is cleaned and released exactly once: by
/// [`DecompositionGateway::release`], or when the gateway is dropped.
pub struct DecompositionGateway<E: DecompositionEngine> {
    engine: E,
    completed: bool,
    released: bool,
}

impl<E: DecompositionEngine> DecompositionGateway<E> {
    /// Wraps `engine`.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            completed: false,
            released: false,
        }
    }

    /// Normalizes `params` and runs the engine on `mesh`.
    ///
    /// The normalized parameter block is written to the log sink first.
    pub fn compute(
        &mut self,
        mesh: &Mesh,
        params: &DecompositionParameters,
        observers: &mut Observers<'_>,
    ) -> Result<ComputeOutcome, Error> {
        let params = params.normalized();
        observers.log(&params.to_string());
        log::debug!(
            "decomposing {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        self.completed = false;
        match self.engine.compute(mesh, &params, observers) {
            Ok(ComputeOutcome::Completed) => {
                self.completed = true;
                log::info!("decomposition produced {} convex hulls", self.hull_count());
                Ok(ComputeOutcome::Completed)
            }
            Ok(ComputeOutcome::Cancelled) => {
                log::warn!("decomposition cancelled by user");
                observers.log("Decomposition cancelled by user!\n");
                Ok(ComputeOutcome::Cancelled)
            }
            Err(message) => {
                log::error!("decomposition failed: {}", message);
                observers.log(&format!("Decomposition failed: {}\n", message));
                Err(Error::Engine(message))
            }
        }
    }

    /// The number of hulls, `0` unless the last computation completed.
    pub fn hull_count(&self) -> usize {
        if self.completed {
            self.engine.hull_count()
        } else {
            0
        }
    }

    /// The hull with the given index, if the last computation completed.
    pub fn hull(&self, index: usize) -> Option<ConvexHull> {
        if index < self.hull_count() {
            self.engine.hull(index)
        } else {
            None
        }
    }

    /// All hulls, in engine order.
    ///
    /// Fails if the engine cannot produce one of the hulls it counted, since
    /// skipping it would shift the index of every following hull.
    pub fn hulls(&self) -> Result<HullCollection, Error> {
        let count = self.hull_count();
        (0..count)
            .map(|index| {
                self.hull(index).ok_or_else(|| {
                    Error::Engine(format!("missing convex hull #{} of {}", index, count))
                })
            })
            .collect()
    }

    /// Cleans and releases the engine now instead of on drop.
    pub fn release(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.released {
            self.released = true;
            self.completed = false;
            self.engine.clean();
            self.engine.release();
            log::debug!("decomposition engine released");
        }
    }
}

impl<E: DecompositionEngine> Drop for DecompositionGateway<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Runs one decomposition of `mesh` with `engine` and collects its hulls.
///
/// The engine is released before returning, whatever the outcome.
pub fn decompose<E: DecompositionEngine>(
    engine: E,
    mesh: &Mesh,
    params: &DecompositionParameters,
    observers: &mut Observers<'_>,
) -> Result<Decomposition, Error> {
    let mut gateway = DecompositionGateway::new(engine);
    match gateway.compute(mesh, params, observers)? {
        ComputeOutcome::Completed => Ok(Decomposition::Completed(gateway.hulls()?)),
        ComputeOutcome::Cancelled => Ok(Decomposition::Cancelled),
    }
}
