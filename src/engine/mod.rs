//! The boundary with the convex decomposition engine.
//!
//! An engine is driven in three steps: [`DecompositionEngine::compute`] runs
//! the decomposition, the resulting hulls are then fetched one by one, and
//! the engine is finally torn down with `clean` followed by `release`. The
//! [`DecompositionGateway`](crate::DecompositionGateway) enforces that
//! sequence.

pub use self::parry::ParryEngine;

use crate::{ConvexHull, DecompositionParameters, Mesh, Observers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod parry;

/// How a successful engine call ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComputeOutcome {
    /// The hulls are available.
    Completed,
    /// The computation was interrupted on request; no hulls are available.
    Cancelled,
}

/// An approximate convex decomposition engine.
pub trait DecompositionEngine {
    /// Decomposes `mesh` into convex hulls.
    ///
    /// `params` are already normalized. The engine may report progress and
    /// log lines through `observers`. An `Err` carries the engine's own
    /// description of the failure.
    fn compute(
        &mut self,
        mesh: &Mesh,
        params: &DecompositionParameters,
        observers: &mut Observers<'_>,
    ) -> Result<ComputeOutcome, String>;

    /// The number of hulls produced by the last completed computation.
    fn hull_count(&self) -> usize;

    /// The hull with the given index, in `[0, hull_count())`.
    fn hull(&self, index: usize) -> Option<ConvexHull>;

    /// Drops the results of the last computation.
    fn clean(&mut self);

    /// Frees every resource held by the engine. Called once, after `clean`.
    fn release(&mut self);
}

/// A flag shared with a running decomposition to request its cancellation.
///
/// Cloning the token shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`CancelToken::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
