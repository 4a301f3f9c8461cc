use thiserror::Error;

/// Top-level error type for the Skelis kernel.
#[derive(Debug, Error)]
pub enum SkelisError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Sweep(#[from] SweepError),
}

/// Structural problems in the input polygon, detected before the sweep starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("ring has {count} points, at least 3 are required")]
    TooFewPoints { count: usize },

    #[error("coincident consecutive points at index {index}")]
    CoincidentPoints { index: usize },

    #[error("collinear point triple at index {index}")]
    CollinearTriple { index: usize },

    #[error("ring is self-intersecting between segments {first} and {second}")]
    SelfIntersecting { first: usize, second: usize },

    #[error("hole {hole} lies outside the outer ring")]
    HoleOutsideOuter { hole: usize },

    #[error("hole {hole} is wound in the same orientation as the outer ring")]
    HoleOrientation { hole: usize },
}

/// Failures of the sweep itself on structurally valid input.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("chain resolution safety bound of {limit} exceeded, input is numerically degenerate")]
    SafetyBoundExceeded { limit: usize },

    #[error("wavefront left {remaining} unresolved vertices after the event queue drained")]
    StalledWavefront { remaining: usize },

    #[error("facet for edge {edge} could not be closed")]
    OpenFacet { edge: usize },
}

/// Convenience type alias for results using [`SkelisError`].
pub type Result<T> = std::result::Result<T, SkelisError>;
