pub mod error;
pub mod math;
pub mod skeleton;

pub use error::{Result, SkelisError};
pub use skeleton::{
    compute, compute_with_config, compute_with_holes, Facet, SkeletonConfig, SkeletonEdge,
    SkeletonOutput,
};
