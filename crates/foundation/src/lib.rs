pub mod diag;
pub mod math;
pub mod normalize;

// Foundation crate: small, well-tested primitives only.
pub use diag::*;
pub use normalize::*;
