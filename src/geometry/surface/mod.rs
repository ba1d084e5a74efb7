mod spiral;

pub use spiral::{evaluate, ShapeParameters};

use crate::math::Point3;

/// Trait for parametric surfaces in 3D space.
///
/// The `u` parameter is angular and sampled over `[0, 2*pi]` by the mesher;
/// `v` is an unbounded offset whose range is chosen by the caller.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// Evaluation is total: non-finite inputs propagate into the result.
    fn evaluate(&self, u: f64, v: f64) -> Point3;
}
