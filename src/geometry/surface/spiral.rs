use serde::{Deserialize, Serialize};

use crate::math::Point3;

use super::Surface;

/// Evaluates the spiral tube with shape `(a, b, n)` at `(u, v)`.
///
/// ```text
/// x = (a + b*sin(n*u))*cos(u) - v*sin(u)
/// y = (a + b*sin(n*u))*sin(u) + v*cos(u)
/// z = b*cos(n*u)
/// ```
#[must_use]
pub fn evaluate(a: f64, b: f64, n: f64, u: f64, v: f64) -> Point3 {
    let radius = a + b * (n * u).sin();
    let (su, cu) = u.sin_cos();
    Point3::new(radius * cu - v * su, radius * su + v * cu, b * (n * u).cos())
}

/// Shape of a spiral tube surface.
///
/// The centre line winds `n` times around a circle of radius `a` while
/// oscillating with amplitude `b`; `v` offsets the point tangentially to the
/// base circle, sweeping a ribbon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParameters {
    /// Base radius.
    pub a: f64,
    /// Spiral amplitude.
    pub b: f64,
    /// Winding count.
    pub n: f64,
}

impl ShapeParameters {
    /// Creates new shape parameters.
    #[must_use]
    pub fn new(a: f64, b: f64, n: f64) -> Self {
        Self { a, b, n }
    }
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            a: 3.0,
            b: 1.0,
            n: 2.0,
        }
    }
}

impl Surface for ShapeParameters {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        evaluate(self.a, self.b, self.n, u, v)
    }
}
