use std::f64::consts::TAU;

use tracing::trace;

use crate::error::Result;
use crate::geometry::surface::Surface;
use crate::math::{Point2, Point3};

use super::{GridSpec, TriangleMesh};

/// Scale applied to the per-row arc-length estimate along `u`.
const U_ARC_SCALE: f64 = 0.025;

/// Scale applied to the per-node arc-length estimate along `v`.
const V_ARC_SCALE: f64 = 0.25;

/// Tessellates a parametric surface on a regular `u x v` grid.
///
/// Produces `(u_steps + 1) * (v_steps + 1)` vertices, one arc-length UV per
/// vertex and two triangles per grid cell. Normals and tangents are left
/// empty; see [`super::SynthesizeAttributes`].
///
/// Only the index range of the grid is checked here. A zero step count
/// collapses that axis to a single sample at the start of its range and
/// yields no triangles.
pub struct TessellateSurface<'a, S: Surface + ?Sized> {
    surface: &'a S,
    grid: GridSpec,
}

impl<'a, S: Surface + ?Sized> TessellateSurface<'a, S> {
    /// Creates a new `TessellateSurface` operation.
    #[must_use]
    pub fn new(surface: &'a S, grid: GridSpec) -> Self {
        Self { surface, grid }
    }

    /// Executes the tessellation, returning positions, UVs and indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has more nodes than a `u32` index can
    /// address.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let grid = &self.grid;
        grid.check_index_range()?;
        let du = step(TAU, grid.u_steps);
        let dv = step(grid.v_max - grid.v_min, grid.v_steps);

        let mut mesh = TriangleMesh {
            vertices: Vec::with_capacity(grid.vertex_count()),
            uvs: Vec::with_capacity(grid.vertex_count()),
            indices: Vec::with_capacity(grid.triangle_count()),
            ..TriangleMesh::default()
        };

        let mut arc = ArcLengthAccumulator::default();
        for i in 0..=grid.u_steps {
            let u = i as f64 * du;

            // One u-estimate per row, measured against the previous row at v = 0.
            let row_start = self.surface.evaluate(u, grid.v_min);
            let previous_row = self.surface.evaluate(u - du, 0.0);
            arc.advance_u(&row_start, &previous_row);
            trace!(row = i, accumulated_u = arc.u, "row arc length");

            for j in 0..=grid.v_steps {
                let v = grid.v_min + j as f64 * dv;
                let current = self.surface.evaluate(u, v);
                let previous = self.surface.evaluate(u, v - dv);
                arc.advance_v(&current, &previous);

                mesh.vertices.push(current);
                mesh.uvs.push(arc.uv());
            }
        }

        // Node indices fit in u32 after the range check above.
        for i in 0..grid.u_steps {
            for j in 0..grid.v_steps {
                let top_left = grid.node_index(i, j) as u32;
                let top_right = top_left + 1;
                let bottom_left = grid.node_index(i + 1, j) as u32;
                let bottom_right = bottom_left + 1;
                mesh.indices.push([top_left, bottom_left, bottom_right]);
                mesh.indices.push([top_left, bottom_right, top_right]);
            }
        }

        Ok(mesh)
    }
}

/// Parameter increment for `steps` segments over `span`; zero when there are
/// no segments.
#[allow(clippy::cast_precision_loss)]
fn step(span: f64, steps: usize) -> f64 {
    if steps == 0 {
        0.0
    } else {
        span / steps as f64
    }
}

/// Running arc-length texture coordinates.
///
/// `u` accumulates across the whole grid; `v` restarts at zero on every row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ArcLengthAccumulator {
    u: f64,
    v: f64,
}

impl ArcLengthAccumulator {
    /// Starts a new row: adds the scaled `u` increment and resets `v`.
    fn advance_u(&mut self, current: &Point3, previous: &Point3) {
        self.u += (current - previous).norm() * U_ARC_SCALE;
        self.v = 0.0;
    }

    fn advance_v(&mut self, current: &Point3, previous: &Point3) {
        self.v += (current - previous).norm() * V_ARC_SCALE;
    }

    fn uv(&self) -> Point2 {
        Point2::new(self.u, self.v)
    }
}
