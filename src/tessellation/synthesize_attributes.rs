use tracing::debug;

use crate::error::{AttributeError, Result};
use crate::math::{cross_2d, Point2, Point3, Vector3, TOLERANCE};

/// Per-vertex normals and tangents, one of each per input vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttributes {
    /// Unit (or zero) vertex normals.
    pub normals: Vec<Vector3>,
    /// Unit (or zero) vertex tangents aligned with increasing texture `u`.
    pub tangents: Vec<Vector3>,
}

/// Computes smooth vertex normals and tangents for an indexed triangle mesh.
///
/// Each triangle contributes its unit face normal and its UV-derived tangent
/// to all three of its vertices with equal weight. The sums are normalized
/// afterwards; a vertex whose sum is zero keeps a zero vector.
///
/// Triangles with zero area contribute nothing. Triangles whose UV mapping
/// is degenerate still contribute a normal but no tangent. Degeneracy is
/// judged relative to each triangle's own edge lengths, so uniformly scaling
/// a mesh (or its UVs) does not change which contributions are kept.
pub struct SynthesizeAttributes<'a> {
    positions: &'a [Point3],
    indices: &'a [[u32; 3]],
    uvs: &'a [Point2],
}

impl<'a> SynthesizeAttributes<'a> {
    /// Creates a new `SynthesizeAttributes` operation.
    #[must_use]
    pub fn new(positions: &'a [Point3], indices: &'a [[u32; 3]], uvs: &'a [Point2]) -> Self {
        Self {
            positions,
            indices,
            uvs,
        }
    }

    /// Executes the synthesis.
    ///
    /// # Errors
    ///
    /// Returns an error if the UV count differs from the vertex count or an
    /// index refers to a vertex that does not exist.
    pub fn execute(&self) -> Result<VertexAttributes> {
        let vertex_count = self.positions.len();
        if self.uvs.len() != vertex_count {
            return Err(AttributeError::UvCountMismatch {
                uvs: self.uvs.len(),
                vertices: vertex_count,
            }
            .into());
        }
        if let Some(&index) = self
            .indices
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(AttributeError::IndexOutOfBounds {
                index,
                vertices: vertex_count,
            }
            .into());
        }

        let mut normals = vec![Vector3::zeros(); vertex_count];
        let mut tangents = vec![Vector3::zeros(); vertex_count];
        let mut degenerate_area = 0usize;
        let mut degenerate_uv = 0usize;

        for tri in self.indices {
            let [i0, i1, i2] = tri.map(|i| i as usize);
            let Some(face) = face_vectors(
                [&self.positions[i0], &self.positions[i1], &self.positions[i2]],
                [&self.uvs[i0], &self.uvs[i1], &self.uvs[i2]],
            ) else {
                degenerate_area += 1;
                continue;
            };
            if face.tangent.is_none() {
                degenerate_uv += 1;
            }

            for idx in [i0, i1, i2] {
                normals[idx] += face.normal;
                if let Some(tangent) = face.tangent {
                    tangents[idx] += tangent;
                }
            }
        }

        if degenerate_area > 0 || degenerate_uv > 0 {
            debug!(
                degenerate_area,
                degenerate_uv, "skipped degenerate triangle contributions"
            );
        }

        normals.iter_mut().for_each(normalize_accumulated);
        tangents.iter_mut().for_each(normalize_accumulated);

        Ok(VertexAttributes { normals, tangents })
    }
}

/// Unit normal and tangent of one triangle.
#[derive(Debug, Clone, Copy)]
struct FaceVectors {
    normal: Vector3,
    tangent: Option<Vector3>,
}

/// Computes the face normal and tangent of a triangle.
///
/// Returns `None` if the triangle has zero area relative to its edge lengths.
/// The tangent is `None` when the UV determinant is zero relative to the
/// lengths of the UV edges. Both tests are independent of the mesh scale.
fn face_vectors(positions: [&Point3; 3], uvs: [&Point2; 3]) -> Option<FaceVectors> {
    let edge1 = positions[1] - positions[0];
    let edge2 = positions[2] - positions[0];

    // |e1 x e2| = |e1| |e2| sin(angle)
    let cross = edge1.cross(&edge2);
    let cross_len = cross.norm();
    if cross_len.is_nan() || cross_len <= TOLERANCE * edge1.norm() * edge2.norm() {
        return None;
    }
    let normal = cross / cross_len;

    let delta_uv1 = uvs[1] - uvs[0];
    let delta_uv2 = uvs[2] - uvs[0];
    let det = cross_2d(&delta_uv1, &delta_uv2);
    // NaN determinants fail the comparison and are skipped too.
    let tangent = (det.abs() > TOLERANCE * delta_uv1.norm() * delta_uv2.norm())
        .then(|| (edge1 * delta_uv2.y - edge2 * delta_uv1.y) / det);

    Some(FaceVectors { normal, tangent })
}

/// Scales an accumulated vector to unit length, leaving zero vectors alone.
fn normalize_accumulated(v: &mut Vector3) {
    let len = v.norm();
    if len > 0.0 {
        *v /= len;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SpiralMeshError;
    use approx::assert_relative_eq;

    /// Unit square in the XY plane with matching UVs, split along the diagonal.
    fn unit_square() -> (Vec<Point3>, Vec<[u32; 3]>, Vec<Point2>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let uvs = positions.iter().map(|p| Point2::new(p.x, p.y)).collect();
        (positions, vec![[0, 1, 2], [0, 2, 3]], uvs)
    }

    #[test]
    fn flat_square_normals_and_tangents() {
        let (positions, indices, uvs) = unit_square();
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        assert_eq!(attrs.normals.len(), 4);
        assert_eq!(attrs.tangents.len(), 4);
        for n in &attrs.normals {
            assert_relative_eq!(*n, Vector3::z(), epsilon = 1e-12);
        }
        for t in &attrs.tangents {
            assert_relative_eq!(*t, Vector3::x(), epsilon = 1e-12);
        }
    }

    #[test]
    fn tangent_follows_texture_u() {
        let (positions, indices, _) = unit_square();
        // Texture u runs along +Y.
        let uvs: Vec<_> = positions.iter().map(|p| Point2::new(p.y, -p.x)).collect();
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        for t in &attrs.tangents {
            assert_relative_eq!(*t, Vector3::y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn reversed_winding_flips_normal() {
        let (positions, _, uvs) = unit_square();
        let indices = vec![[0, 2, 1], [0, 3, 2]];
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        for n in &attrs.normals {
            assert_relative_eq!(*n, -Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn shared_vertex_averages_faces() {
        // Two faces meeting at a right-angle fold along the X axis.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let uvs = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let indices = vec![[0, 1, 2], [0, 3, 1]];
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        // Faces have normals +Z and +Y; vertices 0 and 1 are shared.
        let expected = Vector3::new(0.0, 1.0, 1.0).normalize();
        assert_relative_eq!(attrs.normals[0], expected, epsilon = 1e-12);
        assert_relative_eq!(attrs.normals[1], expected, epsilon = 1e-12);
        assert_relative_eq!(attrs.normals[2], Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(attrs.normals[3], Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn collinear_triangle_contributes_zero() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let uvs = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let attrs = SynthesizeAttributes::new(&positions, &[[0, 1, 2]], &uvs)
            .execute()
            .unwrap();
        for (n, t) in attrs.normals.iter().zip(&attrs.tangents) {
            assert_eq!(*n, Vector3::zeros());
            assert_eq!(*t, Vector3::zeros());
        }
    }

    #[test]
    fn degenerate_uv_skips_tangent_only() {
        let (positions, indices, _) = unit_square();
        let uvs = vec![Point2::new(0.5, 0.5); 4];
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        for (n, t) in attrs.normals.iter().zip(&attrs.tangents) {
            assert_relative_eq!(*n, Vector3::z(), epsilon = 1e-12);
            assert_eq!(*t, Vector3::zeros());
            assert!(t.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn nearly_collinear_triangle_contributes_zero() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1e-12, 0.0),
        ];
        let uvs = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let attrs = SynthesizeAttributes::new(&positions, &[[0, 1, 2]], &uvs)
            .execute()
            .unwrap();
        assert!(attrs.normals.iter().all(|n| *n == Vector3::zeros()));
        assert!(attrs.tangents.iter().all(|t| *t == Vector3::zeros()));
    }

    #[test]
    fn nearly_degenerate_uv_skips_tangent() {
        let (positions, _, _) = unit_square();
        // The UV triangle is a sliver: its edges meet at an angle of 1e-12.
        let uvs = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1e-12),
            Point2::new(0.0, 1.0),
        ];
        let attrs = SynthesizeAttributes::new(&positions, &[[0, 1, 2]], &uvs)
            .execute()
            .unwrap();
        for (n, t) in attrs.normals.iter().zip(&attrs.tangents).take(3) {
            assert_relative_eq!(*n, Vector3::z(), epsilon = 1e-12);
            assert_eq!(*t, Vector3::zeros());
        }
    }

    #[test]
    fn small_uv_determinant_keeps_tangent() {
        let (positions, indices, _) = unit_square();
        // Well-shaped UV triangles whose determinant is only 1e-14.
        let uvs: Vec<_> = positions
            .iter()
            .map(|p| Point2::new(p.x * 1e-7, p.y * 1e-7))
            .collect();
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        for t in &attrs.tangents {
            assert_relative_eq!(*t, Vector3::x(), epsilon = 1e-9);
        }
    }

    #[test]
    fn small_square_normals_and_tangents() {
        let (positions, indices, uvs) = unit_square();
        let scale = 1e-6;
        let positions: Vec<_> = positions.iter().map(|p| p * scale).collect();
        let uvs: Vec<_> = uvs.iter().map(|uv| uv * scale).collect();
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        for n in &attrs.normals {
            assert_relative_eq!(*n, Vector3::z(), epsilon = 1e-9);
        }
        for t in &attrs.tangents {
            assert_relative_eq!(*t, Vector3::x(), epsilon = 1e-9);
        }
    }

    #[test]
    fn unreferenced_vertex_keeps_zero() {
        let (mut positions, indices, mut uvs) = unit_square();
        positions.push(Point3::new(5.0, 5.0, 5.0));
        uvs.push(Point2::new(5.0, 5.0));
        let attrs = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap();
        assert_eq!(attrs.normals[4], Vector3::zeros());
        assert_eq!(attrs.tangents[4], Vector3::zeros());
    }

    #[test]
    fn uv_count_mismatch_rejected() {
        let (positions, indices, mut uvs) = unit_square();
        uvs.pop();
        let err = SynthesizeAttributes::new(&positions, &indices, &uvs)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            SpiralMeshError::Attribute(AttributeError::UvCountMismatch { uvs: 3, vertices: 4 })
        ));
    }

    #[test]
    fn out_of_bounds_index_rejected() {
        let (positions, _, uvs) = unit_square();
        let err = SynthesizeAttributes::new(&positions, &[[0, 1, 4]], &uvs)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            SpiralMeshError::Attribute(AttributeError::IndexOutOfBounds { index: 4, vertices: 4 })
        ));
    }

    #[test]
    fn empty_mesh_yields_empty_attributes() {
        let attrs = SynthesizeAttributes::new(&[], &[], &[]).execute().unwrap();
        assert_eq!(attrs, VertexAttributes::default());
    }
}
