use tracing::debug;

use crate::error::Result;
use crate::geometry::ShapeParameters;

use super::{GridSpec, MeshData, SynthesizeAttributes, TessellateSurface};

/// Generates the complete spiral tube mesh: positions, normals, tangents,
/// arc-length UVs and triangle indices.
///
/// The grid is validated before any work is done. The result depends only on
/// the inputs, so identical calls produce bit-identical arrays.
///
/// # Errors
///
/// Returns [`crate::error::TessellationError::InvalidParameter`] if the grid
/// is invalid (see [`GridSpec::validate`]).
pub fn generate_mesh(shape: &ShapeParameters, grid: &GridSpec) -> Result<MeshData> {
    grid.validate()?;

    let mut mesh = TessellateSurface::new(shape, *grid).execute()?;
    let attributes =
        SynthesizeAttributes::new(&mesh.vertices, &mesh.indices, &mesh.uvs).execute()?;
    mesh.set_attributes(attributes);

    debug!(
        a = shape.a,
        b = shape.b,
        n = shape.n,
        vertices = mesh.vertices.len(),
        triangles = mesh.indices.len(),
        "generated spiral mesh"
    );

    Ok(MeshData::from(&mesh))
}
