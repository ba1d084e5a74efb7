mod cpu_buffers;

pub use cpu_buffers::{CpuMeshBuffers, VertexAttribute};

use tracing::info;

use crate::config::SurfaceConfig;
use crate::error::Result;
use crate::tessellation::{generate_mesh, MeshData};

/// Receiver of generated mesh arrays.
///
/// The generator never touches graphics resources; a sink owns whatever
/// buffers it fills from each freshly generated [`MeshData`].
///
/// Every upload replaces all previously uploaded arrays; there are no partial
/// updates.
pub trait MeshSink {
    /// Replaces the sink's contents with `mesh`.
    fn upload(&mut self, mesh: &MeshData);
}

/// A spiral surface bound to the sink that displays it.
#[derive(Debug, Default)]
pub struct SurfaceModel<S: MeshSink> {
    sink: S,
    config: Option<SurfaceConfig>,
}

impl<S: MeshSink> SurfaceModel<S> {
    /// Creates a model that uploads into `sink`.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self { sink, config: None }
    }

    /// Regenerates the mesh for `config` and uploads it.
    ///
    /// On error the sink and the stored config are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid in `config` is invalid.
    pub fn rebuild(&mut self, config: &SurfaceConfig) -> Result<()> {
        let mesh = generate_mesh(&config.shape, &config.grid)?;
        self.sink.upload(&mesh);
        self.config = Some(*config);
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "rebuilt surface"
        );
        Ok(())
    }

    /// Returns the config of the last successful rebuild.
    #[must_use]
    pub fn config(&self) -> Option<&SurfaceConfig> {
        self.config.as_ref()
    }

    /// Returns the sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the model, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::ShapeParameters;
    use crate::tessellation::GridSpec;

    /// Records what it was given.
    #[derive(Debug, Default)]
    struct RecordingSink {
        uploads: Vec<MeshData>,
    }

    impl MeshSink for RecordingSink {
        fn upload(&mut self, mesh: &MeshData) {
            self.uploads.push(mesh.clone());
        }
    }

    fn config(u_steps: usize, v_steps: usize) -> SurfaceConfig {
        SurfaceConfig::new(
            ShapeParameters::new(3.0, 1.0, 2.0),
            GridSpec::new(u_steps, v_steps, -1.0, 1.0),
        )
    }

    #[test]
    fn rebuild_uploads_generated_mesh() {
        let mut model = SurfaceModel::new(RecordingSink::default());
        let cfg = config(4, 2);
        model.rebuild(&cfg).unwrap();

        let expected = generate_mesh(&cfg.shape, &cfg.grid).unwrap();
        assert_eq!(model.sink().uploads, vec![expected]);
        assert_eq!(model.config(), Some(&cfg));
    }

    #[test]
    fn failed_rebuild_leaves_state_untouched() {
        let mut model = SurfaceModel::new(RecordingSink::default());
        let good = config(4, 2);
        model.rebuild(&good).unwrap();
        assert!(model.rebuild(&config(0, 2)).is_err());

        assert_eq!(model.sink().uploads.len(), 1);
        assert_eq!(model.config(), Some(&good));
    }

    #[test]
    fn rebuild_with_cpu_buffers_replaces_contents() {
        let mut model = SurfaceModel::new(CpuMeshBuffers::default());
        model.rebuild(&config(8, 4)).unwrap();
        model.rebuild(&config(2, 1)).unwrap();

        let sink = model.into_sink();
        assert_eq!(sink.count(), 12);
        assert_eq!(sink.vertex_count(), 6);
        assert_eq!(sink.generation(), 2);
    }
}
