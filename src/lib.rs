pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod tessellation;
pub mod upload;

pub use config::SurfaceConfig;
pub use error::{Result, SpiralMeshError};
pub use geometry::ShapeParameters;
pub use tessellation::{generate_mesh, GridSpec, MeshData};
