//! Spiral surface demo — generates a mesh and prints a summary.
//!
//! Usage:
//! ```text
//! cargo run --example surface                       # default parameters
//! cargo run --example surface -- preset.json        # parameters from a JSON file
//! RUST_LOG=spiral_mesh=trace cargo run --example surface
//! ```
//!
//! The JSON document has the shape of `SurfaceConfig`:
//! ```text
//! { "shape": { "a": 3, "b": 1, "n": 2 },
//!   "grid": { "u_steps": 128, "v_steps": 16, "v_min": -1, "v_max": 1 } }
//! ```

use std::process::ExitCode;

use spiral_mesh::upload::{CpuMeshBuffers, SurfaceModel, VertexAttribute};
use spiral_mesh::SurfaceConfig;

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for the generator.
    // Override with RUST_LOG env var (e.g. RUST_LOG=spiral_mesh=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("surface=info".parse().unwrap_or_default())
        .add_directive("spiral_mesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SurfaceConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SurfaceConfig::default(),
    };
    tracing::info!("config:\n{}", config.to_json()?);

    let mut model = SurfaceModel::new(CpuMeshBuffers::new());
    model.rebuild(&config)?;

    let buffers = model.sink();
    for attribute in VertexAttribute::ALL {
        tracing::info!(
            ?attribute,
            components = attribute.components(),
            bytes = buffers.attribute_bytes(attribute).len(),
            "vertex buffer"
        );
    }
    tracing::info!(
        count = buffers.count(),
        bytes = buffers.index_bytes().len(),
        "index buffer"
    );

    let uvs = buffers.attribute(VertexAttribute::Uv);
    let (max_u, max_v) = uvs
        .chunks_exact(2)
        .fold((0.0f32, 0.0f32), |(mu, mv), uv| (mu.max(uv[0]), mv.max(uv[1])));
    tracing::info!(max_u, max_v, "texture coordinate extent");

    Ok(())
}
