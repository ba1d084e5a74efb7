pub mod surface;

pub use surface::{evaluate, ShapeParameters, Surface};
