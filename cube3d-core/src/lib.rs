/// Cube3D Core Library - transform pipeline for a spinning cube
///
/// This library holds everything between the model and the screen: the cube
/// mesh, rotation and projection matrices, viewport mapping and the frame
/// driver. Drawing is delegated to a host through [`RenderSurface`].

pub mod config;
pub mod engine;
pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineState};
pub use geometry::{Mesh, Triangle};
pub use nalgebra::Vector3;
pub use pipeline::Pipeline;
pub use projection::{Projection, Viewport};
pub use surface::{Color, PixelStyle, RenderMode, RenderSurface};
pub use transform::{transform, FrameRotation, Mat4x4, Spin};
