//! GPU rendering subsystem.
//!
//! Renderers consume the recorded command stream and issue GPU commands via
//! wgpu. Each renderer is responsible for its own GPU resources (pipelines,
//! buffers).
//!
//! Convention:
//! - CPU geometry is in pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod scene_renderer;
pub mod shapes;
mod thread;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
pub use thread::{RenderThread, RenderThreadConfig};
