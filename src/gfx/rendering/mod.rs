//! Pipeline management and the frame renderer.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{variant_name, PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
