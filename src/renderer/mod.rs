//! Renderer for parsed templates
//!
//! This module walks a parsed tree against a [`Value`](crate::Value) and
//! streams the output into any `std::io::Write` sink.

pub mod config;
pub mod context;
mod escape;
mod render;

pub use config::{RenderConfig, MAX_RENDER_DEPTH};
pub use context::{Context, Scope};
pub use escape::escape_html;
pub use render::Renderer;
