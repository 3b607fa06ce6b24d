//! pp-render: turns a resolved preset tree plus long-format tables into
//! image files.
//!
//! Contains:
//! - request (what one rendered frame needs)
//! - color (hex palettes and named gradients)
//! - layout (grid splitting with width/height ratios)
//! - plotters_renderer (the default [`Renderer`], PNG or SVG)

pub mod color;
pub mod layout;
pub mod plotters_renderer;
pub mod request;

pub use plotters_renderer::PlottersRenderer;
pub use request::{AxisPanel, FrameRequest, SubfigurePanel};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Drawing backend error: {0}")]
    Backend(String),

    #[error("Invalid colour {token:?}")]
    InvalidColor { token: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Draws one frame of a figure and writes it to `request.output`.
pub trait Renderer {
    fn render_frame(&mut self, request: &FrameRequest<'_>) -> RenderResult<()>;
}

pub(crate) fn backend<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}
