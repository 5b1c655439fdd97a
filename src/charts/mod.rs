//! Charts module - bar chart layout and static rendering

mod layout;
mod renderer;

pub use layout::{Bar, ChartData, Series, EXPORT_COLOR, IMPORT_COLOR};
pub use renderer::{blit_rotated_45, ChartImage, ChartRenderer, RenderError};
