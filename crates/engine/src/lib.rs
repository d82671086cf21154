//! Infowidget Engine - Widget rendering and generation.

mod generator;
pub mod renderer;
mod resources;

pub use generator::{GenerationReport, WidgetGenerator, is_file_stem};
pub use renderer::{Placeholder, render};
pub use resources::{
    DirectoryResources, EmbeddedResources, ResourceProvider, STYLESHEET_NAME, TEMPLATE_NAME,
};
