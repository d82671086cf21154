//! Infowidget Core - Data model for update-center plugin widgets.

mod error;
mod plugin;
mod update_center;
mod version;

pub use error::{Result, Span, WidgetError};
pub use plugin::{Plugin, Release};
pub use update_center::UpdateCenter;
pub use version::Version;
