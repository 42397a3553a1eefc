pub mod config;
pub mod creation;
pub mod diagnostic;
pub mod logging;
pub mod property_pane;
pub mod registry;
pub mod result;
pub mod type_config;
pub mod types;
pub mod value;
pub mod widget;

pub use creation::WidgetCreator;
pub use diagnostic::Diagnostic;
pub use registry::WidgetRegistry;
pub use types::{RenderMode, WidgetType};
