//! Property pane schemas: the tree of sections and controls a widget exposes in
//! the property editing panel, and the normalization applied at registration.

pub mod config;
pub mod id;
pub mod normalize;
pub mod validation;

pub use config::{PanelConfig, PropertyPaneConfig, PropertyPaneControl, PropertyPaneSection};
pub use id::PropertyConfigId;
pub use normalize::normalize_property_pane_config;
pub use validation::{ExpectedValue, ValidationConfig, ValidationType, ValidatorFn};
