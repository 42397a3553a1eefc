use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Identifies a widget implementation, e.g. `TEXT_INPUT_WIDGET`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetType(String);

impl WidgetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WidgetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for WidgetType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for WidgetType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderMode {
    ComponentPane,
    Canvas,
    Page,
}

impl RenderMode {
    pub const EDIT: RenderMode = RenderMode::Canvas;
    pub const VIEW: RenderMode = RenderMode::Page;
}

/// Property key to expression computing the derived value.
pub type DerivedPropertiesMap = BTreeMap<String, String>;

/// Meta property key to the property it takes its default from.
pub type DefaultPropertiesMap = BTreeMap<String, String>;
