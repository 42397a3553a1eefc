use crate::result::WidgetryResult;
use crate::types::{RenderMode, WidgetType};
use crate::value::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};

pub const IS_VISIBLE: &str = "isVisible";
pub const KEY: &str = "key";
pub const RENDER_MODE: &str = "renderMode";

/// Props carried as fields of [`WidgetProps`], never in its property bag.
const RESERVED_PROPS: [&str; 4] = ["widgetId", "type", "widgetName", "parentId"];

/// Plain data describing one placed widget, as stored in the canvas document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDataProps {
    pub widget_id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

impl WidgetDataProps {
    pub fn new(widget_id: impl Into<String>, widget_type: impl Into<WidgetType>) -> Self {
        Self {
            widget_id: widget_id.into(),
            widget_type: widget_type.into(),
            widget_name: None,
            parent_id: None,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn from_yaml_str(source: &str) -> WidgetryResult<Self> {
        Ok(serde_yml::from_str(source)?)
    }
}

/// Everything a builder receives for one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProps {
    pub key: String,
    pub widget_id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub render_mode: RenderMode,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

impl WidgetProps {
    /// Widgets are visible unless the descriptor says otherwise. A `key` in the
    /// descriptor replaces the widget id as key; the render mode always wins.
    pub fn from_data(widget_data: &WidgetDataProps, render_mode: RenderMode) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(IS_VISIBLE.to_string(), PropertyValue::Bool(true));
        properties.extend(widget_data.properties.clone());
        let key = match properties.remove(KEY) {
            Some(PropertyValue::String(key)) => key,
            Some(key) if !key.is_null() => key.to_string(),
            _ => widget_data.widget_id.clone(),
        };
        properties.remove(RENDER_MODE);
        for reserved in RESERVED_PROPS {
            properties.remove(reserved);
        }
        Self {
            key,
            widget_id: widget_data.widget_id.clone(),
            widget_type: widget_data.widget_type.clone(),
            widget_name: widget_data.widget_name.clone(),
            parent_id: widget_data.parent_id.clone(),
            render_mode,
            properties,
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropertyValue::as_bool)
    }

    pub fn is_visible(&self) -> bool {
        self.get_bool(IS_VISIBLE).unwrap_or(true)
    }
}

/// Default prop values and layout metadata of a widget type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub widget_name: String,
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub columns: u32,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(flatten)]
    pub default_props: PropertyMap,
}

fn default_version() -> u32 {
    1
}

impl WidgetConfig {
    pub fn from_yaml_str(source: &str) -> WidgetryResult<Self> {
        Ok(serde_yml::from_str(source)?)
    }
}
