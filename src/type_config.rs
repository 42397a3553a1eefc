use crate::registry::WidgetRegistry;
use crate::types::{DefaultPropertiesMap, DerivedPropertiesMap, WidgetType};
use crate::value::PropertyMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The property tables of one widget type, as seen by diffing and hydration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTypeConfig {
    pub default_properties: Arc<DefaultPropertiesMap>,
    pub derived_properties: Arc<DerivedPropertiesMap>,
    pub meta_properties: Arc<PropertyMap>,
}

pub type WidgetTypeConfigMap = BTreeMap<WidgetType, WidgetTypeConfig>;

/// Snapshot of every registered type's property tables, rebuilt on each call.
pub fn get_widget_type_config_map<W>(registry: &WidgetRegistry<W>) -> WidgetTypeConfigMap {
    registry
        .get_widget_types()
        .into_iter()
        .map(|widget_type| {
            let config = WidgetTypeConfig {
                default_properties: registry.get_widget_default_properties_map(&widget_type),
                derived_properties: registry.get_widget_derived_properties_map(&widget_type),
                meta_properties: registry.get_widget_meta_properties_map(&widget_type),
            };
            (widget_type, config)
        })
        .collect()
}
