use crate::property_pane::PropertyPaneConfig;
use crate::result::WidgetryResult;
use crate::types::{DefaultPropertiesMap, DerivedPropertiesMap};
use crate::value::PropertyMap;

pub mod props;
pub mod text_input;

pub use props::{WidgetConfig, WidgetDataProps, WidgetProps};

/// Turns the props of one widget instance into something the canvas can render.
pub trait WidgetBuilder<W>: Send + Sync {
    fn build_widget(&self, props: WidgetProps) -> W;
}

impl<W, F> WidgetBuilder<W> for F
where
    F: Fn(WidgetProps) -> W + Send + Sync,
{
    fn build_widget(&self, props: WidgetProps) -> W {
        self(props)
    }
}

/// A widget module, registered in one go with
/// [`WidgetRegistry::register_widget`](crate::registry::WidgetRegistry::register_widget).
pub trait Widget {
    const TYPE: &'static str;
    type Output;

    fn build(props: WidgetProps) -> Self::Output;

    fn derived_properties() -> DerivedPropertiesMap {
        DerivedPropertiesMap::new()
    }

    fn default_properties() -> DefaultPropertiesMap {
        DefaultPropertiesMap::new()
    }

    fn meta_properties() -> PropertyMap {
        PropertyMap::new()
    }

    fn property_pane_config() -> WidgetryResult<Option<Vec<PropertyPaneConfig>>> {
        Ok(None)
    }

    fn widget_config() -> WidgetryResult<Option<WidgetConfig>> {
        Ok(None)
    }
}
