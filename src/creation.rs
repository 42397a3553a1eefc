use crate::registry::WidgetRegistry;
use crate::result::{WidgetryError, WidgetryResult};
use crate::types::RenderMode;
use crate::widget::{WidgetDataProps, WidgetProps};
use tracing::error;

/// Produces renderable widgets from plain widget descriptors.
pub struct WidgetCreator<'r, W> {
    registry: &'r WidgetRegistry<W>,
}

impl<'r, W> WidgetCreator<'r, W> {
    pub fn new(registry: &'r WidgetRegistry<W>) -> Self {
        Self { registry }
    }

    /// Builds one widget, or `None` if its type has no builder.
    ///
    /// The merged props are handed to the builder as they are; they are not
    /// checked against the widget's validation config.
    pub fn create_widget(
        &self,
        widget_data: &WidgetDataProps,
        render_mode: RenderMode,
    ) -> WidgetryResult<Option<W>> {
        let widget_props = WidgetProps::from_data(widget_data, render_mode);
        match self.registry.lookup_builder(&widget_data.widget_type) {
            Ok(builder) => Ok(Some(builder.build_widget(widget_props))),
            Err(diagnostic) => {
                error!(
                    "Widget Builder not registered for widget type {}",
                    widget_data.widget_type
                );
                if self.registry.config().is_strict() {
                    return Err(WidgetryError::from(diagnostic));
                }
                Ok(None)
            }
        }
    }

    /// Builds every widget that can be built, skipping unregistered types.
    pub fn create_widgets<'a>(
        &self,
        widgets: impl IntoIterator<Item = &'a WidgetDataProps>,
        render_mode: RenderMode,
    ) -> WidgetryResult<Vec<W>> {
        let mut created = vec![];
        for widget_data in widgets {
            if let Some(widget) = self.create_widget(widget_data, render_mode)? {
                created.push(widget);
            }
        }
        Ok(created)
    }
}
