use crate::config::FactoryConfig;
use crate::diagnostic::Diagnostic;
use crate::property_pane::{normalize_property_pane_config, PropertyPaneConfig};
use crate::result::{context, WidgetryError, WidgetryResult};
use crate::type_config::{get_widget_type_config_map, WidgetTypeConfigMap};
use crate::types::{DefaultPropertiesMap, DerivedPropertiesMap, WidgetType};
use crate::value::PropertyMap;
use crate::widget::{Widget, WidgetBuilder, WidgetConfig, WidgetProps};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub type PropertyPaneConfigs = Arc<[PropertyPaneConfig]>;

pub struct WidgetRegistration<W> {
    pub widget_type: WidgetType,
    pub builder: Arc<dyn WidgetBuilder<W>>,
    pub derived_properties: Arc<DerivedPropertiesMap>,
    pub default_properties: Arc<DefaultPropertiesMap>,
    pub meta_properties: Arc<PropertyMap>,
    pub property_pane_config: Option<PropertyPaneConfigs>,
}

/// Binds widget types to their builders, property tables and pane schemas.
///
/// Entries are written once per type during initialization and never replaced.
pub struct WidgetRegistry<W> {
    config: FactoryConfig,
    registrations: Vec<WidgetRegistration<W>>,
    type_map: HashMap<WidgetType, usize>,
    widget_configs: HashMap<WidgetType, Arc<WidgetConfig>>,
}

impl<W> Default for WidgetRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> WidgetRegistry<W> {
    pub fn new() -> Self {
        Self::with_config(FactoryConfig::default())
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self {
            config,
            registrations: Vec::new(),
            type_map: HashMap::new(),
            widget_configs: HashMap::new(),
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Registers a widget type. Repeated registrations of a type are ignored.
    ///
    /// Returns the diagnostics found along the way. In strict mode any
    /// diagnostic is an error and nothing is recorded.
    pub fn register_widget_builder(
        &mut self,
        widget_type: impl Into<WidgetType>,
        builder: Arc<dyn WidgetBuilder<W>>,
        derived_properties: DerivedPropertiesMap,
        default_properties: DefaultPropertiesMap,
        meta_properties: PropertyMap,
        property_pane_config: Option<Vec<PropertyPaneConfig>>,
    ) -> WidgetryResult<Vec<Diagnostic>> {
        let widget_type = widget_type.into();
        if self.type_map.contains_key(&widget_type) {
            let diagnostic = Diagnostic::DuplicateRegistration { widget_type };
            diagnostic.log();
            return self.check_diagnostics(vec![diagnostic]);
        }
        let (property_pane_config, diagnostics) = match property_pane_config {
            Some(configs) => {
                let (configs, diagnostics) = normalize_property_pane_config(configs);
                (Some(PropertyPaneConfigs::from(configs)), diagnostics)
            }
            None => (None, vec![]),
        };
        let diagnostics = self.check_diagnostics(diagnostics)?;
        debug!("Registered widget type {}", widget_type);
        self.type_map.insert(widget_type.clone(), self.registrations.len());
        self.registrations.push(WidgetRegistration {
            widget_type,
            builder,
            derived_properties: Arc::new(derived_properties),
            default_properties: Arc::new(default_properties),
            meta_properties: Arc::new(meta_properties),
            property_pane_config,
        });
        Ok(diagnostics)
    }

    /// Registers a widget module together with its stored config, if it has one.
    pub fn register_widget<T>(&mut self) -> WidgetryResult<Vec<Diagnostic>>
    where
        T: Widget + 'static,
        T::Output: Into<W>,
        W: 'static,
    {
        let property_pane_config = context!("register widget {}", T::TYPE => {
            T::property_pane_config()
        })?;
        let diagnostics = self.register_widget_builder(
            T::TYPE,
            Arc::new(|props: WidgetProps| T::build(props).into()),
            T::derived_properties(),
            T::default_properties(),
            T::meta_properties(),
            property_pane_config,
        )?;
        let widget_config = context!("load widget config of {}", T::TYPE => {
            T::widget_config()
        })?;
        if let Some(widget_config) = widget_config {
            self.store_widget_config(T::TYPE, widget_config);
        }
        Ok(diagnostics)
    }

    fn check_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> WidgetryResult<Vec<Diagnostic>> {
        if !self.config.is_strict() {
            return Ok(diagnostics);
        }
        match diagnostics.into_iter().next() {
            Some(diagnostic) => Err(WidgetryError::from(diagnostic)),
            None => Ok(vec![]),
        }
    }

    /// Replaces the stored config of a widget type. Last write wins.
    pub fn store_widget_config(
        &mut self,
        widget_type: impl Into<WidgetType>,
        config: WidgetConfig,
    ) {
        self.widget_configs.insert(widget_type.into(), Arc::new(config));
    }

    pub fn get_widget_config(&self, widget_type: &WidgetType) -> Option<Arc<WidgetConfig>> {
        self.widget_configs.get(widget_type).cloned()
    }

    /// Registered types, in registration order.
    pub fn get_widget_types(&self) -> Vec<WidgetType> {
        self.registrations
            .iter()
            .map(|registration| registration.widget_type.clone())
            .collect()
    }

    pub fn is_registered(&self, widget_type: &WidgetType) -> bool {
        self.type_map.contains_key(widget_type)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn lookup(
        &self,
        widget_type: &WidgetType,
        table: &'static str,
    ) -> Result<&WidgetRegistration<W>, Diagnostic> {
        self.type_map
            .get(widget_type)
            .map(|index| &self.registrations[*index])
            .ok_or_else(|| Diagnostic::UnregisteredType {
                widget_type: widget_type.clone(),
                table,
            })
    }

    pub fn lookup_builder(
        &self,
        widget_type: &WidgetType,
    ) -> Result<Arc<dyn WidgetBuilder<W>>, Diagnostic> {
        Ok(self.lookup(widget_type, "builder")?.builder.clone())
    }

    pub fn lookup_derived_properties_map(
        &self,
        widget_type: &WidgetType,
    ) -> Result<Arc<DerivedPropertiesMap>, Diagnostic> {
        Ok(self
            .lookup(widget_type, "derived properties")?
            .derived_properties
            .clone())
    }

    pub fn lookup_default_properties_map(
        &self,
        widget_type: &WidgetType,
    ) -> Result<Arc<DefaultPropertiesMap>, Diagnostic> {
        Ok(self
            .lookup(widget_type, "default properties")?
            .default_properties
            .clone())
    }

    pub fn lookup_meta_properties_map(
        &self,
        widget_type: &WidgetType,
    ) -> Result<Arc<PropertyMap>, Diagnostic> {
        Ok(self
            .lookup(widget_type, "meta properties")?
            .meta_properties
            .clone())
    }

    /// A type registered without a pane schema counts as unregistered here.
    pub fn lookup_property_pane_config(
        &self,
        widget_type: &WidgetType,
    ) -> Result<PropertyPaneConfigs, Diagnostic> {
        self.lookup(widget_type, "property pane configs")?
            .property_pane_config
            .clone()
            .ok_or_else(|| Diagnostic::UnregisteredType {
                widget_type: widget_type.clone(),
                table: "property pane configs",
            })
    }

    pub fn get_widget_derived_properties_map(
        &self,
        widget_type: &WidgetType,
    ) -> Arc<DerivedPropertiesMap> {
        self.lookup_derived_properties_map(widget_type)
            .unwrap_or_else(log_and_default)
    }

    pub fn get_widget_default_properties_map(
        &self,
        widget_type: &WidgetType,
    ) -> Arc<DefaultPropertiesMap> {
        self.lookup_default_properties_map(widget_type)
            .unwrap_or_else(log_and_default)
    }

    pub fn get_widget_meta_properties_map(&self, widget_type: &WidgetType) -> Arc<PropertyMap> {
        self.lookup_meta_properties_map(widget_type)
            .unwrap_or_else(log_and_default)
    }

    pub fn get_widget_property_pane_config(&self, widget_type: &WidgetType) -> PropertyPaneConfigs {
        self.lookup_property_pane_config(widget_type)
            .unwrap_or_else(|diagnostic| {
                diagnostic.log();
                PropertyPaneConfigs::from(Vec::new())
            })
    }

    pub fn get_widget_type_config_map(&self) -> WidgetTypeConfigMap {
        get_widget_type_config_map(self)
    }
}

fn log_and_default<T: Default>(diagnostic: Diagnostic) -> Arc<T> {
    diagnostic.log();
    Arc::new(T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property_map;
    use crate::property_pane::config::parse_property_pane_config;
    use crate::property_pane::{ExpectedValue, ValidationConfig};
    use crate::result::WidgetryErrorKind;
    use crate::test::{capture_logs, error_logs};
    use crate::validator_fn;
    use crate::value::PropertyValue;
    use assertables::assert_contains;
    use std::collections::HashSet;

    fn sentinel_builder(sentinel: &'static str) -> Arc<dyn WidgetBuilder<String>> {
        Arc::new(move |_props: WidgetProps| sentinel.to_string())
    }

    fn register(registry: &mut WidgetRegistry<String>, widget_type: &str, sentinel: &'static str) {
        registry
            .register_widget_builder(
                widget_type,
                sentinel_builder(sentinel),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                None,
            )
            .unwrap();
    }

    fn pane_with_function_validator(expected: Option<ExpectedValue>) -> Vec<PropertyPaneConfig> {
        vec![PropertyPaneConfig::section(
            "General",
            vec![
                PropertyPaneConfig::control("text", "Text", "INPUT_TEXT").with_validation(
                    ValidationConfig::function(
                        validator_fn!(|value: &PropertyValue, _props: &PropertyMap| {
                            crate::property_pane::validation::ValidationResponse::valid(
                                value.clone(),
                            )
                        }),
                        expected,
                    ),
                ),
                PropertyPaneConfig::control("label", "Label", "INPUT_TEXT"),
            ],
        )]
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = WidgetRegistry::new();
        register(&mut registry, "T", "first");
        let diagnostics = registry
            .register_widget_builder(
                "T",
                sentinel_builder("second"),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                None,
            )
            .unwrap();
        assert_eq!(
            vec![Diagnostic::DuplicateRegistration {
                widget_type: WidgetType::new("T")
            }],
            diagnostics
        );
        let builder = registry.lookup_builder(&WidgetType::new("T")).unwrap();
        let props = WidgetProps::from_data(
            &crate::widget::WidgetDataProps::new("w1", "T"),
            crate::types::RenderMode::EDIT,
        );
        assert_eq!("first", builder.build_widget(props));
        assert_eq!(1, registry.len());
    }

    #[test]
    fn duplicate_registration_keeps_first_maps() {
        let mut registry: WidgetRegistry<String> = WidgetRegistry::new();
        let defaults =
            DefaultPropertiesMap::from([("text".to_string(), "defaultText".to_string())]);
        registry
            .register_widget_builder(
                "T",
                sentinel_builder("first"),
                DerivedPropertiesMap::new(),
                defaults.clone(),
                PropertyMap::new(),
                None,
            )
            .unwrap();
        registry
            .register_widget_builder(
                "T",
                sentinel_builder("second"),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                Some(pane_with_function_validator(None)),
            )
            .unwrap();
        assert_eq!(defaults, *registry.get_widget_default_properties_map(&WidgetType::new("T")));
        assert!(registry
            .lookup_property_pane_config(&WidgetType::new("T"))
            .is_err());
    }

    #[test]
    fn maps_are_stored_verbatim() {
        let mut registry: WidgetRegistry<String> = WidgetRegistry::new();
        let derived = DerivedPropertiesMap::from([(
            "isValid".to_string(),
            "{{ !!this.text }}".to_string(),
        )]);
        let defaults =
            DefaultPropertiesMap::from([("text".to_string(), "defaultText".to_string())]);
        let meta = property_map! { "text" => PropertyValue::Null, "isFocused" => false };
        registry
            .register_widget_builder(
                "INPUT",
                sentinel_builder("input"),
                derived.clone(),
                defaults.clone(),
                meta.clone(),
                None,
            )
            .unwrap();
        let widget_type = WidgetType::new("INPUT");
        assert_eq!(derived, *registry.get_widget_derived_properties_map(&widget_type));
        assert_eq!(defaults, *registry.get_widget_default_properties_map(&widget_type));
        assert_eq!(meta, *registry.get_widget_meta_properties_map(&widget_type));
    }

    #[test]
    fn pane_config_is_normalized_on_registration() {
        let mut registry: WidgetRegistry<String> = WidgetRegistry::new();
        let diagnostics = registry
            .register_widget_builder(
                "INPUT",
                sentinel_builder("input"),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                Some(pane_with_function_validator(Some(ExpectedValue::new("string", "abc")))),
            )
            .unwrap();
        assert!(diagnostics.is_empty());
        let configs = registry.get_widget_property_pane_config(&WidgetType::new("INPUT"));
        let mut ids = HashSet::new();
        for config in configs.iter() {
            config.visit(&mut |node| {
                ids.insert(node.id().cloned().unwrap());
            });
        }
        assert_eq!(3, ids.len());
        let control = configs[0].children()[0].as_control().unwrap();
        let params = &control.validation.as_ref().unwrap().params;
        assert!(params.callable().is_none());
        assert_contains!(params.fn_string().unwrap(), "valid");
    }

    #[test]
    fn malformed_validation_is_reported_but_registered() {
        let mut registry: WidgetRegistry<String> = WidgetRegistry::new();
        let mut result = None;
        let logs = capture_logs(|| {
            result = Some(registry.register_widget_builder(
                "INPUT",
                sentinel_builder("input"),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                Some(pane_with_function_validator(None)),
            ));
        });
        let diagnostics = result.unwrap().unwrap();
        assert_eq!(1, diagnostics.len());
        assert_eq!(1, error_logs(&logs).len());
        assert!(registry.is_registered(&WidgetType::new("INPUT")));
    }

    #[test]
    fn read_miss_returns_empty_and_logs() {
        let registry: WidgetRegistry<String> = WidgetRegistry::new();
        let widget_type = WidgetType::new("NOT_A_TYPE");
        let logs = capture_logs(|| {
            assert!(registry.get_widget_default_properties_map(&widget_type).is_empty());
            assert!(registry.get_widget_derived_properties_map(&widget_type).is_empty());
            assert!(registry.get_widget_meta_properties_map(&widget_type).is_empty());
            assert!(registry.get_widget_property_pane_config(&widget_type).is_empty());
        });
        let errors = error_logs(&logs);
        assert_eq!(4, errors.len());
        for error in errors {
            assert_contains!(error.message, "NOT_A_TYPE");
        }
    }

    #[test]
    fn lookup_miss_is_a_diagnostic() {
        let registry: WidgetRegistry<String> = WidgetRegistry::new();
        let logs = capture_logs(|| {
            let diagnostic = registry
                .lookup_meta_properties_map(&WidgetType::new("NOT_A_TYPE"))
                .unwrap_err();
            assert_eq!(Some(&WidgetType::new("NOT_A_TYPE")), diagnostic.widget_type());
        });
        assert!(logs.is_empty());
    }

    #[test]
    fn widget_types_in_registration_order() {
        let mut registry = WidgetRegistry::new();
        register(&mut registry, "B", "b");
        register(&mut registry, "A", "a");
        register(&mut registry, "B", "b2");
        assert_eq!(
            vec![WidgetType::new("B"), WidgetType::new("A")],
            registry.get_widget_types()
        );
    }

    #[test]
    fn store_widget_config_overwrites() {
        let mut registry: WidgetRegistry<String> = WidgetRegistry::new();
        let first = WidgetConfig::from_yaml_str("type: T\nwidgetName: First\nrows: 1\n").unwrap();
        let second = WidgetConfig::from_yaml_str("type: T\nwidgetName: Second\n").unwrap();
        registry.store_widget_config("T", first);
        registry.store_widget_config("T", second.clone());
        assert_eq!(
            Some(&second),
            registry.get_widget_config(&WidgetType::new("T")).as_deref()
        );
        assert!(registry.get_widget_config(&WidgetType::new("U")).is_none());
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let mut registry: WidgetRegistry<String> =
            WidgetRegistry::with_config(FactoryConfig::strict());
        register(&mut registry, "T", "first");
        let error = registry
            .register_widget_builder(
                "T",
                sentinel_builder("second"),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                None,
            )
            .unwrap_err();
        assert!(matches!(error.kind(), WidgetryErrorKind::DuplicateRegistration(_)));
    }

    #[test]
    fn strict_mode_rejects_malformed_validation() {
        let mut registry: WidgetRegistry<String> =
            WidgetRegistry::with_config(FactoryConfig::strict());
        let error = registry
            .register_widget_builder(
                "INPUT",
                sentinel_builder("input"),
                DerivedPropertiesMap::new(),
                DefaultPropertiesMap::new(),
                PropertyMap::new(),
                Some(pane_with_function_validator(None)),
            )
            .unwrap_err();
        assert!(matches!(error.kind(), WidgetryErrorKind::MalformedValidationConfig(_)));
        assert!(registry.is_empty());
    }

    struct BrokenPaneWidget;

    impl Widget for BrokenPaneWidget {
        const TYPE: &'static str = "BROKEN_PANE_WIDGET";
        type Output = String;

        fn build(_props: WidgetProps) -> String {
            "broken".to_string()
        }

        fn property_pane_config() -> WidgetryResult<Option<Vec<PropertyPaneConfig>>> {
            parse_property_pane_config("- unknownKey: 1\n").map(Some)
        }
    }

    #[test]
    fn unparsable_pane_names_the_widget() {
        let mut registry: WidgetRegistry<String> = WidgetRegistry::new();
        let error = registry.register_widget::<BrokenPaneWidget>().unwrap_err();
        assert_eq!(
            "General Error: Failed to register widget BROKEN_PANE_WIDGET",
            error.to_string()
        );
        assert_contains!(format!("{:?}", error), "YAML Error");
        assert!(registry.is_empty());
    }
}
