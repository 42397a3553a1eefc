use crate::diagnostic::Diagnostic;
use crate::property_pane::config::PropertyPaneConfig;
use crate::property_pane::id::PropertyConfigId;
use crate::property_pane::validation::{ValidationConfig, ValidatorFunction};

/// Assigns a fresh identifier to every node, depth first, pre-order.
///
/// Nested panel children are normalized with the same procedure. Identifiers
/// are generated anew on every call.
pub fn assign_property_config_ids(configs: Vec<PropertyPaneConfig>) -> Vec<PropertyPaneConfig> {
    configs.into_iter().map(assign_ids).collect()
}

fn assign_ids(mut config: PropertyPaneConfig) -> PropertyPaneConfig {
    config.set_id(PropertyConfigId::generate());
    match &mut config {
        PropertyPaneConfig::Section(section) => {
            section.children = assign_property_config_ids(std::mem::take(&mut section.children));
        }
        PropertyPaneConfig::Control(control) => {
            if let Some(panel_config) = &mut control.panel_config {
                if !panel_config.children.is_empty() {
                    panel_config.children =
                        assign_property_config_ids(std::mem::take(&mut panel_config.children));
                }
            }
        }
    }
    config
}

/// Replaces live custom validators with their source text.
///
/// Function validators without `expected` metadata are reported, but left in place.
pub fn rewrite_validation_structure(
    mut configs: Vec<PropertyPaneConfig>,
) -> (Vec<PropertyPaneConfig>, Vec<Diagnostic>) {
    let mut diagnostics = vec![];
    for config in &mut configs {
        rewrite_node(config, &mut diagnostics);
    }
    (configs, diagnostics)
}

fn rewrite_node(config: &mut PropertyPaneConfig, diagnostics: &mut Vec<Diagnostic>) {
    match config {
        PropertyPaneConfig::Section(section) => {
            for child in &mut section.children {
                rewrite_node(child, diagnostics);
            }
        }
        PropertyPaneConfig::Control(control) => {
            if let Some(validation) = &mut control.validation {
                if let Some(diagnostic) = rewrite_validation(&control.property_name, validation) {
                    diagnostic.log();
                    diagnostics.push(diagnostic);
                }
            }
            if let Some(panel_config) = &mut control.panel_config {
                for child in &mut panel_config.children {
                    rewrite_node(child, diagnostics);
                }
            }
        }
    }
}

fn rewrite_validation(
    property_name: &str,
    validation: &mut ValidationConfig,
) -> Option<Diagnostic> {
    if !validation.is_function() {
        return None;
    }
    let Some(ValidatorFunction::Callable(validator)) = &validation.params.function else {
        return None;
    };
    let source = validator.source().to_string();
    validation.params.function = Some(ValidatorFunction::Source(source));
    if validation.params.expected.is_some() {
        return None;
    }
    Some(Diagnostic::MalformedValidationConfig {
        property_name: property_name.to_string(),
        message: "For a FUNCTION type validation, expected type and example are mandatory"
            .to_string(),
        config: serde_yml::to_string(&*validation)
            .map(|yaml| yaml.trim_end().replace('\n', "; "))
            .unwrap_or_else(|_| format!("{:?}", validation)),
    })
}

/// Full registration pipeline: validation rewrite, then identifier assignment.
pub fn normalize_property_pane_config(
    configs: Vec<PropertyPaneConfig>,
) -> (Vec<PropertyPaneConfig>, Vec<Diagnostic>) {
    let (configs, diagnostics) = rewrite_validation_structure(configs);
    (assign_property_config_ids(configs), diagnostics)
}
