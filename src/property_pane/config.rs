use crate::property_pane::id::PropertyConfigId;
use crate::property_pane::validation::{ValidationConfig, ValidatorFunction};
use crate::result::WidgetryResult;
use serde::{Deserialize, Serialize};
use termtree::Tree;

/// A node of a widget's property pane schema.
///
/// Schemas are trees by construction: children are owned, so a node can never
/// contain itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyPaneConfig {
    Section(PropertyPaneSection),
    Control(PropertyPaneControl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyPaneSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PropertyConfigId>,
    pub section_name: String,
    #[serde(default)]
    pub children: Vec<PropertyPaneConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyPaneControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PropertyConfigId>,
    pub property_name: String,
    #[serde(default)]
    pub label: String,
    pub control_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_text: Option<String>,
    #[serde(rename = "isBindProperty", default)]
    pub is_bind_property: bool,
    #[serde(default)]
    pub is_trigger_property: bool,
    #[serde(rename = "isJSConvertible", default)]
    pub is_js_convertible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_config: Option<PanelConfig>,
}

/// Nested pane opened from a control, e.g. to edit one column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PanelConfig {
    #[serde(default)]
    pub editable_title: bool,
    pub title_property_name: String,
    pub panel_id_property_name: String,
    #[serde(default)]
    pub children: Vec<PropertyPaneConfig>,
}

impl PropertyPaneConfig {
    pub fn section(section_name: impl Into<String>, children: Vec<PropertyPaneConfig>) -> Self {
        PropertyPaneConfig::Section(PropertyPaneSection {
            id: None,
            section_name: section_name.into(),
            children,
            is_default_open: None,
            hidden: None,
        })
    }

    pub fn control(
        property_name: impl Into<String>,
        label: impl Into<String>,
        control_type: impl Into<String>,
    ) -> Self {
        PropertyPaneConfig::Control(PropertyPaneControl {
            id: None,
            property_name: property_name.into(),
            label: label.into(),
            control_type: control_type.into(),
            help_text: None,
            placeholder_text: None,
            is_bind_property: false,
            is_trigger_property: false,
            is_js_convertible: false,
            validation: None,
            panel_config: None,
        })
    }

    /// Sets the validation of a control; sections are returned unchanged.
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        if let PropertyPaneConfig::Control(control) = &mut self {
            control.validation = Some(validation);
        }
        self
    }

    /// Sets the nested panel of a control; sections are returned unchanged.
    pub fn with_panel_config(mut self, panel_config: PanelConfig) -> Self {
        if let PropertyPaneConfig::Control(control) = &mut self {
            control.panel_config = Some(panel_config);
        }
        self
    }

    pub fn id(&self) -> Option<&PropertyConfigId> {
        match self {
            PropertyPaneConfig::Section(section) => section.id.as_ref(),
            PropertyPaneConfig::Control(control) => control.id.as_ref(),
        }
    }

    pub fn set_id(&mut self, id: PropertyConfigId) {
        match self {
            PropertyPaneConfig::Section(section) => section.id = Some(id),
            PropertyPaneConfig::Control(control) => control.id = Some(id),
        }
    }

    pub fn as_control(&self) -> Option<&PropertyPaneControl> {
        match self {
            PropertyPaneConfig::Control(control) => Some(control),
            PropertyPaneConfig::Section(_) => None,
        }
    }

    pub fn children(&self) -> &[PropertyPaneConfig] {
        match self {
            PropertyPaneConfig::Section(section) => &section.children,
            PropertyPaneConfig::Control(_) => &[],
        }
    }

    /// Visits this node and all descendants in pre-order, panel children included.
    pub fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a PropertyPaneConfig)) {
        visitor(self);
        for child in self.children() {
            child.visit(visitor);
        }
        if let Some(panel_config) = self.as_control().and_then(|c| c.panel_config.as_ref()) {
            for child in &panel_config.children {
                child.visit(visitor);
            }
        }
    }
}

impl PanelConfig {
    pub fn new(
        title_property_name: impl Into<String>,
        panel_id_property_name: impl Into<String>,
        children: Vec<PropertyPaneConfig>,
    ) -> Self {
        Self {
            editable_title: false,
            title_property_name: title_property_name.into(),
            panel_id_property_name: panel_id_property_name.into(),
            children,
        }
    }
}

pub fn parse_property_pane_config(yaml: &str) -> WidgetryResult<Vec<PropertyPaneConfig>> {
    Ok(serde_yml::from_str(yaml)?)
}

pub fn count_nodes(configs: &[PropertyPaneConfig]) -> usize {
    let mut count = 0;
    for config in configs {
        config.visit(&mut |_| count += 1);
    }
    count
}

pub fn print_property_pane_config(configs: &[PropertyPaneConfig]) -> String {
    let mut tree = Tree::new("PropertyPane".to_string());
    for config in configs {
        tree.push(config_to_tree(config));
    }
    format!("{}", tree)
}

fn config_to_tree(config: &PropertyPaneConfig) -> Tree<String> {
    match config {
        PropertyPaneConfig::Section(section) => {
            let mut tree = Tree::new(format!("Section {}", section.section_name));
            for child in &section.children {
                tree.push(config_to_tree(child));
            }
            tree
        }
        PropertyPaneConfig::Control(control) => {
            let mut tree = Tree::new(format!(
                "Control {} ({})",
                control.property_name, control.control_type
            ));
            if let Some(validation) = &control.validation {
                let mut label = format!("Validation {:?}", validation.validation_type);
                if let Some(function) = &validation.params.function {
                    label += match function {
                        ValidatorFunction::Callable(_) => " callable",
                        ValidatorFunction::Source(_) => " fnString",
                    };
                }
                tree.push(Tree::new(label));
            }
            if let Some(panel_config) = &control.panel_config {
                let mut panel_tree =
                    Tree::new(format!("Panel {}", panel_config.title_property_name));
                for child in &panel_config.children {
                    panel_tree.push(config_to_tree(child));
                }
                tree.push(panel_tree);
            }
            tree
        }
    }
}
