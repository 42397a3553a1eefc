use crate::property_pane::config::parse_property_pane_config;
use crate::property_pane::validation::ValidationResponse;
use crate::property_pane::{ExpectedValue, PropertyPaneConfig, ValidationConfig};
use crate::result::WidgetryResult;
use crate::types::{DefaultPropertiesMap, DerivedPropertiesMap, RenderMode};
use crate::value::{PropertyMap, PropertyValue};
use crate::widget::{Widget, WidgetConfig, WidgetProps};
use crate::{property_map, validator_fn};
use serde::{Deserialize, Serialize};

const PROPERTY_PANE: &str = r#"
- sectionName: General
  children:
    - propertyName: inputType
      label: Data Type
      controlType: DROP_DOWN
      validation:
        type: TEXT
        params:
          allowedValues: [TEXT, NUMBER, EMAIL, PASSWORD]
    - propertyName: defaultText
      label: Default Text
      controlType: INPUT_TEXT
      placeholderText: John Doe
      isBindProperty: true
    - propertyName: placeholderText
      label: Placeholder
      controlType: INPUT_TEXT
      isBindProperty: true
      validation:
        type: TEXT
    - propertyName: regex
      label: Regex
      helpText: Adds a validation to the input which displays an error on failure
      controlType: INPUT_TEXT
      isBindProperty: true
      validation:
        type: REGEX
    - propertyName: isDisabled
      label: Disabled
      controlType: SWITCH
      isJSConvertible: true
      isBindProperty: true
      validation:
        type: BOOLEAN
- sectionName: Actions
  children:
    - propertyName: onTextChanged
      label: onTextChanged
      controlType: ACTION_SELECTOR
      isJSConvertible: true
      isTriggerProperty: true
"#;

const WIDGET_CONFIG: &str = r#"
type: TEXT_INPUT_WIDGET
widgetName: Input
rows: 4
columns: 20
version: 1
inputType: TEXT
label: ""
isDisabled: false
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    Password,
}

/// What the canvas needs to draw a text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInputView {
    pub widget_id: String,
    pub label: String,
    pub text: String,
    pub placeholder: Option<String>,
    pub input_type: InputType,
    pub is_disabled: bool,
    pub is_visible: bool,
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub editable: bool,
}

pub struct TextInputWidget {}

impl TextInputWidget {
    fn text_of(props: &WidgetProps) -> String {
        match props.get("text").or_else(|| props.get("defaultText")) {
            Some(PropertyValue::String(text)) => text.clone(),
            Some(PropertyValue::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

impl Widget for TextInputWidget {
    const TYPE: &'static str = "TEXT_INPUT_WIDGET";
    type Output = TextInputView;

    fn build(props: WidgetProps) -> Self::Output {
        let is_valid = props.get_bool("isValid").unwrap_or(true);
        let input_type = props
            .get_str("inputType")
            .and_then(|input_type| serde_yml::from_str::<InputType>(input_type).ok())
            .unwrap_or_default();
        TextInputView {
            widget_id: props.widget_id.clone(),
            label: props.get_str("label").unwrap_or_default().to_string(),
            text: Self::text_of(&props),
            placeholder: props.get_str("placeholderText").map(str::to_string),
            input_type,
            is_disabled: props.get_bool("isDisabled").unwrap_or(false),
            is_visible: props.is_visible(),
            is_valid,
            error_message: if is_valid {
                None
            } else {
                Some(
                    props
                        .get_str("errorMessage")
                        .unwrap_or("Invalid input")
                        .to_string(),
                )
            },
            editable: props.render_mode == RenderMode::Page,
        }
    }

    fn derived_properties() -> DerivedPropertiesMap {
        DerivedPropertiesMap::from([
            (
                "isValid".to_string(),
                "{{ this.isRequired ? !!this.text && this.text.length > 0 : true }}".to_string(),
            ),
            ("value".to_string(), "{{ this.text }}".to_string()),
        ])
    }

    fn default_properties() -> DefaultPropertiesMap {
        DefaultPropertiesMap::from([("text".to_string(), "defaultText".to_string())])
    }

    fn meta_properties() -> PropertyMap {
        property_map! {
            "text" => PropertyValue::Null,
            "isFocused" => false,
            "isDirty" => false,
        }
    }

    fn property_pane_config() -> WidgetryResult<Option<Vec<PropertyPaneConfig>>> {
        let mut configs = parse_property_pane_config(PROPERTY_PANE)?;
        for config in &mut configs {
            if let PropertyPaneConfig::Section(section) = config {
                for child in &mut section.children {
                    if let PropertyPaneConfig::Control(control) = child {
                        if control.property_name == "defaultText" {
                            control.validation = Some(default_text_validation());
                        }
                    }
                }
            }
        }
        Ok(Some(configs))
    }

    fn widget_config() -> WidgetryResult<Option<WidgetConfig>> {
        Ok(Some(WidgetConfig::from_yaml_str(WIDGET_CONFIG)?))
    }
}

fn default_text_validation() -> ValidationConfig {
    ValidationConfig::function(
        validator_fn!(|value: &PropertyValue, _props: &PropertyMap| match value {
            PropertyValue::String(_) => ValidationResponse::valid(value.clone()),
            PropertyValue::Number(number) => {
                ValidationResponse::valid(PropertyValue::String(number.to_string()))
            }
            PropertyValue::Null => ValidationResponse::valid(PropertyValue::from("")),
            _ => ValidationResponse::invalid(
                PropertyValue::from(""),
                "This value must be string or number",
            ),
        }),
        Some(ExpectedValue::new("string or number", "John Doe | 123")),
    )
}
