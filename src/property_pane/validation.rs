use crate::value::{PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationType {
    Text,
    Regex,
    Number,
    Boolean,
    Object,
    Array,
    ObjectArray,
    NestedObjectArray,
    DateIsoString,
    ImageUrl,
    SafeUrl,
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationConfig {
    #[serde(rename = "type")]
    pub validation_type: ValidationType,
    #[serde(default)]
    pub params: ValidationParams,
}

impl ValidationConfig {
    pub fn new(validation_type: ValidationType) -> Self {
        Self {
            validation_type,
            params: ValidationParams::default(),
        }
    }

    pub fn function(validator: ValidatorFn, expected: Option<ExpectedValue>) -> Self {
        Self {
            validation_type: ValidationType::Function,
            params: ValidationParams {
                function: Some(ValidatorFunction::Callable(validator)),
                expected,
                ..ValidationParams::default()
            },
        }
    }

    pub fn is_function(&self) -> bool {
        self.validation_type == ValidationType::Function
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<PropertyValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ExpectedValue>,
    /// Custom validator; only its source text is ever serialized.
    #[serde(
        rename = "fnString",
        default,
        skip_serializing_if = "Option::is_none",
        with = "fn_string"
    )]
    pub function: Option<ValidatorFunction>,
}

impl ValidationParams {
    pub fn fn_string(&self) -> Option<&str> {
        match &self.function {
            Some(ValidatorFunction::Source(source)) => Some(source),
            _ => None,
        }
    }

    pub fn callable(&self) -> Option<&ValidatorFn> {
        match &self.function {
            Some(ValidatorFunction::Callable(validator)) => Some(validator),
            _ => None,
        }
    }
}

/// Shape and example of the value a custom validator accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete_data_type: Option<String>,
}

impl ExpectedValue {
    pub fn new(value_type: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            value_type: value_type.into(),
            example: example.into(),
            autocomplete_data_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorFunction {
    /// A live validator, only present before registration.
    Callable(ValidatorFn),
    /// Data-only form of a custom validator.
    Source(String),
}

impl ValidatorFunction {
    pub fn source_text(&self) -> &str {
        match self {
            ValidatorFunction::Callable(validator) => validator.source(),
            ValidatorFunction::Source(source) => source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub parsed: PropertyValue,
    pub messages: Vec<String>,
}

impl ValidationResponse {
    pub fn valid(parsed: PropertyValue) -> Self {
        Self {
            is_valid: true,
            parsed,
            messages: vec![],
        }
    }

    pub fn invalid(parsed: PropertyValue, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            parsed,
            messages: vec![message.into()],
        }
    }
}

type ValidatorCallable = dyn Fn(&PropertyValue, &PropertyMap) -> ValidationResponse + Send + Sync;

/// A custom validator together with its source text.
///
/// Use [`validator_fn!`](crate::validator_fn) to build one, which records the
/// closure source automatically.
#[derive(Clone)]
pub struct ValidatorFn {
    source: String,
    function: Arc<ValidatorCallable>,
}

impl ValidatorFn {
    pub fn new(
        source: impl Into<String>,
        function: impl Fn(&PropertyValue, &PropertyMap) -> ValidationResponse
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            source: source.into(),
            function: Arc::new(function),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn validate(&self, value: &PropertyValue, props: &PropertyMap) -> ValidationResponse {
        (self.function)(value, props)
    }
}

impl Debug for ValidatorFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ValidatorFn({})", self.source)
    }
}

impl PartialEq for ValidatorFn {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

#[macro_export]
macro_rules! validator_fn {
    ($function:expr) => {
        $crate::property_pane::validation::ValidatorFn::new(stringify!($function), $function)
    };
}

mod fn_string {
    use super::ValidatorFunction;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        function: &Option<ValidatorFunction>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match function {
            Some(function) => serializer.serialize_some(function.source_text()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ValidatorFunction>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map(ValidatorFunction::Source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property_map;

    #[test]
    fn validator_fn_records_source() {
        let validator = validator_fn!(|value: &PropertyValue, _props: &PropertyMap| {
            ValidationResponse::valid(value.clone())
        });
        assert!(validator.source().contains("ValidationResponse"));
        assert!(validator.source().starts_with('|'));
        let response = validator.validate(&PropertyValue::from("x"), &property_map!());
        assert!(response.is_valid);
    }

    #[test]
    fn serialize_callable_as_source() {
        let config = ValidationConfig::function(
            ValidatorFn::new("|v, _| check(v)", |value, _| {
                ValidationResponse::valid(value.clone())
            }),
            Some(ExpectedValue::new("string", "abc")),
        );
        let yaml = serde_yml::to_string(&config).unwrap();
        assert!(yaml.contains("fnString:"), "{}", yaml);
        let parsed: ValidationConfig = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(Some("|v, _| check(v)"), parsed.params.fn_string());
        assert!(parsed.params.callable().is_none());
    }

    #[test]
    fn deserialize_builtin_validation() {
        let config: ValidationConfig =
            serde_yml::from_str("type: REGEX\nparams:\n  regex: ^\\d+$\n  required: true\n")
                .unwrap();
        assert_eq!(ValidationType::Regex, config.validation_type);
        assert_eq!(Some(true), config.params.required);
        assert!(!config.is_function());
    }
}
