use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A dynamically typed widget property value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<PropertyValue>),
    Object(PropertyMap),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Object(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Bool(value) => write!(f, "{}", value),
            PropertyValue::Number(value) => write!(f, "{}", value),
            PropertyValue::String(value) => write!(f, "{:?}", value),
            PropertyValue::Array(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            PropertyValue::Object(map) => {
                f.write_str("{")?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(value.into())
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(value: PropertyMap) -> Self {
        PropertyValue::Object(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        PropertyValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Builds a [`PropertyMap`] from `key => value` pairs.
#[macro_export]
macro_rules! property_map {
    () => {
        $crate::value::PropertyMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::value::PropertyMap::new();
            $(map.insert($key.to_string(), $crate::value::PropertyValue::from($value));)+
            map
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested_value() {
        let value = PropertyValue::from(property_map! {
            "label" => "Name",
            "options" => vec![1, 2],
            "isRequired" => true,
        });
        assert_eq!(
            r#"{isRequired: true, label: "Name", options: [1, 2]}"#,
            value.to_string()
        );
    }

    #[test]
    fn deserialize_untagged_yaml() {
        let map: PropertyMap =
            serde_yml::from_str("text: hello\nisVisible: false\nrows: 7\nplaceholder: ~\n")
                .unwrap();
        assert_eq!(Some("hello"), map["text"].as_str());
        assert_eq!(Some(false), map["isVisible"].as_bool());
        assert_eq!(Some(7.0), map["rows"].as_f64());
        assert!(map["placeholder"].is_null());
    }
}
