//! Non-fatal findings produced by the factory.
//!
//! Every diagnostic is logged where it is produced and also handed back to the
//! caller, who may surface it, turn it into an error or ignore it.

use crate::types::WidgetType;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A second registration for an already registered type was ignored.
    #[error("Widget type {widget_type} is already registered, ignoring registration")]
    DuplicateRegistration { widget_type: WidgetType },
    /// A table lookup for a type that was never registered.
    #[error("Widget {table} not defined for widget type {widget_type}")]
    UnregisteredType {
        widget_type: WidgetType,
        table: &'static str,
    },
    #[error("Error in configuration of property '{property_name}': {message} ({config})")]
    MalformedValidationConfig {
        property_name: String,
        message: String,
        config: String,
    },
}

impl Diagnostic {
    pub fn widget_type(&self) -> Option<&WidgetType> {
        match self {
            Diagnostic::DuplicateRegistration { widget_type }
            | Diagnostic::UnregisteredType { widget_type, .. } => Some(widget_type),
            Diagnostic::MalformedValidationConfig { .. } => None,
        }
    }

    /// Emits the diagnostic to the tracing sink at its severity.
    pub fn log(&self) {
        match self {
            Diagnostic::DuplicateRegistration { .. } => debug!("{}", self),
            Diagnostic::UnregisteredType { .. } | Diagnostic::MalformedValidationConfig { .. } => {
                error!("{}", self)
            }
        }
    }
}
