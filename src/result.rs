use crate::diagnostic::Diagnostic;
use error_stack::Report;
use ron::de::SpannedError;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(thiserror::Error, Debug)]
pub enum WidgetryErrorKind {
    #[error("General Error: {0}")]
    General(String),
    #[error("Duplicate registration: {0}")]
    DuplicateRegistration(String),
    #[error("Unregistered widget type: {0}")]
    UnregisteredType(String),
    #[error("Malformed validation config: {0}")]
    MalformedValidationConfig(String),
    #[error("Config Error: {0}")]
    Config(String),
}

#[derive(Debug)]
pub struct WidgetryError(pub Report<WidgetryErrorKind>);

impl Display for WidgetryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl WidgetryError {
    #[track_caller]
    pub fn change_context<S: Into<String>>(self, message: S) -> Self {
        Self(self.0.change_context(WidgetryErrorKind::General(message.into())))
    }

    pub fn kind(&self) -> &WidgetryErrorKind {
        self.0.current_context()
    }
}

pub type WidgetryResult<T> = Result<T, WidgetryError>;

impl<T> From<T> for WidgetryError
where
    for<'a> &'a T: Into<WidgetryErrorKind>,
    T: Error + Send + Sync + 'static,
{
    #[track_caller]
    fn from(error: T) -> Self {
        let kind: WidgetryErrorKind = (&error).into();
        let report = Report::new(error);
        let report = report.change_context(kind);
        Self(report)
    }
}

impl From<&serde_yml::Error> for WidgetryErrorKind {
    #[track_caller]
    fn from(error: &serde_yml::Error) -> Self {
        Self::Config(format!("YAML Error: {}", error))
    }
}

impl From<&SpannedError> for WidgetryErrorKind {
    #[track_caller]
    fn from(error: &SpannedError) -> Self {
        Self::Config(format!("RON Error: {}", error))
    }
}

impl From<&tracing::subscriber::SetGlobalDefaultError> for WidgetryErrorKind {
    #[track_caller]
    fn from(error: &tracing::subscriber::SetGlobalDefaultError) -> Self {
        Self::General(format!("Failed to install tracing subscriber: {}", error))
    }
}

impl From<&log::SetLoggerError> for WidgetryErrorKind {
    #[track_caller]
    fn from(error: &log::SetLoggerError) -> Self {
        Self::General(format!("Failed to install log bridge: {}", error))
    }
}

impl From<&Diagnostic> for WidgetryErrorKind {
    fn from(diagnostic: &Diagnostic) -> Self {
        let message = diagnostic.to_string();
        match diagnostic {
            Diagnostic::DuplicateRegistration { .. } => Self::DuplicateRegistration(message),
            Diagnostic::UnregisteredType { .. } => Self::UnregisteredType(message),
            Diagnostic::MalformedValidationConfig { .. } => {
                Self::MalformedValidationConfig(message)
            }
        }
    }
}

#[macro_export]
macro_rules! context {
    ($fmt:expr $(, $($args:expr),+)? => $block:block) => {
        {
            $block
        }.map_err(|e: $crate::result::WidgetryError| e.change_context(format!(concat!("Failed to ",$fmt) $(, $($args)+)?)))
    };
}
pub use context;
