use crate::result::WidgetryResult;
use serde::{Deserialize, Serialize};

/// How the factory reacts to diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailureMode {
    /// Log, fall back to an empty value and carry on.
    #[default]
    Lenient,
    /// Turn every diagnostic into an error, for tooling that wants to catch
    /// misconfigured widgets early.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    pub fn as_log_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    pub failure_mode: FailureMode,
    pub log_level: LogLevel,
}

impl FactoryConfig {
    pub fn strict() -> Self {
        Self {
            failure_mode: FailureMode::Strict,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.failure_mode == FailureMode::Strict
    }

    pub fn from_ron_str(source: &str) -> WidgetryResult<Self> {
        Ok(ron::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> WidgetryResult<Self> {
        Ok(serde_yml::from_str(source)?)
    }
}
