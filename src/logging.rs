use crate::config::FactoryConfig;
use crate::result::WidgetryResult;

pub fn init_logging(config: &FactoryConfig) -> WidgetryResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_max_level(config.log_level.as_tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init_with_filter(config.log_level.as_log_filter())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::init_logging;
    use crate::config::{FactoryConfig, LogLevel};

    #[test]
    fn logging_can_only_be_installed_once() {
        let config = FactoryConfig {
            log_level: LogLevel::Trace,
            ..FactoryConfig::default()
        };
        init_logging(&config).unwrap();
        let error = init_logging(&config).unwrap_err();
        assert!(error.to_string().contains("Failed to install tracing subscriber"));
    }
}
