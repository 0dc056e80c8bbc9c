use crate::config::Config;
use crate::error::Error;
use crate::utils::i18n;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the configuration and apply its locale
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            i18n::set_locale(&config.locale);
            info!(
                "Loaded configuration (timezone {}, locale {})",
                config.timezone, config.locale
            );
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}
