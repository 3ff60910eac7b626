use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "FEEDFINDER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/feedfinder.toml";
const ENV_PREFIX: &str = "FEEDFINDER";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
///
/// A path named by `FEEDFINDER_CONFIG` must exist; the default path may be absent.
pub fn load() -> Result<Config, ConfigError> {
    load_dotenv();

    match env::var(CONFIG_ENV_VAR) {
        Ok(path) => read_layers(Path::new(&path), true, environment()),
        Err(_) => read_layers(Path::new(DEFAULT_CONFIG_PATH), false, environment()),
    }
}

/// Load configuration from an explicitly chosen file plus the environment
///
/// Fails if the file does not exist.
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    load_dotenv();
    read_layers(&config_path, true, environment())
}

fn load_dotenv() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
}

/// FEEDFINDER__FETCH__REQUEST_TIMEOUT_SECS -> fetch.request_timeout_secs
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn read_layers(
    config_path: &Path,
    required: bool,
    environment: Environment,
) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path));
    } else if required {
        return Err(ConfigError::NotFound(format!(
            "configuration file {}",
            config_path.display()
        )));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    builder.add_source(environment).build()?.try_deserialize()
}
