use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `URLC__SERPER__COUNTRY=us`.
pub const ENV_PREFIX: &str = "URLC";
/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "url-collector";

#[urlc_derive::urlc_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration tree from an optional file plus environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path` when given (must exist; format follows the extension), otherwise
///    an optional `url-collector.{toml,json,yaml}` in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `URLC__`. Nested keys use double
///    underscores (`URLC__FILTER__MAX_PER_DOMAIN=20` maps to `filter.max_per_domain`).
///
/// Fields missing from every layer keep the `#[serde(default)]` values of `T`.
///
/// # Errors
/// * An explicit `path` that does not exist or cannot be parsed.
/// * Values that do not match the structure of `T`.
///
/// # Example
/// ```rust,no_run
/// use urlc_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     concurrency: usize,
/// }
///
/// let cfg: Settings = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path.as_ref().map(AsRef::as_ref), None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the process environment.
pub(crate) fn load_layered<T>(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            File::from(path).required(true)
        },
        None => {
            debug!("No config path given, probing ./{DEFAULT_CONFIG_NAME}");
            File::with_name(DEFAULT_CONFIG_NAME).required(false)
        },
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
