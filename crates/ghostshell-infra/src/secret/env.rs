//! Environment-backed API key lookup.
//!
//! An explicit flag value wins over the `MODEL_API_KEY` environment
//! variable. Blank values on either side count as absent.

use secrecy::SecretString;

use ghostshell_types::error::ConfigError;

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "MODEL_API_KEY";

/// Resolve the API key from `flag`, then from [`API_KEY_ENV`].
///
/// # Errors
///
/// [`ConfigError::MissingApiKey`] when neither source has a non-blank value.
pub fn resolve_api_key(flag: Option<&str>) -> Result<SecretString, ConfigError> {
    // Non-Unicode values are treated as unset.
    let from_env = std::env::var(API_KEY_ENV).ok();
    pick_api_key(flag, from_env)
}

fn pick_api_key(flag: Option<&str>, from_env: Option<String>) -> Result<SecretString, ConfigError> {
    flag.map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| from_env.filter(|key| !key.trim().is_empty()))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        })
}
