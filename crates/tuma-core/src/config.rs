use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function, decoupled from the actual environment so it can be tested with
/// a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("TUMA_ENV", "development"))?;
    let log_level = or_default("TUMA_LOG_LEVEL", "info");
    let pricing_path = PathBuf::from(or_default("TUMA_PRICING_PATH", "./config/pricing.yaml"));

    Ok(AppConfig {
        env,
        log_level,
        pricing_path,
    })
}

/// Parse a string into an [`Environment`] variant.
///
/// Unrecognized values are rejected rather than silently defaulted, so a
/// typo in deployment config surfaces at startup.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TUMA_ENV".to_string(),
            reason: format!("unrecognized environment '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::path::Path;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn defaults_apply_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.pricing_path, Path::new("./config/pricing.yaml"));
    }

    #[test]
    fn overrides_are_honored() {
        let mut map = HashMap::new();
        map.insert("TUMA_ENV", "production");
        map.insert("TUMA_LOG_LEVEL", "debug");
        map.insert("TUMA_PRICING_PATH", "/etc/tuma/pricing.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.pricing_path, Path::new("/etc/tuma/pricing.yaml"));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let mut map = HashMap::new();
        map.insert("TUMA_ENV", "staging");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TUMA_ENV"),
            "expected InvalidEnvVar(TUMA_ENV), got: {result:?}"
        );
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Test.to_string(), "test");
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
