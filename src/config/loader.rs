//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::QuireConfig;
use crate::domain::errors::QuireError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

/// Prefix of override environment variables
pub const ENV_PREFIX: &str = "QUIRE";

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid regex"));

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into QuireConfig
/// 4. Applies environment variable overrides (QUIRE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use quire::config::loader::load_config;
///
/// let config = load_config("quire.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<QuireConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(QuireError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        QuireError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents, |name| std::env::var(name).ok())
}

/// Parses configuration text, resolving variables through `lookup`
///
/// # Errors
///
/// Returns [`QuireError::Configuration`] on missing variables, invalid TOML,
/// unparseable overrides or failed validation.
pub fn parse_config<F>(contents: &str, lookup: F) -> Result<QuireConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let contents = substitute_env_vars(contents, &lookup)?;

    let mut config: QuireConfig = toml::from_str(&contents)
        .map_err(|e| QuireError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config, &lookup)?;

    config.validate().map_err(|e| {
        QuireError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = ENV_PLACEHOLDER.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match lookup(var_name) {
                Some(value) => value,
                None => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(QuireError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using QUIRE_* prefix
///
/// Environment variables follow the pattern: QUIRE_<SECTION>_<KEY>
/// For example: QUIRE_EXPORT_BATCH_SIZE, QUIRE_SOURCE_PATH
fn apply_env_overrides<F>(config: &mut QuireConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(&format!("{ENV_PREFIX}_{key}"));

    // Application overrides
    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Some(val) = var("SOURCE_PATH") {
        config.source.path = val;
    }

    // Export overrides
    if let Some(val) = var("EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = var("EXPORT_BATCH_SIZE") {
        config.export.batch_size = parse_override("EXPORT_BATCH_SIZE", &val)?;
    }
    if let Some(val) = var("EXPORT_MIN_WAIT_MS") {
        config.export.min_wait_ms = parse_override("EXPORT_MIN_WAIT_MS", &val)?;
    }
    if let Some(val) = var("EXPORT_COLLECTIONS") {
        config.export.collections = crate::core::scrub::parse_list(&val);
    }
    if let Some(val) = var("EXPORT_DRY_RUN") {
        config.export.dry_run = parse_override("EXPORT_DRY_RUN", &val)?;
    }
    if let Some(val) = var("EXPORT_FORMATS_YAML") {
        config.export.formats.yaml = parse_override("EXPORT_FORMATS_YAML", &val)?;
    }
    if let Some(val) = var("EXPORT_FORMATS_JSON") {
        config.export.formats.json = parse_override("EXPORT_FORMATS_JSON", &val)?;
    }
    if let Some(val) = var("EXPORT_FORMATS_TXT") {
        config.export.formats.txt = parse_override("EXPORT_FORMATS_TXT", &val)?;
    }

    // Scrub overrides
    if let Some(val) = var("SCRUB_EXCLUDED_KEYS") {
        config.scrub.excluded_keys = val;
    }
    if let Some(val) = var("SCRUB_EXCLUDED_SUBSTRINGS") {
        config.scrub.excluded_substrings = val;
    }

    // Logging overrides
    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        QuireError::Configuration(format!(
            "Invalid value '{value}' for {ENV_PREFIX}_{key}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_substitute_env_vars() {
        let input = "path = \"${COLLECTIONS_ROOT}/packs\"";
        let result = substitute_env_vars(input, &vars(&[("COLLECTIONS_ROOT", "/data")])).unwrap();
        assert_eq!(result, "path = \"/data/packs\"");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let input = "path = \"${MISSING_VAR}\"\nout = \"${MISSING_VAR}\"";
        let err = substitute_env_vars(input, &vars(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required environment variables: MISSING_VAR"
        );
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# path = \"${NOT_SET}\"\nbatch_size = 5";
        let result = substitute_env_vars(input, &vars(&[])).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_env_overrides() {
        let config = parse_config(
            "[export]\nbatch_size = 100\n",
            vars(&[
                ("QUIRE_EXPORT_BATCH_SIZE", "25"),
                ("QUIRE_EXPORT_FORMATS_TXT", "true"),
                ("QUIRE_EXPORT_COLLECTIONS", "dnd5e.items, dnd5e.spells"),
                ("QUIRE_SCRUB_EXCLUDED_KEYS", "_id,flags"),
            ]),
        )
        .unwrap();

        assert_eq!(config.export.batch_size, 25);
        assert!(config.export.formats.txt);
        assert_eq!(config.export.collections, vec!["dnd5e.items", "dnd5e.spells"]);
        assert_eq!(config.scrub.excluded_keys, "_id,flags");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = parse_config("", vars(&[("QUIRE_EXPORT_BATCH_SIZE", "ten")])).unwrap_err();
        assert!(matches!(err, QuireError::Configuration(_)));
        assert!(err.to_string().contains("QUIRE_EXPORT_BATCH_SIZE"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = parse_config("[export]\nbatch_size = 0\n", vars(&[])).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_negative_batch_size_is_parse_error() {
        let err = parse_config("[export]\nbatch_size = -3\n", vars(&[])).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[source]
path = "./packs"

[export]
output_dir = "./out"
batch_size = 50
collections = ["dnd5e.items"]

[export.formats]
yaml = false
json = true

[logging]
local_rotation = "hourly"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.source.path, "./packs");
        assert_eq!(config.export.batch_size, 50);
        assert!(!config.export.formats.yaml);
        assert!(config.export.formats.json);
        assert_eq!(config.logging.local_rotation, "hourly");
    }
}
