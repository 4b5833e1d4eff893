use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, HOME_CONFIG_DIR};
use crate::enums::provider::Provider;
use crate::errors::{ReverseEngineerError, ReverseEngineerResult};
use crate::structs::config::config::Config;
use crate::structs::validation_result::ValidationResult;

const SAMPLE_CONFIG: &str = r#"# reverse-engineer configuration

# Model used when --model is not given
default_model: gpt-4o

# Model definitions: name -> provider settings.
# API keys are read from <PROVIDER>_API_KEY (e.g. OPENAI_API_KEY) unless
# api_key_env names another variable.
models:
  gpt-4o:
    provider: openai
    max_tokens: 4096
    temperature: 0.2
  gpt-4o-mini:
    provider: openai
    max_tokens: 4096
    temperature: 0.2
  claude-sonnet:
    name: claude-3-5-sonnet-20241022
    provider: anthropic
    max_tokens: 8192
    temperature: 0.0
  gemini-pro:
    name: gemini-1.5-pro
    provider: gemini
    max_tokens: 8192
    temperature: 0.3
  local-llama:
    name: llama3
    provider: other
    api_base: http://localhost:11434/v1
    api_key_env: LOCAL_LLM_API_KEY
    max_tokens: 2048
    temperature: 0.5

# At most `limit` model requests per `time_frame` seconds
rate_limit:
  limit: 10
  time_frame: 60

# Timeout for model calls and URL sources, in seconds
request_timeout_secs: 60
"#;

pub struct ConfigManager;

impl ConfigManager {
    /// Picks the configuration file: explicit path, then the
    /// `REVERSE_ENGINEER_CONFIG_PATH` variable, then `./config.yaml`,
    /// then `~/.reverse-engineer/config.yaml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }

        dirs::home_dir()
            .map(|home| home.join(HOME_CONFIG_DIR).join(DEFAULT_CONFIG_FILE))
            .filter(|path| path.exists())
            .unwrap_or(local)
    }

    pub fn load(path: &Path) -> ReverseEngineerResult<Config> {
        let config = Self::read(path)?;
        if let Err(errors) = Self::validate_config(&config) {
            return Err(Self::invalid_config(path, &errors));
        }
        Ok(config)
    }

    /// Reads and parses the file without validating it.
    pub fn read(path: &Path) -> ReverseEngineerResult<Config> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ReverseEngineerError::config_file_error(&display, "file not found"));
        }

        log::info!("📋 Loading config from: {display}");
        let content = fs::read_to_string(path)
            .map_err(|e| ReverseEngineerError::config_file_error(&display, &e.to_string()))?;
        Ok(Self::parse(&content, path)?.normalize())
    }

    pub fn invalid_config(path: &Path, errors: &[String]) -> ReverseEngineerError {
        ReverseEngineerError::config_error(
            &format!("{} problem(s) in {}: {}", errors.len(), path.display(), errors.join("; ")),
            None,
            Some("Fix the listed fields and run 'reverse-engineer init' again"),
        )
    }

    /// YAML by default; `.toml` files are read as TOML.
    pub fn parse(content: &str, path: &Path) -> ReverseEngineerResult<Config> {
        let display = path.display().to_string();
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(content).map_err(|e| ReverseEngineerError::config_file_error(&display, e.message()))
        } else {
            serde_yaml::from_str(content).map_err(|e| ReverseEngineerError::config_file_error(&display, &e.to_string()))
        }
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.models.is_empty() {
            errors.push("No models configured".to_string());
        }

        if !config.models.contains_key(&config.default_model) {
            errors.push(format!("Default model '{}' is not defined under models", config.default_model));
        }

        for (key, model) in &config.models {
            if model.max_tokens == 0 {
                errors.push(format!("Model '{key}': max_tokens must be positive"));
            }
            if !(0.0..=1.0).contains(&model.temperature) {
                errors.push(format!("Model '{key}': temperature {} is outside [0, 1]", model.temperature));
            }
            if model.provider == Provider::Other && model.api_base.is_none() {
                errors.push(format!("Model '{key}': provider 'other' requires api_base"));
            }
            if let Some(base) = &model.api_base {
                if reqwest::Url::parse(base).is_err() {
                    errors.push(format!("Model '{key}': api_base '{base}' is not a valid URL"));
                }
            }
        }

        if config.rate_limit.limit == 0 {
            errors.push("rate_limit.limit must be positive".to_string());
        }
        if config.rate_limit.time_frame == 0 {
            errors.push("rate_limit.time_frame must be positive".to_string());
        }
        if config.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Field problems as errors plus API key warnings, for `init`.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = Self::check_api_keys(config);
        if let Err(errors) = Self::validate_config(config) {
            result.is_valid = false;
            result.errors = errors;
        }
        result
    }

    /// API key presence per provider in use; missing keys are warnings.
    pub fn check_api_keys(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let key_envs: BTreeSet<String> = config.models.values().map(|model| model.api_key_env()).collect();

        for env in key_envs {
            match std::env::var(&env) {
                Ok(value) if !value.trim().is_empty() => {}
                _ => result.warnings.push(format!("{env} is not set")),
            }
        }

        result
    }

    /// Writes the sample configuration unless a file already exists.
    pub fn create_sample_config(path: &Path) -> ReverseEngineerResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        let display = path.display().to_string();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ReverseEngineerError::config_file_error(&display, &e.to_string()))?;
        }
        fs::write(path, SAMPLE_CONFIG).map_err(|e| ReverseEngineerError::config_file_error(&display, &e.to_string()))?;
        log::info!("✅ Created sample config at: {display}");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::config::model_config::ModelConfig;
    use crate::structs::config::rate_limit_policy::RateLimitPolicy;

    #[test]
    fn sample_config_parses_and_validates() {
        let config = ConfigManager::parse(SAMPLE_CONFIG, Path::new("config.yaml")).unwrap().normalize();
        assert!(ConfigManager::validate_config(&config).is_ok());
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.models["gpt-4o"].name, "gpt-4o");
        assert_eq!(config.models["claude-sonnet"].name, "claude-3-5-sonnet-20241022");
        assert_eq!(config.rate_limit, RateLimitPolicy::new(10, 60));
    }

    #[test]
    fn defaults_apply_when_sections_are_omitted() {
        let yaml = "default_model: m\nmodels:\n  m:\n    provider: anthropic\n";
        let config = ConfigManager::parse(yaml, Path::new("c.yml")).unwrap().normalize();
        assert_eq!(config.rate_limit, RateLimitPolicy::default());
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.models["m"].max_tokens, 4096);
        assert!((config.models["m"].temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn toml_files_are_accepted() {
        let toml = r#"
default_model = "m"
request_timeout_secs = 30

[models.m]
provider = "openai"
temperature = 0.1

[rate_limit]
limit = 2
time_frame = 5
"#;
        let config = ConfigManager::parse(toml, Path::new("config.toml")).unwrap().normalize();
        assert_eq!(config.rate_limit.limit, 2);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut model = ModelConfig::new("m", Provider::Other);
        model.temperature = 1.5;
        model.max_tokens = 0;
        let config = Config::new("missing", vec![model]).with_rate_limit(RateLimitPolicy::new(0, 0));

        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("Default model 'missing'")));
        assert!(errors.iter().any(|e| e.contains("requires api_base")));
    }

    #[test]
    fn unknown_provider_is_a_file_error() {
        let yaml = "default_model: m\nmodels:\n  m:\n    provider: cohere\n";
        let error = ConfigManager::parse(yaml, Path::new("c.yaml")).unwrap_err();
        assert!(matches!(error, ReverseEngineerError::ConfigurationFileError { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigManager::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(error, ReverseEngineerError::ConfigurationFileError { .. }));
    }

    #[test]
    fn sample_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        assert!(ConfigManager::create_sample_config(&path).unwrap());
        assert!(!ConfigManager::create_sample_config(&path).unwrap());
        assert!(ConfigManager::load(&path).is_ok());
    }

    #[test]
    fn explicit_path_wins() {
        let path = ConfigManager::resolve_path(Some(Path::new("/etc/re.yaml")));
        assert_eq!(path, PathBuf::from("/etc/re.yaml"));
    }

    #[test]
    fn missing_keys_are_warnings() {
        let config = Config::new(
            "m",
            vec![ModelConfig::new("m", Provider::OpenAI).with_api_key_env("RE_TEST_SURELY_UNSET_KEY")],
        );
        let result = ConfigManager::check_api_keys(&config);
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec!["RE_TEST_SURELY_UNSET_KEY is not set".to_string()]);
    }

    #[test]
    fn validate_reports_field_problems_as_errors() {
        let config = Config::new(
            "missing",
            vec![ModelConfig::new("m", Provider::OpenAI).with_api_key_env("RE_TEST_SURELY_UNSET_KEY")],
        );
        let result = ConfigManager::validate(&config);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Default model 'missing' is not defined under models".to_string()]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn read_skips_validation_that_load_enforces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_model: missing\nmodels:\n  m:\n    provider: openai\n").unwrap();

        assert_eq!(ConfigManager::read(&path).unwrap().default_model, "missing");
        let error = ConfigManager::load(&path).unwrap_err();
        assert!(matches!(error, ReverseEngineerError::ConfigurationError { .. }), "{error:?}");
    }
}
