use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::defaults::ENV_OVERRIDES;
use super::paths::AppPaths;
use super::types::AppConfig;
use super::validation::validate_config;
use crate::core::errors::ConfigError;

const REDACT_PLACEHOLDER: &str = "****";

const SENSITIVE_PATTERNS: [&str; 8] = [
    "api_key",
    "secret",
    "password",
    "_token",
    "token_",
    "credential",
    "access_key",
    "bearer",
];

const SENSITIVE_WHITELIST: [&str; 2] = ["max_tokens", "tokens"];

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("PORTFOLIO_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let user_config = self.paths.user_data_dir.join("config.yml");
        if user_config.exists() {
            return user_config;
        }

        self.paths.project_root.join("config.yml")
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.paths.secrets_path.clone()
    }

    /// Loads config from disk and the process environment.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        self.load_config_with(|key| env::var(key).ok())
    }

    /// Loads config using `lookup` in place of the process environment.
    pub fn load_config_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let merged = self.load_raw_with(lookup);
        let config: AppConfig =
            serde_json::from_value(merged).map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Effective config as a JSON value with secrets masked.
    pub fn redacted_config(&self) -> Value {
        redact_sensitive_values(&self.load_raw_with(|key| env::var(key).ok()))
    }

    fn load_raw_with<F>(&self, lookup: F) -> Value
    where
        F: Fn(&str) -> Option<String>,
    {
        let public_config = load_yaml_file(&self.config_path());
        let secrets_config = load_yaml_file(&self.secrets_path());
        let mut merged = deep_merge(&public_config, &secrets_config);
        apply_env_overrides(&mut merged, lookup);
        merged
    }
}

fn load_yaml_file(path: &Path) -> Value {
    if !path.exists() {
        return Value::Object(Map::new());
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<Value>(&contents) {
            Ok(value @ Value::Object(_)) => value,
            Ok(_) => Value::Object(Map::new()),
            Err(err) => {
                tracing::warn!("Ignoring unparsable config file {}: {}", path.display(), err);
                Value::Object(Map::new())
            }
        },
        Err(err) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), err);
            Value::Object(Map::new())
        }
    }
}

fn apply_env_overrides<F>(config: &mut Value, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for (variable, path) in ENV_OVERRIDES {
        let Some(raw) = lookup(variable) else {
            continue;
        };
        let value = match path.last() {
            Some(&"port") => match raw.trim().parse::<u16>() {
                Ok(port) => Value::from(port),
                Err(_) => {
                    tracing::warn!("Ignoring non-numeric {}={}", variable, raw);
                    continue;
                }
            },
            _ => Value::String(raw),
        };
        ensure_object_path(config, path, value);
    }
}

fn ensure_object_path(config: &mut Value, path: &[&str], value: Value) {
    if path.is_empty() {
        return;
    }

    let mut current = config;
    for (index, key) in path.iter().enumerate() {
        if index == path.len() - 1 {
            if let Some(map) = current.as_object_mut() {
                map.insert(key.to_string(), value);
            }
            return;
        }

        if !current.get(*key).map(|v| v.is_object()).unwrap_or(false) {
            let Some(map) = current.as_object_mut() else {
                return;
            };
            map.insert((*key).to_string(), Value::Object(Map::new()));
        }

        let Some(next) = current.get_mut(*key) else {
            return;
        };
        current = next;
    }
}

fn deep_merge(base: &Value, override_value: &Value) -> Value {
    match (base, override_value) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged: Map<String, Value> = base_map.clone();
            for (key, value) in override_map {
                let merged_value = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), merged_value);
            }
            Value::Object(merged)
        }
        _ => override_value.clone(),
    }
}

fn redact_sensitive_values(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut redacted = Map::new();
            for (key, val) in map {
                if is_sensitive_key(key) && !val.is_null() && !val.is_object() {
                    redacted.insert(key.clone(), Value::String(REDACT_PLACEHOLDER.to_string()));
                } else {
                    redacted.insert(key.clone(), redact_sensitive_values(val));
                }
            }
            Value::Object(redacted)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive_values).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    if SENSITIVE_WHITELIST.contains(&lower.as_str()) {
        return false;
    }
    SENSITIVE_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn service_in(dir: &Path) -> ConfigService {
        let paths = AppPaths::with_dirs(dir.to_path_buf(), dir.join("state"));
        ConfigService::new(Arc::new(paths))
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = service_in(dir.path()).load_config_with(no_env).unwrap();

        assert_eq!(config.llm.model, "llama3-8b-8192");
        assert_eq!(config.rag.chunk_size, 1000);
        assert_eq!(config.rag.chunk_overlap, 200);
        assert_eq!(config.rag.top_k, 3);
        assert!(config.secrets.groq_api_key().is_none());
    }

    #[test]
    fn secrets_file_overrides_public_config() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());
        fs::write(
            dir.path().join("config.yml"),
            "llm:\n  temperature: 0.2\nsecrets:\n  groq_api_key: public-placeholder\n",
        )
        .unwrap();
        fs::write(
            service.secrets_path(),
            "secrets:\n  groq_api_key: gsk-real\n",
        )
        .unwrap();

        let config = service.load_config_with(no_env).unwrap();
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.secrets.groq_api_key(), Some("gsk-real"));
    }

    #[test]
    fn environment_wins_over_files() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());
        fs::write(service.secrets_path(), "secrets:\n  groq_api_key: from-file\n").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            ("GROQ_API_KEY", "from-env"),
            ("HUGGINGFACEHUB_API_TOKEN", "hf-env"),
            ("PORT", "9100"),
        ]);
        let config = service
            .load_config_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.secrets.groq_api_key(), Some("from-env"));
        assert_eq!(config.secrets.huggingface_token(), Some("hf-env"));
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn only_prefixed_host_variable_moves_the_bind_address() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());

        let shell_host = service
            .load_config_with(|key| (key == "HOST").then(|| "devbox.local".to_string()))
            .unwrap();
        assert_eq!(shell_host.server.host, "127.0.0.1");

        let prefixed = service
            .load_config_with(|key| (key == "PORTFOLIO_HOST").then(|| "0.0.0.0".to_string()))
            .unwrap();
        assert_eq!(prefixed.server.host, "0.0.0.0");
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());
        let config = service
            .load_config_with(|key| (key == "GROQ_API_KEY").then(|| "   ".to_string()))
            .unwrap();

        assert!(config.secrets.groq_api_key().is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(dir.path());
        fs::write(dir.path().join("config.yml"), "rag:\n  top_k: 0\n").unwrap();

        assert!(service.load_config_with(no_env).is_err());
    }

    #[test]
    fn redaction_masks_secrets_but_not_token_limits() {
        let value = serde_json::json!({
            "llm": {"max_tokens": 1024},
            "secrets": {"groq_api_key": "gsk-real", "huggingfacehub_api_token": "hf"}
        });
        let redacted = redact_sensitive_values(&value);

        assert_eq!(redacted["llm"]["max_tokens"], 1024);
        assert_eq!(redacted["secrets"]["groq_api_key"], REDACT_PLACEHOLDER);
        assert_eq!(redacted["secrets"]["huggingfacehub_api_token"], REDACT_PLACEHOLDER);
    }
}
