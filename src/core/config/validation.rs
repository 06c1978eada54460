use super::types::AppConfig;
use crate::core::errors::ConfigError;

pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_f64_range("llm.temperature", config.llm.temperature, 0.0, 2.0)?;
    validate_positive("llm.max_tokens", config.llm.max_tokens as u64)?;
    validate_positive("llm.timeout_secs", config.llm.timeout_secs)?;
    validate_url("llm.base_url", &config.llm.base_url)?;

    validate_positive("embedding.batch_size", config.embedding.batch_size as u64)?;
    validate_positive("embedding.timeout_secs", config.embedding.timeout_secs)?;
    validate_url("embedding.endpoint", &config.embedding.endpoint)?;
    if config.embedding.model.trim().is_empty() {
        return Err(ConfigError::invalid("embedding.model", "must not be empty"));
    }

    validate_positive("rag.chunk_size", config.rag.chunk_size as u64)?;
    validate_positive("rag.top_k", config.rag.top_k as u64)?;
    if config.rag.chunk_overlap >= config.rag.chunk_size {
        return Err(ConfigError::invalid(
            "rag.chunk_overlap",
            format!(
                "must be smaller than rag.chunk_size ({} >= {})",
                config.rag.chunk_overlap, config.rag.chunk_size
            ),
        ));
    }

    Ok(())
}

fn validate_positive(field: &str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::invalid(field, "must be greater than 0"));
    }
    Ok(())
}

fn validate_f64_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigError::invalid(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::invalid(field, "must be an http(s) URL"));
    }
    Ok(())
}
