use crate::config::types::{Config, ExtractConfig, FetchConfig, OutputConfig, SchedulerConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_scheduler_config(&config.scheduler)?;
    validate_output_config(&config.output)?;
    validate_extract_config(&config.extract)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 600, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent must not contain control characters, got {:?}",
            config.user_agent
        )));
    }

    if config.max_redirects > 50 {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= 50, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates scheduler configuration
fn validate_scheduler_config(config: &SchedulerConfig) -> Result<(), ConfigError> {
    if config.parallel_cap < 1 {
        return Err(ConfigError::Validation(format!(
            "parallel-cap must be >= 1, got {}",
            config.parallel_cap
        )));
    }

    if config.max_parallel > 256 {
        return Err(ConfigError::Validation(format!(
            "max-parallel must be <= 256, got {}",
            config.max_parallel
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root_dir.is_empty() {
        return Err(ConfigError::Validation(
            "root-dir cannot be empty".to_string(),
        ));
    }

    let name = config.links_file.as_str();
    if name.is_empty() || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "links-file must be a plain file name, got '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "links-file must not contain path separators, got '{}'",
            name
        )));
    }

    Ok(())
}

/// Validates the extraction rule
fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("tag", &config.tag),
        ("marker-attribute", &config.marker_attribute),
        ("source-attribute", &config.source_attribute),
    ] {
        validate_markup_name(key, value)?;
    }

    if config.marker_attribute.eq_ignore_ascii_case(&config.source_attribute) {
        return Err(ConfigError::InvalidRule(format!(
            "marker-attribute and source-attribute must differ, both are '{}'",
            config.source_attribute
        )));
    }

    if config.marker_value.is_empty() {
        return Err(ConfigError::InvalidRule(
            "marker-value cannot be empty".to_string(),
        ));
    }

    if config.marker_value.contains(['"', '\'']) {
        return Err(ConfigError::InvalidRule(format!(
            "marker-value must not contain quotes, got '{}'",
            config.marker_value
        )));
    }

    Ok(())
}

/// Validates an element or attribute name
fn validate_markup_name(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidRule(format!("{} cannot be empty", key)));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
    {
        return Err(ConfigError::InvalidRule(format!(
            "{} must contain only ASCII letters, digits, '-', '_' or ':', got '{}'",
            key, name
        )));
    }

    Ok(())
}
