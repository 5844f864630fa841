use serde::Deserialize;
use std::fs;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Json,
    Html,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub format: InputFormat,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub inputs: Vec<InputConfig>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_defaults_to_json() {
        let config: AppConfig = serde_json::from_str(
            r#"{"inputs":[{"name":"a","path":"a.json"},{"name":"b","path":"b.html","format":"html"}]}"#,
        )
        .unwrap();
        assert!(config.pretty);
        assert_eq!(config.inputs[0].format, InputFormat::Json);
        assert_eq!(config.inputs[1].format, InputFormat::Html);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(load_config("/nonexistent/config.json"), Err(ConfigError::Io(_))));
    }
}
