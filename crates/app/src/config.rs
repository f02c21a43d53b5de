use std::path::{Path, PathBuf};

use serde::Deserialize;

use hensai_client::ApiConfig;

use crate::error::AppError;

/// Resolved runtime configuration. Precedence: command-line flag, then
/// `HENSAI_API_ENDPOINT`, then the config file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub transfer_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    endpoint: Option<String>,
    transfer_marker: Option<String>,
}

pub fn load(path: Option<&Path>, endpoint_flag: Option<String>) -> Result<AppConfig, AppError> {
    let file = match path {
        // An explicitly named file must exist and parse.
        Some(p) => read_file(p)?,
        None => match default_path().filter(|p| p.exists()) {
            Some(p) => read_file(&p)?,
            None => FileConfig::default(),
        },
    };

    let endpoint = endpoint_flag
        .or_else(|| ApiConfig::from_env().ok().map(|c| c.endpoint))
        .or(file.endpoint)
        .ok_or_else(|| {
            AppError::validation(
                "No API endpoint configured. Pass --endpoint, set HENSAI_API_ENDPOINT, \
                 or add `endpoint` to the config file.",
            )
        })?;

    Ok(AppConfig {
        endpoint,
        transfer_marker: file.transfer_marker,
    })
}

fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("jp", "hensai", "Hensai")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn read_file(path: &Path) -> Result<FileConfig, AppError> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text)
        .map_err(|e| AppError::validation(format!("Invalid config file {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn flag_wins_over_file() {
        let config = load(None, Some("https://flag.example.jp".into())).unwrap();
        assert_eq!(config.endpoint, "https://flag.example.jp");
    }

    #[test]
    fn missing_endpoint_is_a_validation_error() {
        std::env::remove_var(hensai_client::ENDPOINT_ENV);
        let err = load(None, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.user_message().contains("--endpoint"));
    }

    #[test]
    fn explicit_missing_file_is_a_file_error() {
        let err = load(
            Some(Path::new("/nonexistent/hensai.toml")),
            Some("https://x".into()),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::File);
    }
}
