use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_upload_bytes() -> usize {
    32 * 1024 * 1024
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UploadConfig {
    /// Directory for temporary copies of uploads. Defaults to the OS temp dir.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl UploadConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address: {}:{}", self.host, self.port))
    }
}

/// Loads the config file, falling back to defaults when it does not exist,
/// then applies the `PORT` environment override.
pub fn load_config(path: &Path) -> Result<Config> {
    let port = std::env::var("PORT").ok();
    load_config_with_port(path, port.as_deref())
}

fn load_config_with_port(path: &Path, port_override: Option<&str>) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    if let Some(port) = port_override {
        config.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?;
    }

    if config.server.max_upload_bytes == 0 {
        anyhow::bail!("server.max_upload_bytes must be > 0");
    }

    if let Some(dir) = &config.upload.temp_dir {
        if !dir.is_dir() {
            anyhow::bail!("upload.temp_dir does not exist: {}", dir.display());
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = load_config_with_port(Path::new("/nonexistent/locator.toml"), None).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.upload.temp_dir.is_none());
    }

    #[test]
    fn test_port_override() {
        let cfg = load_config_with_port(Path::new("/nonexistent/locator.toml"), Some("9090")).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.bind_addr().unwrap().port(), 9090);
    }

    #[test]
    fn test_invalid_port_override() {
        let err = load_config_with_port(Path::new("/nonexistent/locator.toml"), Some("eighty"))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("locator.toml");
        fs::write(
            &path,
            format!(
                "[server]\nhost = \"127.0.0.1\"\nport = 7000\n\n[upload]\ntemp_dir = \"{}\"\n",
                tmp.path().display()
            ),
        )
        .unwrap();

        let cfg = load_config_with_port(&path, None).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 7000);
        assert_eq!(cfg.server.max_upload_bytes, 32 * 1024 * 1024);
        assert_eq!(cfg.upload.temp_dir(), tmp.path());
    }

    #[test]
    fn test_rejects_zero_upload_limit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("locator.toml");
        fs::write(&path, "[server]\nmax_upload_bytes = 0\n").unwrap();
        assert!(load_config_with_port(&path, None).is_err());
    }

    #[test]
    fn test_rejects_missing_temp_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("locator.toml");
        fs::write(&path, "[upload]\ntemp_dir = \"/nonexistent/uploads\"\n").unwrap();
        assert!(load_config_with_port(&path, None).is_err());
    }
}
