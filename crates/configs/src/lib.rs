use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Absolute base used for links when a request carries no `Host` header.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), public_url: None }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// JSON file backing the people table; in-memory when unset.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// `Ok(None)` only when the file does not exist; unreadable or invalid files are errors.
pub fn load_if_present(path: &str) -> Result<Option<AppConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content)
            .map(Some)
            .map_err(|e| e.context(format!("invalid config file {path}"))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::Error::new(e).context(format!("cannot read config file {path}"))),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Build a config from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`,
/// `PUBLIC_URL` and `PEOPLE_DATA_FILE`, falling back to defaults.
pub fn from_env() -> AppConfig {
    let defaults = ServerConfig::default();
    let server = ServerConfig {
        host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
        port: std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port),
        worker_threads: std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(defaults.worker_threads),
        public_url: std::env::var("PUBLIC_URL").ok(),
    };
    let storage = StorageConfig {
        data_file: std::env::var("PEOPLE_DATA_FILE").ok().map(PathBuf::from),
    };
    AppConfig { server, storage }
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to the environment
    /// when no file exists, then normalize.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = load_if_present(path)?.unwrap_or_else(from_env);
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize();
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if let Some(url) = self.public_url.as_mut() {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(anyhow!("server.public_url must start with http:// or https://"));
            }
            *url = trimmed;
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.data_file.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            self.data_file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() -> Result<()> {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2
            public_url = "https://people.example.com/"

            [storage]
            data_file = "data/people.json"
            "#,
        )?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.server.public_url.as_deref(), Some("https://people.example.com"));
        assert_eq!(cfg.storage.data_file, Some(PathBuf::from("data/people.json")));
        Ok(())
    }

    #[test]
    fn missing_sections_use_defaults() -> Result<()> {
        let mut cfg = parse("")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert!(cfg.storage.data_file.is_none());
        Ok(())
    }

    #[test]
    fn zero_port_is_rejected() -> Result<()> {
        let mut cfg = parse("[server]\nhost = \"127.0.0.1\"\nport = 0\n")?;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }

    #[test]
    fn zero_workers_normalized() -> Result<()> {
        let mut cfg = parse("[server]\nhost = \"\"\nport = 1\nworker_threads = 0\n")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.host, "127.0.0.1");
        Ok(())
    }

    #[test]
    fn public_url_requires_scheme() -> Result<()> {
        let mut cfg = parse("[server]\nhost = \"h\"\nport = 1\npublic_url = \"people.local\"\n")?;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }

    fn write_tmp(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("people_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn mistyped_config_file_is_an_error() {
        let path = write_tmp("[server]\nport = \"nine-thousand\"\n");
        let res = AppConfig::load_and_validate_from(&path.to_string_lossy());
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());
    }

    #[test]
    fn unparsable_config_file_is_an_error() {
        let path = write_tmp("[server\nhost = ");
        assert!(load_if_present(&path.to_string_lossy()).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn existing_config_file_wins() -> Result<()> {
        let path = write_tmp("[server]\nhost = \"0.0.0.0\"\nport = 9100\n[storage]\ndata_file = \"people.json\"\n");
        let cfg = AppConfig::load_and_validate_from(&path.to_string_lossy());
        std::fs::remove_file(&path).ok();
        let cfg = cfg?;
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9100");
        assert_eq!(cfg.storage.data_file, Some(PathBuf::from("people.json")));
        Ok(())
    }

    #[test]
    fn missing_config_file_is_none() -> Result<()> {
        let path = std::env::temp_dir().join(format!("no_such_{}.toml", uuid::Uuid::new_v4()));
        assert!(load_if_present(&path.to_string_lossy())?.is_none());
        Ok(())
    }

    #[test]
    fn empty_data_file_means_in_memory() -> Result<()> {
        let mut cfg = parse("[storage]\ndata_file = \"\"\n")?;
        cfg.normalize_and_validate()?;
        assert!(cfg.storage.data_file.is_none());
        Ok(())
    }
}
