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
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8000, worker_threads: Some(4) }
    }
}

/// Where the book blob lives: a data directory and the key (file name)
/// of the serialized collection inside it.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_books_key")]
    pub books_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), books_key: default_books_key() }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_books_key() -> String { "books.json".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be non-zero"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 {
                self.worker_threads = Some(4);
            }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Fill blank fields from the environment before falling back to the
    /// built-in defaults.
    pub fn normalize_from_env(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = std::env::var("BOOKS_DATA_DIR").unwrap_or_else(|_| default_data_dir());
        }
        if self.books_key.trim().is_empty() {
            self.books_key = std::env::var("BOOKS_KEY").unwrap_or_else(|_| default_books_key());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.books_key.trim().is_empty() {
            return Err(anyhow!("storage.books_key must not be empty"));
        }
        if self.books_key.contains("..") {
            return Err(anyhow!("storage.books_key must not traverse outside the data directory"));
        }
        Ok(())
    }
}
