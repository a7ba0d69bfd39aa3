use crate::api::BookApi;
use crate::config::{Backend, BooklistConfig};
use crate::error::{BookError, Result};
use crate::store::fs::FileStore;
use crate::store::http::HttpStore;
use crate::store::BookStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory (config and local books).
pub const HOME_ENV: &str = "BOOKLIST_HOME";

pub type DynStore = Box<dyn BookStore>;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<Backend>,
    pub api_url: Option<String>,
    pub page_size: Option<usize>,
}

pub struct BooklistContext {
    pub config: BooklistConfig,
    pub data_dir: PathBuf,
}

impl BooklistContext {
    /// Opens a session against the configured store and loads the list.
    pub fn open_api(&self) -> Result<BookApi<DynStore>> {
        let store = build_store(&self.config, &self.data_dir)?;
        log::debug!("using store {}", store.describe());
        BookApi::open(store, self.config.page_size)
    }
}

pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "booklist", "booklist")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BookError::Config("Could not determine data directory".into()))
}

pub fn initialize(overrides: Overrides) -> Result<BooklistContext> {
    let data_dir = data_dir()?;
    let mut config = BooklistConfig::load(&data_dir)?;

    if let Some(backend) = overrides.backend {
        config.backend = backend;
    }
    if let Some(url) = overrides.api_url {
        config.api_url = url;
    }
    if let Some(size) = overrides.page_size {
        config.page_size = size;
    }
    config.validate()?;

    Ok(BooklistContext { config, data_dir })
}

pub fn build_store(config: &BooklistConfig, data_dir: &std::path::Path) -> Result<DynStore> {
    Ok(match config.backend {
        Backend::Http => Box::new(HttpStore::new(&config.api_url, config.timeout_secs)?),
        Backend::Local => Box::new(FileStore::new(data_dir.to_path_buf())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_backend_builds_file_store() {
        let dir = tempdir().unwrap();
        let config = BooklistConfig {
            backend: Backend::Local,
            ..Default::default()
        };
        let store = build_store(&config, dir.path()).unwrap();
        assert!(store.describe().starts_with("local:"));
        assert!(store.list_books().unwrap().is_empty());
    }

    #[test]
    fn http_backend_uses_api_url() {
        let dir = tempdir().unwrap();
        let config = BooklistConfig {
            api_url: "http://example.test/".into(),
            ..Default::default()
        };
        let store = build_store(&config, dir.path()).unwrap();
        assert_eq!(store.describe(), "http://example.test");
    }
}
