use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::jupiter::DEFAULT_BASE_URL;

pub const JUPITER_URL_ENV: &str = "DEFI_CANVAS_JUPITER_URL";

/// Where saved workflows live.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Sqlite(PathBuf),
    Memory,
}

/// Runtime configuration for the `serve` command.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub storage: Storage,
    pub jupiter_url: String,
}

/// CLI-facing options (before env var and default resolution).
pub struct ServeOptions<'a> {
    pub host: &'a str,
    pub port: u16,
    pub data_dir: Option<&'a Path>,
    pub in_memory: bool,
}

impl ServeConfig {
    pub fn from_cli(opts: &ServeOptions<'_>) -> Result<Self> {
        if opts.host.trim().is_empty() {
            bail!("Host must not be empty.");
        }

        let storage = if opts.in_memory {
            Storage::Memory
        } else {
            let dir = match opts.data_dir {
                Some(dir) => expand_home(dir),
                None => default_data_dir(),
            };
            Storage::Sqlite(dir.join("defi-canvas.db"))
        };

        let jupiter_url = std::env::var(JUPITER_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ServeConfig {
            host: opts.host.to_string(),
            port: opts.port,
            storage,
            jupiter_url,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `<platform data dir>/defi-canvas`, or `./.defi-canvas` if the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("defi-canvas"))
        .unwrap_or_else(|| PathBuf::from(".defi-canvas"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_ignores_data_dir() {
        let cfg = ServeConfig::from_cli(&ServeOptions {
            host: "127.0.0.1",
            port: 8080,
            data_dir: Some(Path::new("/tmp/x")),
            in_memory: true,
        })
        .unwrap();
        assert_eq!(cfg.storage, Storage::Memory);
        assert_eq!(cfg.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn explicit_dir_holds_database() {
        let cfg = ServeConfig::from_cli(&ServeOptions {
            host: "0.0.0.0",
            port: 1,
            data_dir: Some(Path::new("/srv/canvas")),
            in_memory: false,
        })
        .unwrap();
        assert_eq!(cfg.storage, Storage::Sqlite(PathBuf::from("/srv/canvas/defi-canvas.db")));
    }

    #[test]
    fn tilde_expands() {
        let p = expand_home(Path::new("~/data"));
        assert!(!p.starts_with("~"));
        assert!(p.ends_with("data"));
    }
}
