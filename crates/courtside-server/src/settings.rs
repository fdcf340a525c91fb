//! Runtime server configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Deserialised from `courtside.toml` and `COURTSIDE_*` environment
/// variables. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  pub seed_dev_data: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8000,
      store_path:    PathBuf::from("courtside.sqlite3"),
      seed_dev_data: false,
    }
  }
}

impl ServerConfig {
  /// `host:port`, ready for [`tokio::net::TcpListener::bind`].
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  use ::config::{Config, File, FileFormat};

  fn parse(toml: &str) -> ServerConfig {
    Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_yields_defaults() {
    assert_eq!(parse(""), ServerConfig::default());
  }

  #[test]
  fn keys_override_defaults_individually() {
    let cfg = parse("port = 9090\nseed_dev_data = true\n");
    assert_eq!(cfg.port, 9090);
    assert!(cfg.seed_dev_data);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.address(), "127.0.0.1:9090");
  }

  #[test]
  fn tilde_is_left_alone_mid_path() {
    let p = Path::new("data/~/stats.sqlite3");
    assert_eq!(expand_tilde(p), p.to_path_buf());
  }
}
