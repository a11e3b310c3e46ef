use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use jsonc_to_json::jsonc_to_json;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::ConfigError;

pub trait Config: Serialize + DeserializeOwned + Default {
    const NAME: &'static str;
    const NOTE: &'static str = "";

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(env!("CARGO_PKG_NAME"))
            .join(format!("{}.jsonc", Self::NAME)))
    }

    fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let ser = format!(
            "{}{}",
            if Self::NOTE.is_empty() {
                "".to_string()
            } else {
                format!(
                    "{}\n\n",
                    Self::NOTE
                        .lines()
                        .map(|line| format!("// {line}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                )
            },
            serde_json::to_string_pretty(self)?
        );

        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(io_err)?;

        file.write_all(ser.as_bytes()).map_err(io_err)
    }

    fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Reads the file at `path`, writing defaults if it is missing. A file
    /// that fails to parse is moved aside and replaced with defaults.
    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if path.exists() {
            let content = fs::read_to_string(path).map_err(io_err)?;
            let json = jsonc_to_json(&content);
            match serde_json::from_str(&json) {
                Ok(val) => return Ok(val),
                Err(e) => {
                    let secs = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map(|elapsed| elapsed.as_secs())
                        .unwrap_or_default();
                    let aside = path.with_file_name(format!("{}-{secs}", Self::NAME));
                    warn!(
                        "could not parse {}: {e}, moving it to {}",
                        path.display(),
                        aside.display()
                    );
                    fs::rename(path, &aside).map_err(io_err)?;
                }
            }
        }

        let out = Self::default();
        out.save_to(path)?;
        Ok(out)
    }
}
