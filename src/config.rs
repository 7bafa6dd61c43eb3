// Credentials loading. The API key lives in an INI file, by default
// `~/.config/bakeit.cfg`, under:
//
//     [pastery]
//     api_key = ...
//
// The key is only ever held in memory for the duration of one upload.

use crate::error::ConfigError;
use ::config::{Config, File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

const SECTION: &str = "pastery";
const KEY: &str = "api_key";

/// Secret credential sent with every upload. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for a blank key.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ApiKey(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// `<home>/.config/bakeit.cfg`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("bakeit.cfg"))
}

/// Read `pastery.api_key` from the INI file at `path`.
pub fn read_api_key(path: &Path) -> Result<ApiKey, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let unreadable = |source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let name = path.to_string_lossy();
    let settings = Config::builder()
        .add_source(File::new(&name, FileFormat::Ini))
        .build()
        .map_err(unreadable)?;

    match settings.get_string(&format!("{SECTION}.{KEY}")) {
        Ok(value) => ApiKey::new(value).ok_or_else(|| ConfigError::MissingKey {
            path: path.to_path_buf(),
        }),
        Err(::config::ConfigError::NotFound(_)) => Err(ConfigError::MissingKey {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(unreadable(e)),
    }
}
