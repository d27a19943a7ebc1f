use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

const DEFAULT_QUOTES: [char; 4] = ['“', '”', '‘', '’'];

/// Parse options. All fields are read-only for the duration of one parse.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Allow raw HTML blocks and inline tags.
    pub html: bool,
    /// GFM pipe tables.
    pub tables: bool,
    /// Turn bare URL-like text into links.
    pub linkify: bool,
    /// Typographic replacements and smart quotes.
    pub typographer: bool,
    /// Double open, double close, single open, single close.
    #[serde(deserialize_with = "deserialize_quotes")]
    pub quotes: [char; 4],
    /// Maximum block/inline nesting depth.
    pub max_nesting: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            html: false,
            tables: true,
            linkify: true,
            typographer: true,
            quotes: DEFAULT_QUOTES,
            max_nesting: 20,
        }
    }
}

/// Overrides the leading glyphs with the characters of `s`; extra characters
/// are ignored.
pub fn quotes_from_str(s: &str) -> [char; 4] {
    let mut quotes = DEFAULT_QUOTES;
    for (slot, c) in quotes.iter_mut().zip(s.chars()) {
        *slot = c;
    }
    quotes
}

fn deserialize_quotes<'de, D>(deserializer: D) -> Result<[char; 4], D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(quotes_from_str(&s))
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn html(mut self, enabled: bool) -> Self {
        self.config.html = enabled;
        self
    }

    pub fn tables(mut self, enabled: bool) -> Self {
        self.config.tables = enabled;
        self
    }

    pub fn linkify(mut self, enabled: bool) -> Self {
        self.config.linkify = enabled;
        self
    }

    pub fn typographer(mut self, enabled: bool) -> Self {
        self.config.typographer = enabled;
        self
    }

    pub fn quotes(mut self, quotes: &str) -> Self {
        self.config.quotes = quotes_from_str(quotes);
        self
    }

    pub fn max_nesting(mut self, depth: usize) -> Self {
        self.config.max_nesting = depth;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Searched for in the document's directory and each of its parents.
const PROJECT_FILES: [&str; 2] = [".markit.toml", "markit.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config {path}: max-nesting must be at least 1")]
    ZeroNesting { path: PathBuf },
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        let kind = match &err {
            ConfigError::Read { source, .. } => source.kind(),
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err.to_string())
    }
}

/// Which layer a configuration file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` or `MARKIT_CONFIG`.
    Explicit,
    /// `.markit.toml` / `markit.toml` above the document.
    Project,
    /// `markit/config.toml` in the user's config directory.
    User,
}

impl Config {
    /// Parse a TOML document. `path` only labels errors.
    pub fn from_toml(text: &str, path: &Path) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.max_nesting == 0 {
            return Err(ConfigError::ZeroNesting {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }
}

/// `$XDG_CONFIG_HOME`, or `~/.config` when it is unset.
fn user_config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

/// Pick the configuration file for documents under `start_dir`: the explicit
/// path, else the nearest project file, else the user file.
pub fn discover(explicit: Option<&Path>, start_dir: &Path) -> Option<(PathBuf, ConfigSource)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), ConfigSource::Explicit));
    }

    let project = start_dir
        .ancestors()
        .flat_map(|dir| PROJECT_FILES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file());
    if let Some(path) = project {
        return Some((path, ConfigSource::Project));
    }

    user_config_dir()
        .map(|dir| dir.join("markit").join("config.toml"))
        .filter(|path| path.is_file())
        .map(|path| (path, ConfigSource::User))
}

/// Resolve and read the configuration for documents under `start_dir`.
/// A file that is found but unreadable or invalid is an error at every layer.
pub fn load(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let Some((path, source)) = discover(explicit, start_dir) else {
        log::debug!("no config file above {}, using defaults", start_dir.display());
        return Ok((Config::default(), None));
    };

    log::debug!("{source:?} config: {}", path.display());
    let config = Config::from_file(&path)?;
    Ok((config, Some(path)))
}
