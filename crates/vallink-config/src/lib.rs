use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;
use vallink_core::{reveal_path, ProposalId, RevealTiming, Theme};

const APP_DIR: &str = "vallink";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BASE_URL: &str = "https://vallink.app";
pub const DEFAULT_TIME_UNIT_MS: u64 = 1_000;
pub const MAX_TIME_UNIT_MS: u64 = 60_000;
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub default_theme: Theme,
    pub reveal: RevealConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    pub time_unit_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    pub quota_bytes: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            default_theme: Theme::default(),
            reveal: RevealConfig {
                time_unit_ms: DEFAULT_TIME_UNIT_MS,
            },
            storage: StorageConfig {
                quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            },
        }
    }
}

impl AppConfig {
    /// Public link for a proposal, keeping any path prefix of `base_url`.
    pub fn reveal_url(&self, id: &ProposalId) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}{}", reveal_path(id)));
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

impl RevealConfig {
    pub fn timing(&self) -> RevealTiming {
        RevealTiming::new(Duration::from_millis(self.time_unit_ms)).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid base_url value: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid default_theme value: {0}")]
    InvalidTheme(String),
    #[error("invalid reveal.time_unit_ms value: {0}")]
    InvalidTimeUnit(u64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    default_theme: Option<String>,
    reveal: Option<RevealFile>,
    storage: Option<StorageFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RevealFile {
    time_unit_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageFile {
    quota_bytes: Option<usize>,
}

/// Where configuration is read from. An explicit file must exist; a missing
/// file at the default location means defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Default(PathBuf),
}

impl ConfigSource {
    pub fn locate(custom: Option<PathBuf>) -> Result<Self> {
        match custom {
            Some(path) if path.as_os_str().is_empty() => Err(ConfigError::InvalidConfigPath(path)),
            Some(path) => Ok(Self::Explicit(path)),
            None => {
                let base = dirs::config_dir().ok_or(ConfigError::MissingHomeDir)?;
                Ok(Self::Default(base.join(APP_DIR).join(CONFIG_FILENAME)))
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }
}

pub fn load(custom: Option<PathBuf>) -> Result<AppConfig> {
    match ConfigSource::locate(custom) {
        Ok(source) => load_from(&source),
        Err(ConfigError::MissingHomeDir) => Ok(AppConfig::default()),
        Err(err) => Err(err),
    }
}

pub fn load_from(source: &ConfigSource) -> Result<AppConfig> {
    let path = source.path();
    if !path.exists() {
        return match source {
            ConfigSource::Explicit(_) => Err(ConfigError::MissingConfigFile(path.to_path_buf())),
            ConfigSource::Default(_) => Ok(AppConfig::default()),
        };
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    merge_config(parsed)
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(raw) = parsed.base_url {
        config.base_url = parse_base_url(&raw)?;
    }

    if let Some(raw) = parsed.default_theme {
        config.default_theme = raw
            .parse::<Theme>()
            .map_err(|_| ConfigError::InvalidTheme(raw.clone()))?;
    }

    if let Some(reveal) = parsed.reveal {
        if let Some(unit) = reveal.time_unit_ms {
            if unit == 0 || unit > MAX_TIME_UNIT_MS {
                return Err(ConfigError::InvalidTimeUnit(unit));
            }
            config.reveal.time_unit_ms = unit;
        }
    }

    if let Some(storage) = parsed.storage {
        if let Some(quota) = storage.quota_bytes {
            config.storage.quota_bytes = if quota == 0 { None } else { Some(quota) };
        }
    }

    Ok(config)
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_from, merge_config, AppConfig, ConfigError, ConfigFile, ConfigSource, RevealFile,
        StorageFile, DEFAULT_QUOTA_BYTES,
    };
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;
    use vallink_core::{ProposalId, Theme};

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.base_url.as_str(), "https://vallink.app/");
        assert_eq!(config.default_theme, Theme::Romantic);
        assert_eq!(config.reveal.timing().unit(), Duration::from_secs(1));
        assert_eq!(config.storage.quota_bytes, Some(DEFAULT_QUOTA_BYTES));
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            base_url: Some("https://love.example.com/app/".to_string()),
            default_theme: Some("Elegant".to_string()),
            reveal: Some(RevealFile {
                time_unit_ms: Some(250),
            }),
            storage: Some(StorageFile {
                quota_bytes: Some(0),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.default_theme, Theme::Elegant);
        assert_eq!(merged.reveal.time_unit_ms, 250);
        assert_eq!(merged.storage.quota_bytes, None);

        let id = ProposalId::new("ab12cd34").unwrap();
        assert_eq!(
            merged.reveal_url(&id).as_str(),
            "https://love.example.com/app/v/ab12cd34"
        );
    }

    #[test]
    fn reveal_url_uses_default_host() {
        let id = ProposalId::new("demo").unwrap();
        assert_eq!(
            AppConfig::default().reveal_url(&id).as_str(),
            "https://vallink.app/v/demo"
        );
    }

    #[test]
    fn merge_config_rejects_bad_values() {
        let bad_url = ConfigFile {
            base_url: Some("mailto:sam@example.com".to_string()),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(bad_url),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        let bad_theme = ConfigFile {
            default_theme: Some("gothic".to_string()),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(bad_theme),
            Err(ConfigError::InvalidTheme(_))
        ));

        let bad_unit = ConfigFile {
            reveal: Some(RevealFile {
                time_unit_ms: Some(0),
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(bad_unit),
            Err(ConfigError::InvalidTimeUnit(0))
        ));
    }

    #[test]
    fn explicit_source_must_exist() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_from(&ConfigSource::Explicit(missing.clone())).unwrap_err();
        assert!(err.to_string().contains("config file not found"));

        let config = load_from(&ConfigSource::Default(missing)).expect("defaults");
        assert_eq!(config.default_theme, Theme::Romantic);
    }

    #[test]
    fn locate_rejects_empty_path() {
        assert!(matches!(
            ConfigSource::locate(Some(std::path::PathBuf::new())),
            Err(ConfigError::InvalidConfigPath(_))
        ));
    }

    #[test]
    fn load_from_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"http://localhost:5173\"\ndefault_theme = \"classic\"\n[reveal]\ntime_unit_ms = 20\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_from(&ConfigSource::Explicit(path)).expect("load");
        assert_eq!(config.base_url.as_str(), "http://localhost:5173/");
        assert_eq!(config.default_theme, Theme::Classic);
        assert_eq!(config.reveal.timing().unit(), Duration::from_millis(20));
    }

    #[test]
    fn load_from_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "colour = \"red\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_from(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_from_rejects_world_readable_files() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = load_from(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
