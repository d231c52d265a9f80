//! Configuration loading and validation.
//!
//! Settings are merged from, lowest to highest precedence:
//!
//! 1. built-in defaults (the filename patterns),
//! 2. `bibmeta.{toml,yaml,json}` in the platform configuration directory,
//! 3. a configuration file given explicitly (e.g. `--config`),
//! 4. `BIBMETA_`-prefixed environment variables, nested with `__`
//!    (`BIBMETA_PATTERNS__ID`),
//! 5. overrides from the command line.
//!
//! ```toml
//! database = "/srv/corpus/meta.sqlite"
//! genres = "/srv/corpus/genres.csv"
//!
//! [patterns]
//! id = '[0-9]+s/([^.]+\.[^.]+).*'
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use bibmeta_resolve::{FALLBACK_YEAR_PATTERN, ID_PATTERN, Patterns};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "BIBMETA_";
const FILE_STEM: &str = "bibmeta";

/// Filename patterns, as regular-expression source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub id: String,
    pub fallback_year: String,
}
impl Default for PatternConfig {
    fn default() -> Self {
        Self { id: ID_PATTERN.to_string(), fallback_year: FALLBACK_YEAR_PATTERN.to_string() }
    }
}
impl PatternConfig {
    pub fn compile(&self) -> Result<Patterns> {
        Patterns::new(&self.id, &self.fallback_year).or_raise(|| ErrorKind::Pattern)
    }
}

/// Settings supplied on the command line; `None` leaves lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<PathBuf>,
}

#[derive(Deserialize)]
struct RawConfig {
    database: Option<PathBuf>,
    genres: Option<PathBuf>,
    #[serde(default)]
    patterns: PatternConfig,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite bibliography database.
    pub database: PathBuf,
    /// Headerless three-column genre CSV.
    pub genres: PathBuf,
    pub patterns: PatternConfig,
}
impl Config {
    /// Load the configuration from every layer.
    #[instrument(skip(overrides))]
    pub fn load(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let figment = Self::figment(&Self::default_files(), explicit, overrides)?;
        Self::from_figment(&figment)
    }

    /// Candidate configuration files in the platform configuration directory.
    pub fn default_files() -> Vec<PathBuf> {
        let Some(dirs) = ProjectDirs::from("", "", FILE_STEM) else {
            return Vec::new();
        };
        ["toml", "yaml", "json"]
            .into_iter()
            .map(|ext| dirs.config_dir().join(format!("{FILE_STEM}.{ext}")))
            .collect()
    }

    /// Assemble the layered [`Figment`].
    ///
    /// Missing `defaults` files are skipped; a missing `explicit` file is an
    /// error.
    pub fn figment(defaults: &[PathBuf], explicit: Option<&Path>, overrides: &Overrides) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(PatternDefaults::default()));
        for path in defaults.iter().filter(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "reading configuration file");
            figment = merge_file(figment, path)?;
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            figment = merge_file(figment, path)?;
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")).merge(Serialized::defaults(overrides)))
    }

    /// Extract and validate a configuration from a prepared [`Figment`].
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let raw: RawConfig = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        Ok(Self {
            database: raw.database.ok_or_raise(|| ErrorKind::Missing("database"))?,
            genres: raw.genres.ok_or_raise(|| ErrorKind::Missing("genres"))?,
            patterns: raw.patterns,
        })
    }
}

#[derive(Default, Serialize)]
struct PatternDefaults {
    patterns: PatternConfig,
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    Ok(match ext.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load(explicit: Option<&Path>, overrides: &Overrides) -> Result<Config> {
        Config::from_figment(&Config::figment(&[], explicit, overrides)?)
    }

    #[rstest]
    #[case(".toml", "database = \"/db.sqlite\"\ngenres = \"/genres.csv\"\n")]
    #[case(".yaml", "database: /db.sqlite\ngenres: /genres.csv\n")]
    #[case(".json", r#"{"database": "/db.sqlite", "genres": "/genres.csv"}"#)]
    fn test_load_file_formats(#[case] suffix: &str, #[case] contents: &str) {
        let file = file(suffix, contents);
        let config = load(Some(file.path()), &Overrides::default()).unwrap();
        assert_eq!(config.database, PathBuf::from("/db.sqlite"));
        assert_eq!(config.genres, PathBuf::from("/genres.csv"));
        assert_eq!(config.patterns, PatternConfig::default());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = file(".toml", "database = \"/db.sqlite\"\ngenres = \"/genres.csv\"\n");
        let overrides = Overrides { database: Some("/other.sqlite".into()), genres: None };
        let config = load(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.database, PathBuf::from("/other.sqlite"));
        assert_eq!(config.genres, PathBuf::from("/genres.csv"));
    }

    #[test]
    fn test_overrides_alone_are_enough() {
        let overrides = Overrides { database: Some("/db.sqlite".into()), genres: Some("/genres.csv".into()) };
        let config = load(None, &overrides).unwrap();
        assert_eq!(config.database, PathBuf::from("/db.sqlite"));
        assert!(config.patterns.compile().is_ok());
    }

    #[rstest]
    #[case(Overrides { database: None, genres: Some("/g.csv".into()) }, "database")]
    #[case(Overrides { database: Some("/db.sqlite".into()), genres: None }, "genres")]
    fn test_missing_setting(#[case] overrides: Overrides, #[case] setting: &'static str) {
        let err = load(None, &overrides).unwrap_err();
        assert_eq!(*err, ErrorKind::Missing(setting));
    }

    #[test]
    fn test_partial_pattern_override_keeps_other_default() {
        let file = file(".toml", "[patterns]\nid = '([a-z]+\\.txt)'\n");
        let overrides = Overrides { database: Some("/db.sqlite".into()), genres: Some("/g.csv".into()) };
        let config = load(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.patterns.id, "([a-z]+\\.txt)");
        assert_eq!(config.patterns.fallback_year, FALLBACK_YEAR_PATTERN);
        let patterns = config.patterns.compile().unwrap();
        assert_eq!(patterns.id("corpus/vol.txt").unwrap(), "vol.txt");
    }

    #[test]
    fn test_invalid_pattern() {
        let config = PatternConfig { id: "(".into(), ..PatternConfig::default() };
        assert_eq!(*config.compile().unwrap_err(), ErrorKind::Pattern);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let path = Path::new("/definitely/not/bibmeta.toml");
        let err = load(Some(path), &Overrides::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(path.to_path_buf()));
    }

    #[test]
    fn test_unsupported_format() {
        let file = file(".ini", "database=/db.sqlite\n");
        let err = load(Some(file.path()), &Overrides::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat(file.path().to_path_buf()));
    }
}
