//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::profile::EntityProfile;
use crate::query::SortKey;
use crate::types::EntityKind;

const DEFAULT_CATALOG_DIR: &str = "data/catalog";
const DEFAULT_LOG_FILTER: &str = "info";

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

/// The `[search]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub provider_default_sort: Option<SortKey>,
    #[serde(default)]
    pub listing_default_sort: Option<SortKey>,
}

impl SearchSettings {
    /// Built-in profile for `kind` with any configured default sort applied.
    pub fn profile_for(&self, kind: EntityKind) -> crate::error::Result<EntityProfile> {
        let profile = *EntityProfile::for_kind(kind);
        let override_key = match kind {
            EntityKind::Provider => self.provider_default_sort,
            EntityKind::Listing => self.listing_default_sort,
        };
        match override_key {
            None => Ok(profile),
            Some(key) => profile
                .with_default_sort(key)
                .ok_or_else(|| Error::InvalidConfig(format!("sort key '{}' is not available for {}", key, kind))),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Load `config.toml` and the environment overlay from `dir`.
    pub fn load_from(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: dir.to_path_buf() };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn catalog_dir(&self) -> PathBuf {
        let dir: String = self.get("data.catalog_dir").unwrap_or_else(|_| DEFAULT_CATALOG_DIR.to_string());
        resolve_with_base(&self.base_dir, dir)
    }

    pub fn search_settings(&self) -> anyhow::Result<SearchSettings> {
        if !self.figment.contains("search") {
            return Ok(SearchSettings::default());
        }
        self.get("search")
    }

    pub fn log_filter(&self) -> String {
        self.get("logging.filter").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        match env {
            "prod" | "production" => {
                if !self.figment.contains("data.catalog_dir") {
                    return Err(Error::InvalidConfig("data.catalog_dir must be set explicitly in production".to_string()).into());
                }
            }
            "dev" | "development" | "test" | "testing" => {}
            _ => {}
        }
        let settings = self.search_settings()?;
        for kind in [EntityKind::Provider, EntityKind::Listing] {
            settings.profile_for(kind)?;
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
