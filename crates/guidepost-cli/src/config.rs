//! Configuration for the Guidepost CLI.
//!
//! Provides the [`GuidepostConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `GUIDEPOST_CONFIG` environment variable
//! 3. XDG default: `~/.config/guidepost/config.toml`
//! 4. Built-in defaults
//!
//! `GUIDEPOST_*` environment variables are overlaid on whichever file is
//! used, e.g. `GUIDEPOST_CONTENT_PATH=/srv/guides`.

use confyg::{Confygery, env};
use guidepost_core::traits::{ConfigProvider, DEFAULT_CONTENT_EXTENSIONS};
use guidepost_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "GUIDEPOST_CONFIG";

/// Prefix for overlay environment variables.
pub const ENV_PREFIX: &str = "GUIDEPOST";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Guidepost CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidepostConfig {
    /// Project name, shown in command output.
    pub project_name: String,

    /// Base path for the guide corpus. Defaults to the current directory.
    pub base_path: Option<String>,

    /// Content-related configuration.
    pub content: ContentConfig,
}

/// Guide content configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Guides directory. Relative paths resolve against `base_path`;
    /// unset means `<base_path>/guides`.
    pub path: Option<String>,

    /// File extensions treated as guides.
    #[serde(deserialize_with = "de_extensions")]
    pub extensions: Vec<String>,

    /// Treat dangling related-guide references as validation errors.
    #[serde(deserialize_with = "de_bool")]
    pub strict_related: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for GuidepostConfig {
    fn default() -> Self {
        Self {
            project_name: "guidepost".to_string(),
            base_path: None,
            content: ContentConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: None,
            extensions: DEFAULT_CONTENT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            strict_related: false,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl GuidepostConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped, leaving defaults and
    /// environment overrides.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("guidepost").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `GUIDEPOST_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for GuidepostConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(guidepost_core::util::paths::expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_path(&self, content_type: &str) -> Result<PathBuf> {
        match &self.content.path {
            Some(p) => Ok(self
                .base_path()?
                .join(guidepost_core::util::paths::expand_tilde(p))),
            None => Ok(self.base_path()?.join(content_type)),
        }
    }

    fn content_extensions(&self) -> Vec<String> {
        self.content.extensions.clone()
    }

    fn strict_related(&self) -> bool {
        self.content.strict_related
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Environment values arrive as strings, so accept `"true"` as well as `true`.
fn de_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got `{other}`"
            ))),
        },
    }
}

/// Accept a TOML array, or the JSON array / comma list an env var carries.
fn de_extensions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        String(String),
    }

    Ok(match ListOrString::deserialize(deserializer)? {
        ListOrString::List(list) => list,
        ListOrString::String(s) => serde_json::from_str::<Vec<String>>(&s).unwrap_or_else(|_| {
            s.split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        }),
    })
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    /// Serialises tests that touch process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// RAII guard for env var manipulation in tests.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: callers hold `env_lock()`.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: callers hold `env_lock()`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: the guard is dropped while `env_lock()` is still held.
            unsafe {
                match self.prev {
                    Some(ref val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Default tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_guidepost_config_default() {
        let config = GuidepostConfig::default();
        assert_eq!(config.project_name, "guidepost");
        assert!(config.base_path.is_none());
        assert!(config.content.path.is_none());
        assert_eq!(config.content.extensions, vec!["md", "mdx"]);
        assert!(!config.content.strict_related);
    }

    // ------------------------------------------------------------------------
    // Serialization tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_guidepost_config_from_toml() {
        let toml_str = r#"
            project_name = "handbook"
            base_path = "/data"

            [content]
            path = "content/guides"
            extensions = ["mdx"]
            strict_related = true
        "#;

        let config: GuidepostConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "handbook");
        assert_eq!(config.base_path.as_deref(), Some("/data"));
        assert_eq!(config.content.path.as_deref(), Some("content/guides"));
        assert_eq!(config.content.extensions, vec!["mdx"]);
        assert!(config.content.strict_related);
    }

    #[test]
    fn test_guidepost_config_partial_toml_keeps_defaults() {
        let config: GuidepostConfig = toml::from_str("[content]\npath = \"docs\"").unwrap();
        assert_eq!(config.project_name, "guidepost");
        assert_eq!(config.content.extensions, vec!["md", "mdx"]);
    }

    #[test]
    fn test_guidepost_config_to_toml() {
        let config = GuidepostConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"guidepost\""));
        assert!(toml_str.contains("[content]"));
        assert!(toml_str.contains("strict_related = false"));

        let parsed: GuidepostConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.project_name, config.project_name);
        assert_eq!(parsed.content.extensions, config.content.extensions);
    }

    // ------------------------------------------------------------------------
    // Loading tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_guidepost_config_load_from_file() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [content]
                path = "/srv/guides"
            "#,
        )
        .unwrap();

        let config = GuidepostConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.content.path.as_deref(), Some("/srv/guides"));
    }

    #[test]
    fn test_guidepost_config_load_defaults() {
        let _lock = env_lock();
        let config = GuidepostConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "guidepost");
        assert_eq!(config.content.extensions, vec!["md", "mdx"]);
    }

    #[test]
    fn test_guidepost_config_load_env_overlay() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "file-app"
                [content]
                path = "from-file"
            "#,
        )
        .unwrap();

        let _guard = EnvGuard::new("GUIDEPOST_CONTENT_PATH", "from-env");
        let config = GuidepostConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.content.path.as_deref(), Some("from-env"));
        assert_eq!(config.project_name, "file-app");
    }

    // ------------------------------------------------------------------------
    // resolve_config_path tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_config_path_explicit() {
        let path = GuidepostConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_env() {
        let _lock = env_lock();
        let _guard = EnvGuard::new(CONFIG_ENV_VAR, "/env/config.toml");
        let path = GuidepostConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_resolve_config_path_default() {
        let _lock = env_lock();
        let _guard = EnvGuard::remove(CONFIG_ENV_VAR);
        let path = GuidepostConfig::resolve_config_path(None);
        if let Some(p) = path {
            assert!(p.ends_with("guidepost/config.toml"));
        }
    }

    // ------------------------------------------------------------------------
    // ConfigProvider tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_provider_base_path() {
        let config = GuidepostConfig {
            base_path: Some("/my/data".into()),
            ..Default::default()
        };
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/my/data"));
    }

    #[test]
    fn test_provider_base_path_default_is_cwd() {
        let config = GuidepostConfig::default();
        assert_eq!(config.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_provider_content_path_default() {
        let config = GuidepostConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        assert_eq!(
            config.content_path("guides").unwrap(),
            PathBuf::from("/project/guides")
        );
    }

    #[test]
    fn test_provider_content_path_relative_and_absolute() {
        let mut config = GuidepostConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        config.content.path = Some("content/guides".into());
        assert_eq!(
            config.content_path("guides").unwrap(),
            PathBuf::from("/project/content/guides")
        );

        config.content.path = Some("/abs/guides".into());
        assert_eq!(
            config.content_path("guides").unwrap(),
            PathBuf::from("/abs/guides")
        );
    }

    #[test]
    fn test_provider_content_settings() {
        let mut config = GuidepostConfig::default();
        config.content.extensions = vec!["mdx".into()];
        config.content.strict_related = true;
        assert_eq!(config.content_extensions(), vec!["mdx"]);
        assert!(config.strict_related());
    }

    // ------------------------------------------------------------------------
    // Env-string decoding
    // ------------------------------------------------------------------------

    #[test]
    fn test_extensions_from_env_strings() {
        let json: ContentConfig = toml::from_str("extensions = '[\"md\"]'").unwrap();
        assert_eq!(json.extensions, vec!["md"]);

        let list: ContentConfig = toml::from_str("extensions = 'md, mdx'").unwrap();
        assert_eq!(list.extensions, vec!["md", "mdx"]);
    }

    #[test]
    fn test_bool_from_env_string() {
        let config: ContentConfig = toml::from_str("strict_related = 'yes'").unwrap();
        assert!(config.strict_related);
        assert!(toml::from_str::<ContentConfig>("strict_related = 'maybe'").is_err());
    }

    // ------------------------------------------------------------------------
    // to_env_vars tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_guidepost_config_to_env_vars() {
        let config = GuidepostConfig::default();
        let vars = config.to_env_vars().unwrap();
        let map: HashMap<_, _> = vars.into_iter().collect();
        assert_eq!(map.get("GUIDEPOST_PROJECT_NAME").unwrap(), "guidepost");
        assert_eq!(
            map.get("GUIDEPOST_CONTENT_EXTENSIONS").unwrap(),
            "[\"md\",\"mdx\"]"
        );
        assert_eq!(
            map.get("GUIDEPOST_CONTENT_STRICT_RELATED").unwrap(),
            "false"
        );
    }

    #[test]
    fn test_guidepost_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GuidepostConfig>();
    }
}
