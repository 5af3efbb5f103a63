//! Application state management.
//!
//! Provides [`AppState<C>`], a thread-safe container holding the
//! configuration and the catalog built from it. Both live behind an `Arc`,
//! so cloning the state is cheap and handlers on any task can read it.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use guidepost_core::{ConfigProvider, Result};
//! use guidepost_registry::{AppState, Catalog};
//!
//! #[derive(Clone)]
//! struct MyConfig {
//!     base: PathBuf,
//! }
//!
//! impl ConfigProvider for MyConfig {
//!     fn project_name(&self) -> &str { "handbook" }
//!     fn base_path(&self) -> Result<PathBuf> { Ok(self.base.clone()) }
//!     fn content_path(&self, t: &str) -> Result<PathBuf> { Ok(self.base.join(t)) }
//! }
//!
//! let state = AppState::new(MyConfig { base: PathBuf::from("/data") }, Catalog::default());
//!
//! assert_eq!(state.project_name(), "handbook");
//! assert!(state.catalog().is_empty());
//! ```

use std::sync::Arc;

use guidepost_core::{ConfigProvider, Result};

use crate::Catalog;
use crate::source::DirectorySource;

/// Thread-safe shared application state.
///
/// Generic over `C: ConfigProvider` so embedders can bring their own
/// configuration type.
#[derive(Debug)]
pub struct AppState<C: ConfigProvider> {
    config: Arc<C>,
    catalog: Arc<Catalog>,
}

impl<C: ConfigProvider> AppState<C> {
    /// Wrap an already-built catalog.
    pub fn new(config: C, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }

    /// Build the catalog from the configured guides directory.
    ///
    /// # Errors
    ///
    /// Any error from reading the directory or building the registry.
    pub async fn load(config: C) -> Result<Self> {
        let source = DirectorySource::from_config(&config)?;
        log::debug!("loading guides from {}", source.root().display());
        let catalog = Catalog::load(&source).await?;
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Get a reference to the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a cloneable handle to the configuration.
    pub fn config_arc(&self) -> Arc<C> {
        Arc::clone(&self.config)
    }

    /// Get a cloneable handle to the catalog.
    pub fn catalog_arc(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Convenience for `state.config().project_name()`.
    pub fn project_name(&self) -> &str {
        self.config.project_name()
    }
}

impl<C: ConfigProvider> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Clone, Debug)]
    struct TestConfig {
        name: String,
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            &self.name
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, content_type: &str) -> Result<PathBuf> {
            Ok(self.base.join(content_type))
        }
    }

    fn test_config(base: PathBuf) -> TestConfig {
        TestConfig {
            name: "test-project".into(),
            base,
        }
    }

    #[test]
    fn test_app_state_new() {
        let state = AppState::new(test_config(PathBuf::from("/tmp/test")), Catalog::default());
        assert_eq!(state.project_name(), "test-project");
        assert_eq!(
            state.config().base_path().unwrap(),
            PathBuf::from("/tmp/test")
        );
    }

    #[test]
    fn test_app_state_clone_shares() {
        let state1 = AppState::new(test_config(PathBuf::from("/tmp/test")), Catalog::default());
        let state2 = state1.clone();

        assert!(Arc::ptr_eq(&state1.config_arc(), &state2.config_arc()));
        assert!(Arc::ptr_eq(&state1.catalog_arc(), &state2.catalog_arc()));
    }

    #[test]
    fn test_app_state_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState<TestConfig>>();
    }

    #[tokio::test]
    async fn test_app_state_load() {
        let dir = TempDir::new().unwrap();
        let guides = dir.path().join("guides");
        std::fs::create_dir_all(&guides).unwrap();
        std::fs::write(
            guides.join("git-workflow.md"),
            "---\ntitle: Git Workflow\ncategory: devops\n---\n",
        )
        .unwrap();

        let state = AppState::load(test_config(dir.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(state.catalog().len(), 1);
        assert!(state.catalog().get("git-workflow").is_some());
    }

    #[tokio::test]
    async fn test_app_state_across_tasks() {
        let state = AppState::new(test_config(PathBuf::from("/tmp/test")), Catalog::default());

        let state_clone = state.clone();
        let handle = tokio::spawn(async move { state_clone.catalog().len() });

        assert_eq!(handle.await.unwrap(), 0);
        assert_eq!(state.project_name(), "test-project");
    }
}
