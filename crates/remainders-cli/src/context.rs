//! Startup wiring: configuration, store, clipboard and session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use remainders_application::ProfileSession;
use remainders_core::config::AppConfig;
use remainders_core::profile::ProfileStore;
use remainders_core::wallpaper::UrlBuilder;
use remainders_infrastructure::paths::RemaindersPaths;
use remainders_infrastructure::{
    ConfigService, JsonFileProfileStore, MemoryProfileStore, SystemClipboard,
};

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the saved profile
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Origin the wallpaper URL is rooted at (e.g. https://example.com)
    #[arg(long, global = true, value_name = "URL")]
    pub origin: Option<String>,

    /// Keep the profile in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

pub struct AppContext {
    pub config: AppConfig,
    pub session: ProfileSession,
}

impl AppContext {
    /// Loads configuration and starts a hydrated session.
    pub async fn open(options: &GlobalOptions) -> Result<Self> {
        let config = load_config(options)?;

        let store = open_store(&config, options.ephemeral)?;
        let url_builder = UrlBuilder::from_config(&config.theme_color, config.base_origin.as_deref())
            .context("Invalid base origin")?;

        let session = ProfileSession::start(
            store,
            url_builder,
            Arc::new(SystemClipboard::new()),
            config.copy_feedback_delay(),
        )
        .await;

        Ok(Self { config, session })
    }
}

/// Reads the config file, then applies command-line overrides.
fn load_config(options: &GlobalOptions) -> Result<AppConfig> {
    let service = match &options.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(&RemaindersPaths::default())?,
    };

    let mut config = service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;

    if let Some(data_dir) = &options.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    if let Some(origin) = &options.origin {
        config.base_origin = Some(origin.clone());
    }

    Ok(config)
}

fn open_store(config: &AppConfig, ephemeral: bool) -> Result<Arc<dyn ProfileStore>> {
    if ephemeral {
        tracing::debug!("[AppContext] using in-memory profile store");
        return Ok(Arc::new(MemoryProfileStore::new()));
    }

    let data_dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => RemaindersPaths::default().data_dir()?,
    };
    tracing::debug!("[AppContext] profile data directory: {:?}", data_dir);

    let store = JsonFileProfileStore::new(data_dir, &config.storage_key, &config.theme_color)
        .context("Failed to open profile store")?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "theme_color = \"000000\"\nbase_origin = \"https://from-file.example\"\n",
        )
        .unwrap();

        let options = GlobalOptions {
            config: Some(config_path),
            data_dir: Some(temp_dir.path().join("data")),
            origin: Some("https://from-flag.example".to_string()),
            ..GlobalOptions::default()
        };

        let config = load_config(&options).unwrap();

        assert_eq!(config.theme_color, "000000");
        assert_eq!(
            config.base_origin.as_deref(),
            Some("https://from-flag.example")
        );
        assert_eq!(config.data_dir, Some(temp_dir.path().join("data")));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let options = GlobalOptions {
            config: Some(temp_dir.path().join("absent.toml")),
            ..GlobalOptions::default()
        };

        let config = load_config(&options).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_open_persists_into_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let options = GlobalOptions {
            config: Some(temp_dir.path().join("config.toml")),
            data_dir: Some(temp_dir.path().to_path_buf()),
            ..GlobalOptions::default()
        };

        let ctx = AppContext::open(&options).await.unwrap();
        ctx.session
            .set_view_mode(remainders_core::profile::ViewMode::Year)
            .await;
        ctx.session
            .select_device(Some(
                remainders_core::device::DeviceProfile::new("Apple", "iPhone 15", 1179, 2556)
                    .unwrap(),
            ))
            .await;

        assert!(temp_dir
            .path()
            .join("remainders-user-profile.json")
            .exists());
    }
}
