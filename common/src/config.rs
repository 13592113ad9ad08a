use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Configuration for the application.
///
/// This structure is persisted to TOML and stores user preferences for
/// the app, such as the outbox directory shared files are staged into.
///
/// Storage location:
/// - Linux: $XDG_CONFIG_HOME/chute/config.toml or
///   $HOME/.config/chute/config.toml
/// - macOS: $HOME/Library/Application Support/chute/config.toml
/// - Windows: %APPDATA%\chute\config.toml
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub outbox_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Returns the configuration directory path, creating a path under
    /// the user's platform-appropriate config directory.
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = env::var("APPDATA") {
                return Ok(PathBuf::from(appdata).join("chute"));
            }
            // Fallback if APPDATA isn't set (rare)
            if let Ok(userprofile) = env::var("USERPROFILE") {
                return Ok(PathBuf::from(userprofile)
                    .join(".config")
                    .join("chute"));
            }
            return Err(anyhow!(
                "Unable to determine config directory (missing APPDATA/USERPROFILE)"
            ));
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = env::var("HOME") {
                return Ok(PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("chute"));
            }
            return Err(anyhow!(
                "Unable to determine config directory (missing HOME)"
            ));
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let config_dir = if let Ok(xdg_config_home) =
                env::var("XDG_CONFIG_HOME")
            {
                PathBuf::from(xdg_config_home)
            } else if let Ok(home) = env::var("HOME") {
                PathBuf::from(home).join(".config")
            } else {
                return Err(anyhow!(
                    "Unable to determine config directory (missing XDG_CONFIG_HOME/HOME)"
                ));
            };
            Ok(config_dir.join("chute"))
        }
    }

    /// Returns the full config file path.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads the configuration from disk. If the file does not exist,
    /// returns a default configuration.
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            return Ok(Self::default());
        }

        let config_content =
            fs::read_to_string(&config_file).with_context(|| {
                format!("Failed to read config file: {}", config_file.display())
            })?;

        let config: AppConfig = toml::from_str(&config_content)
            .with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Saves the current configuration to disk, creating the directory
    /// if needed.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        let config_file = Self::config_file()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    config_dir.display()
                )
            })?;
        }

        let config_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(&config_file, config_content).with_context(|| {
            format!("Failed to write config file: {}", config_file.display())
        })?;

        Ok(())
    }

    /// Updates and persists the outbox directory.
    pub fn set_outbox_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.outbox_dir = Some(dir);
        self.save()
    }

    /// Returns the configured outbox directory, or a sensible fallback:
    /// - Linux/macOS: $HOME/Downloads/Chute
    /// - Windows: %USERPROFILE%\Downloads\Chute
    pub fn get_outbox_dir(&self) -> PathBuf {
        match self.outbox_dir.clone() {
            Some(dir) => dir,
            None => outbox_dir_fallback(),
        }
    }
}

/// Internal: resolve a sensible fallback for the outbox directory.
fn outbox_dir_fallback() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(userprofile) = env::var("USERPROFILE") {
            return PathBuf::from(userprofile)
                .join("Downloads")
                .join("Chute");
        }
        // Last resort: current directory
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(home) = env::var("HOME") {
            return PathBuf::from(home).join("Downloads").join("Chute");
        }
        // Last resort: current directory
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}
