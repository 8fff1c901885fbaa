//! Configuration management for ID1FS
//!
//! Resolves the on-disk layout (sandbox home, metadata, login status, audit
//! log and backup locations) from built-in defaults, an optional TOML file and
//! `ID1FS__*` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "id1fs";

/// Complete ID1FS configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Id1fsConfig {
    /// Base directory holding every ID1FS area.
    /// Environment: ID1FS__ROOT
    pub root: String,

    // ═══ LAYOUT (relative to root) ═══
    /// Sandbox root where user files and directories live
    pub home_dir: String,
    pub metadata_file: String,
    pub login_status_file: String,
    pub log_file: String,
    pub backup_dir: String,

    // ═══ BEHAVIOR ═══
    /// Print file contents and subdirectory children in listings by default
    pub list_show_file_content: bool,

    /// Take an advisory lock around metadata and login-state rewrites
    pub lock_writes: bool,
}

impl Id1fsConfig {
    /// Load configuration with defaults, optional TOML file and environment overrides.
    ///
    /// `config_file` replaces the default `./id1fs.toml` lookup; `root_override`
    /// wins over every other source.
    pub fn load(config_file: Option<&Path>, root_override: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults(&default_root())?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("ID1FS")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(root) = root_override {
            builder = builder.set_override("root", root.to_string_lossy().to_string())?;
        }

        let config: Id1fsConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration rooted at `root`, ignoring files and environment
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_string_lossy().to_string(),
            home_dir: "home".into(),
            metadata_file: "metadata/metadata.json".into(),
            login_status_file: "metadata/login_status.json".into(),
            log_file: "log/execution_log.txt".into(),
            backup_dir: "backup".into(),
            list_show_file_content: false,
            lock_writes: true,
        }
    }

    fn defaults(root: &Path) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let d = Self::for_root(root);
        Config::builder()
            .set_default("root", d.root)?
            .set_default("home_dir", d.home_dir)?
            .set_default("metadata_file", d.metadata_file)?
            .set_default("login_status_file", d.login_status_file)?
            .set_default("log_file", d.log_file)?
            .set_default("backup_dir", d.backup_dir)?
            .set_default("list_show_file_content", d.list_show_file_content)?
            .set_default("lock_writes", d.lock_writes)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = [
            ("root", &self.root),
            ("home_dir", &self.home_dir),
            ("metadata_file", &self.metadata_file),
            ("login_status_file", &self.login_status_file),
            ("log_file", &self.log_file),
            ("backup_dir", &self.backup_dir),
        ];

        for (key, value) in layout {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("{key} cannot be empty")));
            }
        }

        if self.backup_path().starts_with(self.sandbox_root_path()) {
            return Err(ConfigError::Message(
                "backup_dir must be outside home_dir".into(),
            ));
        }

        if self.metadata_file == self.login_status_file {
            return Err(ConfigError::Message(
                "metadata_file and login_status_file must differ".into(),
            ));
        }

        Ok(())
    }

    /// Get root as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }

    /// Sandbox root (non-canonical)
    pub fn sandbox_root_path(&self) -> PathBuf {
        self.root_path().join(&self.home_dir)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root_path().join(&self.metadata_file)
    }

    pub fn login_status_path(&self) -> PathBuf {
        self.root_path().join(&self.login_status_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root_path().join(&self.log_file)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.root_path().join(&self.backup_dir)
    }
}

/// `~/ID1FS`, or `./ID1FS` when no home directory can be determined
fn default_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("ID1FS"))
        .unwrap_or_else(|| PathBuf::from("ID1FS"))
}
