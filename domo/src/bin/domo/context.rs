use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project context for domo operations
pub struct ProjectContext {
    /// Root directory of the project (where Cargo.toml is, or the working directory)
    pub project_root: PathBuf,
    /// Path to .domo directory
    pub domo_dir: PathBuf,
    /// Path to config file
    pub config_path: PathBuf,
    /// Local schema snapshots, one `<dataset>.json` per dataset
    pub schemas_dir: PathBuf,
    /// Exported remote schemas, one `<dataset>.json` per dataset
    pub remote_dir: PathBuf,
}

/// Configuration stored in .domo/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomoConfig {
    #[serde(default)]
    pub schema: SchemaSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSettings {
    #[serde(default = "default_schemas_dir")]
    pub schemas_dir: String,
    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            schemas_dir: default_schemas_dir(),
            remote_dir: default_remote_dir(),
        }
    }
}

fn default_schemas_dir() -> String {
    ".domo/schemas".to_string()
}

fn default_remote_dir() -> String {
    ".domo/remote".to_string()
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory
    pub fn find_from(start: &Path) -> Result<Self> {
        Self::from_root(Self::find_project_root(start))
    }

    /// Create context from a known project root
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let domo_dir = project_root.join(".domo");
        let config_path = domo_dir.join("config.toml");

        let config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config.toml")?;
            let config: DomoConfig =
                toml::from_str(&content).context("Failed to parse config.toml")?;
            Some(config)
        } else {
            None
        };

        let settings = config.map(|c| c.schema).unwrap_or_default();
        let schemas_dir = project_root.join(expand_env(&settings.schemas_dir)?);
        let remote_dir = project_root.join(expand_env(&settings.remote_dir)?);

        Ok(Self {
            project_root,
            domo_dir,
            config_path,
            schemas_dir,
            remote_dir,
        })
    }

    /// Nearest ancestor holding a Cargo.toml, else `start` itself.
    fn find_project_root(start: &Path) -> PathBuf {
        let mut current = start.to_path_buf();
        loop {
            if current.join("Cargo.toml").exists() {
                return current;
            }
            if !current.pop() {
                log::debug!("no Cargo.toml above {}, using it as project root", start.display());
                return start.to_path_buf();
            }
        }
    }

    /// Check if domo is initialized in this project
    pub fn is_initialized(&self) -> bool {
        self.domo_dir.exists() && self.config_path.exists()
    }

    pub fn local_schema_path(&self, dataset: &str) -> PathBuf {
        self.schemas_dir.join(format!("{dataset}.json"))
    }
}

/// Expands a whole-value `${VAR}` reference; anything else is returned as is.
pub fn expand_env(value: &str) -> Result<String> {
    match value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(var_name) => std::env::var(var_name)
            .with_context(|| format!("Environment variable {var_name} not set")),
        None => Ok(value.to_string()),
    }
}
