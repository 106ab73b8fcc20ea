//! # Batch Configuration
//!
//! Everything a batch run needs, passed explicitly into the workflow:
//! organization endpoint, credential, parent id and the ordered task list.
//! Supports config files, environment variables, and command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DEFAULT_API_VERSION, TASK_WORK_ITEM_TYPE, UNSET_PARENT_ID};
use crate::error::{ClientError, ClientResult};
use crate::models::TaskDetail;

/// Configuration for one batch run
///
/// # Examples
///
/// ```rust
/// use workitem_batch::config::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.parent_id, 0);
/// assert_eq!(config.work_item_type, "Task");
/// assert_eq!(config.tasks.len(), 14);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Organization URL (e.g., "<https://dev.azure.com/contoso>")
    pub org_url: String,
    /// Personal access token
    pub credential: String,
    /// Parent work item id; `0` means not configured
    pub parent_id: i64,
    /// Work item type created for each descriptor
    pub work_item_type: String,
    /// REST api-version query parameter
    pub api_version: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Number of creation requests allowed in flight at once
    pub max_concurrent_submissions: usize,
    /// Build and log documents without submitting them
    pub dry_run: bool,
    /// Child tasks, in submission order
    pub tasks: Vec<TaskDetail>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            org_url: "https://dev.azure.com/your-organization".to_string(),
            credential: String::new(),
            parent_id: UNSET_PARENT_ID,
            work_item_type: TASK_WORK_ITEM_TYPE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: 30000,
            max_concurrent_submissions: 1,
            dry_run: false,
            tasks: TaskDetail::standard_breakdown(),
        }
    }
}

impl std::fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchConfig")
            .field("org_url", &self.org_url)
            .field(
                "credential",
                &if self.credential.is_empty() { "<unset>" } else { "***" },
            )
            .field("parent_id", &self.parent_id)
            .field("work_item_type", &self.work_item_type)
            .field("api_version", &self.api_version)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_concurrent_submissions", &self.max_concurrent_submissions)
            .field("dry_run", &self.dry_run)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl BatchConfig {
    /// Load configuration from the first config file found plus environment
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (./workitem-batch.toml, ./config/workitem-batch.toml,
    ///    ~/.config/workitem-batch/config.toml)
    /// 3. Default values
    pub fn load() -> ClientResult<Self> {
        let mut config = match Self::find_config_file() {
            Some(config_path) => {
                debug!("Loading config from: {}", config_path.display());
                Self::load_from_file(&config_path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;

        debug!("Loaded batch configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a specific file, then apply environment overrides
    pub fn load_with_file(path: &Path) -> ClientResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            ClientError::config_error(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut possible_paths = vec![
            PathBuf::from("./workitem-batch.toml"),
            PathBuf::from("./config/workitem-batch.toml"),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            possible_paths.push(config_dir.join("workitem-batch").join("config.toml"));
        }

        possible_paths
            .into_iter()
            .find(|path| path.exists() && path.is_file())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> ClientResult<()> {
        if let Ok(url) = std::env::var("WORKITEM_BATCH_ORG_URL") {
            self.org_url = url;
        }
        if let Ok(token) = std::env::var("WORKITEM_BATCH_PAT") {
            self.credential = token;
        }
        if let Ok(parent_id) = std::env::var("WORKITEM_BATCH_PARENT_ID") {
            self.parent_id = parent_id.trim().parse().map_err(|e| {
                ClientError::config_error(format!("Invalid WORKITEM_BATCH_PARENT_ID: {e}"))
            })?;
        }
        if let Ok(timeout) = std::env::var("WORKITEM_BATCH_TIMEOUT_MS") {
            self.timeout_ms = timeout.trim().parse().map_err(|e| {
                ClientError::config_error(format!("Invalid WORKITEM_BATCH_TIMEOUT_MS: {e}"))
            })?;
        }
        Ok(())
    }

    /// Check the configuration before any request is made
    ///
    /// An unset parent id is not rejected here; the workflow reports it as
    /// "no parent configured".
    pub fn validate(&self) -> ClientResult<()> {
        let url = reqwest::Url::parse(&self.org_url).map_err(|e| {
            ClientError::config_error(format!("Invalid org_url '{}': {}", self.org_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::config_error(format!(
                "org_url must use http or https: {}",
                self.org_url
            )));
        }
        if self.parent_id < 0 {
            return Err(ClientError::config_error(format!(
                "parent_id must not be negative, got {}",
                self.parent_id
            )));
        }
        if self.work_item_type.trim().is_empty() {
            return Err(ClientError::config_error("work_item_type must not be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::config_error("timeout_ms must be greater than zero"));
        }
        if self.max_concurrent_submissions == 0 {
            return Err(ClientError::config_error(
                "max_concurrent_submissions must be at least 1",
            ));
        }
        if self.tasks.is_empty() {
            return Err(ClientError::config_error("task list is empty"));
        }
        for task in &self.tasks {
            task.validate()
                .map_err(|e| ClientError::config_error(e.to_string()))?;
        }
        Ok(())
    }

    /// Whether a parent id has been configured
    pub fn has_parent(&self) -> bool {
        self.parent_id != UNSET_PARENT_ID
    }
}
