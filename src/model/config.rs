use serde::{Deserialize, Serialize};

/// Configuration from taskline.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Which backend holds the task list, and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,
    /// Store file name, relative to the directory holding taskline.toml.
    #[serde(default = "default_file")]
    pub file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON array of task records in a single file.
    Json,
    /// Tab-separated grid with a fixed 8-column header row.
    Sheet,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Json
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: Backend::Json,
            file: default_file(),
        }
    }
}

fn default_file() -> String {
    "tasks.json".to_string()
}

impl StoreConfig {
    /// Default store file name for a backend, used by `tl init`.
    pub fn default_file_for(backend: Backend) -> &'static str {
        match backend {
            Backend::Json => "tasks.json",
            Backend::Sheet => "tasks.sheet",
        }
    }
}
