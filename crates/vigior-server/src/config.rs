use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use vigior_core::record_ids::DEFAULT_DATA_FILE;
use vigior_engine::config::EngineConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

pub const CONFIG_ENV: &str = "VIGIOR_CONFIG";
pub const BIND_ADDR_ENV: &str = "VIGIOR_BIND_ADDR";
pub const DATA_FILE_ENV: &str = "VIGIOR_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind_addr: default_bind_addr(),
            data_file: default_data_file(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Apply environment overrides. `lookup` is `std::env::var` in the
    /// binary and a map in tests.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup(BIND_ADDR_ENV).filter(|v| !v.trim().is_empty()) {
            self.bind_addr = addr;
        }
        if let Some(file) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(file);
        }
        self
    }
}

pub fn load_config(path: &Path) -> eyre::Result<ServerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v).map_err(|_| {
            eyre::eyre!("config_version {v} is newer than this build supports ({CURRENT_VERSION})")
        })?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: ServerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update vigior."
        ));
    }

    // v0 → v1: `model_id` and `input_policy` moved from the top level into `engine`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

        let mut engine = match obj.remove("engine") {
            Some(serde_json::Value::Object(map)) => map,
            Some(_) => return Err(eyre::eyre!("`engine` is not a JSON object")),
            None => serde_json::Map::new(),
        };
        for key in ["model_id", "input_policy"] {
            if let Some(value) = obj.remove(key) {
                engine.entry(key).or_insert(value);
            }
        }
        obj.insert("engine".to_string(), serde_json::Value::Object(engine));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (engine section)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(path: &Path, config: &ServerConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Resolve the effective config: the file named by `VIGIOR_CONFIG` (written
/// with defaults on first run), else defaults, then environment overrides.
pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<ServerConfig> {
    let config = match lookup(CONFIG_ENV).filter(|v| !v.trim().is_empty()) {
        Some(path) => {
            let path = PathBuf::from(path);
            if path.exists() {
                load_config(&path)?
            } else {
                let config = ServerConfig::default();
                save_config(&path, &config)?;
                config
            }
        }
        None => ServerConfig::default(),
    };
    Ok(config.with_overrides(lookup))
}
