//! # Static FM Configuration Module
//!
//! This module provides configuration management for the Static FM backend,
//! including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//!
//! Configuration objects are constructed explicitly and passed to the
//! components that need them; there is no process-global instance.
//!
//! ## Usage
//!
//! ```no_run
//! use sfmconfig::Config;
//!
//! // Load from the default search path (./.staticfm, ~/.staticfm, ...)
//! let config = Config::load()?;
//!
//! // Access configuration values
//! let port = config.get_http_port();
//! let station = config.get_station_name();
//!
//! // Update configuration values
//! config.set_http_port(9000)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::Path,
    sync::Mutex,
};
use tracing::info;

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("staticfm.yaml");

const ENV_CONFIG_DIR: &str = "STATICFM_CONFIG";
const ENV_PREFIX: &str = "STATICFM_CONFIG__";

// Default values for configuration
const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_BASE_URL: &str = "http://localhost";
const DEFAULT_STATION_NAME: &str = "Static FM";
const DEFAULT_TIMEZONE_OFFSET_HOURS: i64 = 2;
const DEFAULT_OVERSHOOT_LIMIT: usize = 40_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: usize = 10;
const DEFAULT_USER_AGENT: &str = concat!("StaticFM/", env!("CARGO_PKG_VERSION"));
const DEFAULT_BANTER_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_TEMPERATURE: f32 = 0.85;
const DEFAULT_MAX_TOKENS: usize = 250;
const DEFAULT_CONTENT_DATASET: &str = "production";
const DEFAULT_CONTENT_API_VERSION: &str = "2024-01-01";

/// Macro to generate getter/setter for usize values with default
macro_rules! impl_usize_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> usize {
            match self.get_value($path) {
                Ok(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap() as usize,
                Ok(Value::Number(n)) if n.is_u64() => n.as_u64().unwrap() as usize,
                _ => $default,
            }
        }

        pub fn $setter(&self, size: usize) -> Result<()> {
            let n = Number::from(size);
            self.set_value($path, Value::Number(n))
        }
    };
}

/// Macro to generate getter/setter for bool values with default
macro_rules! impl_bool_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> bool {
            match self.get_value($path) {
                Ok(Value::Bool(b)) => b,
                _ => $default,
            }
        }

        pub fn $setter(&self, value: bool) -> Result<()> {
            self.set_value($path, Value::Bool(value))
        }
    };
}

/// Macro to generate getter/setter for string values with default
macro_rules! impl_string_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> String {
            match self.get_value($path) {
                Ok(Value::String(s)) if !s.is_empty() => s,
                _ => $default.to_string(),
            }
        }

        pub fn $setter(&self, value: String) -> Result<()> {
            self.set_value($path, Value::String(value))
        }
    };
}

/// Configuration manager for the Static FM backend
///
/// This structure manages the application configuration, including:
/// - Loading configuration from YAML files
/// - Merging with default configuration
/// - Handling environment variable overrides
/// - Providing typed getters/setters for configuration values
///
/// # Examples
///
/// ```no_run
/// use sfmconfig::Config;
///
/// let config = Config::load()?;
/// let port = config.get_http_port();
/// println!("HTTP port: {}", port);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Config {
    config_dir: String,
    path: String,
    data: Mutex<Value>,
}

// Implémentation manuelle de Clone
impl Clone for Config {
    fn clone(&self) -> Self {
        let data = self.data.lock().unwrap().clone();
        Self {
            config_dir: self.config_dir.clone(),
            path: self.path.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Try provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var=ENV_CONFIG_DIR, path=%env_path, "Trying to load config from env");
            return env_path;
        }

        // 3. Try current directory
        if Path::new(".staticfm").exists() {
            return ".staticfm".to_string();
        }

        // 4. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".staticfm");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        // Default fallback
        ".staticfm".to_string()
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        // Create if doesn't exist
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        // Verify it's a directory
        if !path.is_dir() {
            return Err(anyhow!("Le chemin spécifié n'est pas un répertoire"));
        }

        // Test write permission
        let test_file = path.join(".write_test");
        fs::write(&test_file, b"test")?;
        fs::remove_file(&test_file)?;

        // Test read permission
        fs::read_dir(path)?;

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `STATICFM_CONFIG` environment variable
    /// 3. `.staticfm` in the current directory
    /// 4. `.staticfm` in the user's home directory
    ///
    /// The directory is created if it doesn't exist, and validated for
    /// read/write permissions.
    pub fn config_dir(directory: &str) -> Result<String> {
        let dir_path = Self::find_config_dir(directory);
        let path = Path::new(&dir_path);

        Self::validate_config_dir(path)?;

        Ok(dir_path)
    }

    /// Loads the configuration from the default search path
    ///
    /// Equivalent to `Config::load_config("")`.
    pub fn load() -> Result<Self> {
        Self::load_config("")
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external config.yaml file if present
    /// 4. Applies environment variable overrides
    /// 5. Saves the merged configuration
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory containing the config.yaml file, or
    ///   empty to use the default search path
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the loaded `Config` or an error
    pub fn load_config(directory: &str) -> Result<Self> {
        // Obtenir le répertoire de configuration
        let config_dir = Self::config_dir(directory)?;
        info!(config_dir=%config_dir, "Using config directory");

        // Construire le chemin du fichier config.yaml
        let config_file_path = Path::new(&config_dir).join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        // Charger la configuration par défaut
        let mut default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        // Essayer de charger le fichier de configuration
        let yaml_data = if let Ok(data) = fs::read(&path) {
            info!(config_file=%path, "Loaded config file");
            data
        } else {
            info!(config_file=%path, "Config file not found, using default embedded config");
            DEFAULT_CONFIG.as_bytes().to_vec()
        };

        // Merger avec la config par défaut
        let external_value: Value = serde_yaml::from_slice(&yaml_data)?;
        merge_yaml(&mut default_value, &external_value);
        let mut config_value = Self::lower_keys_value(default_value);

        // Appliquer les overrides depuis les variables d'environnement
        Self::apply_env_overrides(&mut config_value);

        // Créer la configuration
        let config = Config {
            config_dir,
            path,
            data: Mutex::new(config_value),
        };

        // Sauvegarder la configuration
        config.save()?;
        Ok(config)
    }

    /// Saves the current configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Returns the directory the configuration was loaded from
    pub fn directory(&self) -> &str {
        &self.config_dir
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["host", "http_port"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        Self::set_value_internal(&mut data, path, value.clone())?;
        drop(data);
        self.save()?;
        Ok(())
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key = path[0].to_lowercase();
            let key_value = Value::String(key.clone());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["host", "http_port"]`)
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the YAML value or an error if the path
    /// doesn't exist
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                let key = key.to_lowercase();

                if let Some(next) = map.get(&Value::String(key)) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a Config", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    fn apply_env_overrides(config: &mut Value) {
        for (key, value) in env::vars() {
            if key.starts_with(ENV_PREFIX) {
                let key_path = key
                    .trim_start_matches(ENV_PREFIX)
                    .split("__")
                    .collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                let _ = Self::set_value_internal(config, &key_path, yaml_value);
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    if let Value::String(s) = k {
                        let new_key = Value::String(s.to_lowercase());
                        let new_val = Self::lower_keys_value(v);
                        new_map.insert(new_key, new_val);
                    } else {
                        new_map.insert(k, Self::lower_keys_value(v));
                    }
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    // ========================================================================
    // Host
    // ========================================================================

    /// Gets the base URL for the HTTP server
    ///
    /// Returns the configured base URL, or `http://localhost` if not
    /// configured.
    pub fn get_base_url(&self) -> String {
        match self.get_value(&["host", "base_url"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            Ok(_) => {
                tracing::warn!("Base URL is not a string or empty, using default localhost");
                DEFAULT_BASE_URL.to_string()
            }
            Err(err) => {
                tracing::warn!("Failed to get base URL: {}, using default localhost", err);
                DEFAULT_BASE_URL.to_string()
            }
        }
    }

    /// Gets the HTTP port from configuration
    ///
    /// Returns the configured HTTP port, or the default port (8080) if not
    /// configured or invalid.
    pub fn get_http_port(&self) -> u16 {
        match self.get_value(&["host", "http_port"]) {
            Ok(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap() as u16,
            Ok(Value::String(s)) => match s.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(
                        "Invalid HTTP port '{}', using default {}",
                        s,
                        DEFAULT_HTTP_PORT
                    );
                    DEFAULT_HTTP_PORT
                }
            },
            Ok(_) => {
                tracing::warn!(
                    "HTTP port not a number or string, using default {}",
                    DEFAULT_HTTP_PORT
                );
                DEFAULT_HTTP_PORT
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to get HTTP port: {}, using default {}",
                    err,
                    DEFAULT_HTTP_PORT
                );
                DEFAULT_HTTP_PORT
            }
        }
    }

    /// Sets the HTTP port in configuration
    pub fn set_http_port(&self, port: u16) -> Result<()> {
        let n = Number::from(port);
        self.set_value(&["host", "http_port"], Value::Number(n))
    }

    // ========================================================================
    // Station
    // ========================================================================

    impl_string_config!(
        get_station_name,
        set_station_name,
        &["station", "name"],
        DEFAULT_STATION_NAME
    );

    /// Gets the offset of station time relative to UTC, in hours
    ///
    /// Values outside the plausible range (-12..=14) fall back to the
    /// default.
    pub fn get_timezone_offset_hours(&self) -> i64 {
        match self.get_value(&["station", "timezone_offset_hours"]) {
            Ok(Value::Number(n)) if n.is_i64() => {
                let hours = n.as_i64().unwrap();
                if (-12..=14).contains(&hours) {
                    hours
                } else {
                    tracing::warn!(
                        "Timezone offset {} out of range, using default {}",
                        hours,
                        DEFAULT_TIMEZONE_OFFSET_HOURS
                    );
                    DEFAULT_TIMEZONE_OFFSET_HOURS
                }
            }
            _ => DEFAULT_TIMEZONE_OFFSET_HOURS,
        }
    }

    /// Sets the offset of station time relative to UTC, in hours
    pub fn set_timezone_offset_hours(&self, hours: i64) -> Result<()> {
        let n = Number::from(hours);
        self.set_value(&["station", "timezone_offset_hours"], Value::Number(n))
    }

    // ========================================================================
    // ICY probe
    // ========================================================================

    impl_usize_config!(
        get_icy_overshoot_limit,
        set_icy_overshoot_limit,
        &["icy", "overshoot_limit"],
        DEFAULT_OVERSHOOT_LIMIT
    );

    impl_usize_config!(
        get_icy_request_timeout_secs,
        set_icy_request_timeout_secs,
        &["icy", "request_timeout_secs"],
        DEFAULT_REQUEST_TIMEOUT_SECS
    );

    impl_string_config!(
        get_icy_user_agent,
        set_icy_user_agent,
        &["icy", "user_agent"],
        DEFAULT_USER_AGENT
    );

    // ========================================================================
    // Banter generation
    // ========================================================================

    impl_string_config!(
        get_banter_api_base,
        set_banter_api_base,
        &["banter", "api_base"],
        DEFAULT_BANTER_API_BASE
    );

    /// Gets the API key for the completion backend
    ///
    /// Returns an error when the key is missing or empty, since no request
    /// can succeed without it.
    pub fn get_banter_api_key(&self) -> Result<String> {
        match self.get_value(&["banter", "api_key"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Err(anyhow!(
                "banter.api_key is not configured (set STATICFM_CONFIG__banter__api_key)"
            )),
        }
    }

    /// Sets the API key for the completion backend
    pub fn set_banter_api_key(&self, key: String) -> Result<()> {
        self.set_value(&["banter", "api_key"], Value::String(key))
    }

    /// Gets the ordered list of completion model identifiers
    ///
    /// The order encodes failover preference; the first entry is tried
    /// first.
    pub fn get_banter_models(&self) -> Vec<String> {
        match self.get_value(&["banter", "models"]) {
            Ok(Value::Sequence(seq)) => seq
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) if !s.is_empty() => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Sets the ordered list of completion model identifiers
    pub fn set_banter_models(&self, models: Vec<String>) -> Result<()> {
        let seq = models.into_iter().map(Value::String).collect();
        self.set_value(&["banter", "models"], Value::Sequence(seq))
    }

    /// Gets the sampling temperature for script generation
    pub fn get_banter_temperature(&self) -> f32 {
        match self.get_value(&["banter", "temperature"]) {
            Ok(Value::Number(n)) => n.as_f64().map(|f| f as f32).unwrap_or(DEFAULT_TEMPERATURE),
            _ => DEFAULT_TEMPERATURE,
        }
    }

    impl_usize_config!(
        get_banter_max_tokens,
        set_banter_max_tokens,
        &["banter", "max_tokens"],
        DEFAULT_MAX_TOKENS
    );

    // ========================================================================
    // Content store
    // ========================================================================

    /// Gets the content store project identifier
    ///
    /// Returns an error when missing, since the store URL cannot be built
    /// without it.
    pub fn get_content_project_id(&self) -> Result<String> {
        match self.get_value(&["content", "project_id"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Err(anyhow!(
                "content.project_id is not configured (set STATICFM_CONFIG__content__project_id)"
            )),
        }
    }

    /// Sets the content store project identifier
    pub fn set_content_project_id(&self, project_id: String) -> Result<()> {
        self.set_value(&["content", "project_id"], Value::String(project_id))
    }

    impl_string_config!(
        get_content_dataset,
        set_content_dataset,
        &["content", "dataset"],
        DEFAULT_CONTENT_DATASET
    );

    impl_string_config!(
        get_content_api_version,
        set_content_api_version,
        &["content", "api_version"],
        DEFAULT_CONTENT_API_VERSION
    );

    impl_bool_config!(
        get_content_use_cdn,
        set_content_use_cdn,
        &["content", "use_cdn"],
        true
    );
}

/// Merges external YAML configuration into default configuration
///
/// This function recursively merges two YAML value trees:
/// - For mappings (objects), it merges keys from external into default
/// - For scalars and sequences, external values replace default values
///
/// # Arguments
///
/// * `default` - The default configuration to merge into (modified in place)
/// * `external` - The external configuration to merge from
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // pour les scalaires ou séquences, on remplace
    }
}
