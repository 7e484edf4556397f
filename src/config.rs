//! Layered configuration for symdoc.
//!
//! Sources, lowest precedence first:
//! - Default values
//! - `.symdoc/settings.toml` (found by walking up from the current directory)
//!   or the file given with `--config`
//! - Environment variables
//! - CLI argument overrides (applied by the command layer)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `SYMDOC_` and use double
//! underscores to separate nested levels:
//! - `SYMDOC_MODULE_NAME=Ably` sets `module_name`
//! - `SYMDOC_OUTPUT__PATH=Docs/api.md` sets `output.path`
//! - `SYMDOC_RENDER__OPT_OUT_MARKER=:hidden:` sets `render.opt_out_marker`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::render::RenderOptions;

const CONFIG_DIR: &str = ".symdoc";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "SYMDOC_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Module being documented. Names the primary graph files and the
    /// umbrella header's import namespace.
    #[serde(default = "default_module_name")]
    pub module_name: String,

    #[serde(default)]
    pub inputs: InputsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct InputsConfig {
    /// Primary symbol-graph files, loaded in order
    #[serde(default)]
    pub primary: Vec<PathBuf>,

    /// Directory searched for `<module_name>*.symbols.json` when `primary`
    /// is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_dir: Option<PathBuf>,

    /// Secondary (header) symbol graph used for documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<PathBuf>,

    /// Umbrella header listing internal-only headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub umbrella_header: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Where the Markdown reference is written
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RenderConfig {
    /// Document title; derived from `module_name` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Paragraph under the title; derived from `module_name` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    #[serde(default = "default_fence_language")]
    pub fence_language: String,

    #[serde(default = "default_opt_out_marker")]
    pub opt_out_marker: String,

    #[serde(default = "default_placeholder")]
    pub undocumented_placeholder: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for every target
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `loader = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 { 1 }
fn default_module_name() -> String { "Module".to_string() }
fn default_output_path() -> PathBuf { PathBuf::from("api.md") }
fn default_fence_language() -> String { "swift".to_string() }
fn default_opt_out_marker() -> String { ":nodoc:".to_string() }
fn default_placeholder() -> String { "*Not documented.*".to_string() }
fn default_log_level() -> String { "warn".to_string() }

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            module_name: default_module_name(),
            inputs: InputsConfig::default(),
            output: OutputConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            intro: None,
            fence_language: default_fence_language(),
            opt_out_marker: default_opt_out_marker(),
            undocumented_placeholder: default_placeholder(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels; single underscores
            // stay inside field names.
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find `.symdoc/settings.toml` in the current directory or an ancestor
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `dir`
    pub fn init_config_file(dir: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }

    /// Rendering options with module-derived defaults filled in
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::for_module(&self.module_name);
        RenderOptions {
            title: self.render.title.clone().unwrap_or(defaults.title),
            intro: self.render.intro.clone().unwrap_or(defaults.intro),
            fence_language: self.render.fence_language.clone(),
            opt_out_marker: self.render.opt_out_marker.clone(),
            placeholder: self.render.undocumented_placeholder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.output.path, PathBuf::from("api.md"));
        assert_eq!(settings.render.opt_out_marker, ":nodoc:");
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.inputs.primary.is_empty());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2
module_name = "Ably"

[inputs]
primary = ["build/Ably.symbols.json", "build/Ably@Swift.symbols.json"]
secondary = "build/objc-symbols.json"
umbrella_header = "Source/include/Ably/AblyInternal.h"

[output]
path = "Docs/markdown-api-reference/api.md"

[render]
title = "Ably SDK Swift Public API Reference"
fence_language = "swift"

[logging.modules]
loader = "debug"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.module_name, "Ably");
        assert_eq!(settings.inputs.primary.len(), 2);
        assert_eq!(
            settings.inputs.secondary,
            Some(PathBuf::from("build/objc-symbols.json"))
        );
        assert_eq!(
            settings.output.path,
            PathBuf::from("Docs/markdown-api-reference/api.md")
        );
        assert_eq!(settings.logging.modules["loader"], "debug");

        let options = settings.render_options();
        assert_eq!(options.title, "Ably SDK Swift Public API Reference");
        // Unset intro falls back to the module-derived default
        assert!(options.intro.contains("`Ably`"));
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/settings.toml");

        let mut settings = Settings::default();
        settings.module_name = "Demo".to_string();
        settings.render.undocumented_placeholder = "_TBD_".to_string();

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.module_name, "Demo");
        assert_eq!(loaded.render.undocumented_placeholder, "_TBD_");
        assert!(loaded.render.title.is_none());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        fs::write(&config_path, "[render]\nopt_out_marker = \":hidden:\"\n").unwrap();

        let settings = Settings::load_from(&config_path).unwrap();

        assert_eq!(settings.render.opt_out_marker, ":hidden:");
        // Default values should still be present
        assert_eq!(settings.version, 1);
        assert_eq!(settings.render.fence_language, "swift");
        assert_eq!(settings.output.path, PathBuf::from("api.md"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.module_name, "Module");
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[render]\nfence_language = \"objc\"\n\n[logging]\ndefault = \"info\"\n",
        )
        .unwrap();

        unsafe {
            std::env::set_var("SYMDOC_LOGGING__DEFAULT", "trace");
        }

        let settings = Settings::load_from(&config_path).unwrap();

        unsafe {
            std::env::remove_var("SYMDOC_LOGGING__DEFAULT");
        }

        // Environment variable should override config file
        assert_eq!(settings.logging.default, "trace");
        // Config file value should be used when no env var
        assert_eq!(settings.render.fence_language, "objc");
    }

    #[test]
    fn test_init_config_file_respects_force() {
        let temp_dir = TempDir::new().unwrap();

        let path = Settings::init_config_file(temp_dir.path(), false).unwrap();
        assert!(path.ends_with(".symdoc/settings.toml"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("version = 1"));
        assert!(content.contains("[render]"));

        assert!(Settings::init_config_file(temp_dir.path(), false).is_err());
        assert!(Settings::init_config_file(temp_dir.path(), true).is_ok());
    }
}
