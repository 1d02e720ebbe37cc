//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/sharpener/config.toml` (XDG) or platform config dir
//! 3. Project config: `.sharpener.toml`
//! 4. Environment variables: `SHARPENER_*` (nested keys separated by `__`)
//!
//! # Example
//!
//! **Project config** (`.sharpener.toml`):
//! ```toml
//! [naming]
//! component_pattern = "Sharp%sComponent"
//! scope_pattern = "Sharp%sScope"
//!
//! [scope]
//! unscoped = "none"
//!
//! [output]
//! dir = "app/build/generated/source/sharpener"
//! ```
//!
//! **Environment**: `SHARPENER_OUTPUT__DIR=/tmp/out`

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
    #[serde(default)]
    pub framework: FrameworkConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Name patterns for generated types. Each pattern holds exactly one `%s`,
/// replaced by the simple name of the annotated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    pub component_pattern: String,
    pub scope_pattern: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            component_pattern: "Sharp%sComponent".to_string(),
            scope_pattern: "Sharp%sScope".to_string(),
        }
    }
}

/// Where the marker annotations live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkersConfig {
    pub package: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            package: "com.github.alexdochioiu.daggersharpener".to_string(),
        }
    }
}

/// Annotation types of the target DI framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkConfig {
    /// Component annotation, e.g. `dagger.Component`.
    pub component: String,
    /// Scope meta-annotation, e.g. `javax.inject.Scope`.
    pub scope: String,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            component: "dagger.Component".to_string(),
            scope: "javax.inject.Scope".to_string(),
        }
    }
}

/// What to do with a component that carries no scope information at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnscopedPolicy {
    /// Generate a dedicated scope, as if `SharpScope` were present.
    #[default]
    Synthesize,
    /// Leave the component unscoped, as if `NoScope` were present.
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    #[serde(default)]
    pub unscoped: UnscopedPolicy,
}

/// Generated source output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory; files land in `<dir>/<package path>/<Name>.java`.
    pub dir: PathBuf,
    /// Comment placed at the top of every generated file.
    pub file_comment: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build/generated/source/sharpener"),
            file_comment: "Generated by DaggerSharpener".to_string(),
        }
    }
}

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".sharpener.toml";

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered figment used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            // User config
            .merge(Toml::file(Self::user_config_path()))
            // Project config
            .merge(Toml::file(PROJECT_CONFIG_FILE))
            // Environment variables (highest priority)
            .merge(Env::prefixed("SHARPENER_").split("__"))
    }

    /// Extract a config from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }

    /// User config path: ~/.config/sharpener/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("sharpener").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        dirs::config_dir()
            .map(|p| p.join("sharpener").join("config.toml"))
            .unwrap_or_default()
    }
}
