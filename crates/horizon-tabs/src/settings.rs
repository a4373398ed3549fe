//! Tab bar settings loaded from TOML or JSON.
//!
//! Enumerated values stay raw strings here. They are validated when the
//! settings are turned into [`TabBarProps`], so an unsupported literal in a
//! file produces a [`ConfigWarning`] instead of a parse failure.
//!
//! ```toml
//! [tab_bar]
//! backend = "android"
//! label_visibility_mode = "labeled"
//!
//! [logging]
//! filter = "horizon_tabs=debug"
//! ```

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use horizon_tabs_core::logging::targets;
use horizon_tabs_style::icon::PlatformCapabilities;
use horizon_tabs_style::types::Color;
use horizon_tabs_style::validate::{ConfigWarning, ConfigWarnings};

use crate::error::{Result, TabsError};
use crate::tab_bar::TabBarProps;

const BACKENDS: &[&str] = &["ios", "android", "custom"];

/// Capabilities of a custom rendering backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySettings {
    pub symbols: bool,
    pub resources: bool,
    pub families: bool,
}

/// The `[tab_bar]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabBarSettings {
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_visibility_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize_behavior: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_transparent_on_scroll_edge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilitySettings>,
}

impl Default for TabBarSettings {
    fn default() -> Self {
        Self {
            backend: "ios".to_string(),
            blur_effect: None,
            label_visibility_mode: None,
            minimize_behavior: None,
            disable_transparent_on_scroll_edge: None,
            background_color: None,
            capabilities: None,
        }
    }
}

/// The `[logging]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Settings file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsSettings {
    pub tab_bar: TabBarSettings,
    pub logging: LoggingSettings,
}

impl TabsSettings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TabsError::settings("TOML", e))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| TabsError::settings("JSON", e))
    }

    /// Load a settings file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TabsError::io(path, e))?;
        let settings = match extension(path) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(TabsError::settings(
                    "settings",
                    format!("unrecognized file extension {other:?}, expected toml or json"),
                ));
            }
        };
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TabsError::settings("TOML", e))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TabsError::settings("JSON", e))
    }

    /// Write as TOML, replacing `path` atomically.
    pub fn save_toml(&self, path: impl AsRef<Path>) -> Result<()> {
        atomic_write(path.as_ref(), &self.to_toml_string()?)
    }

    /// Write as JSON, replacing `path` atomically.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        atomic_write(path.as_ref(), &self.to_json_string()?)
    }

    /// Install the global subscriber using the `[logging]` filter.
    pub fn init_logging(&self) -> Result<()> {
        horizon_tabs_core::init_logging(self.logging.filter.as_deref())?;
        Ok(())
    }

    /// Container props described by these settings.
    ///
    /// Problems with the file are recorded in `warnings`; the affected value
    /// is left unset.
    pub fn tab_bar_props(&self, warnings: &mut ConfigWarnings) -> TabBarProps {
        let settings = &self.tab_bar;
        let capabilities = match settings.backend.as_str() {
            "ios" => PlatformCapabilities::ios(),
            "android" => PlatformCapabilities::android(),
            "custom" => {
                let custom = settings.capabilities.unwrap_or_default();
                PlatformCapabilities {
                    symbols: custom.symbols,
                    resources: custom.resources,
                    families: custom.families,
                    platform_family: None,
                }
            }
            other => {
                warnings.record(ConfigWarning::other("backend", other, BACKENDS));
                PlatformCapabilities::ios()
            }
        };

        let background_color = settings.background_color.as_deref().and_then(|raw| match Color::parse(raw) {
            Ok(color) => Some(color),
            Err(err) => {
                tracing::warn!(target: targets::CONFIG, error = %err, "ignoring background_color");
                None
            }
        });

        TabBarProps {
            background_color,
            blur_effect: settings.blur_effect.clone(),
            label_visibility_mode: settings.label_visibility_mode.clone(),
            minimize_behavior: settings.minimize_behavior.clone(),
            disable_transparent_on_scroll_edge: settings.disable_transparent_on_scroll_edge,
            capabilities,
            ..TabBarProps::default()
        }
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| TabsError::io(dir, e))?;
    file.write_all(contents.as_bytes()).map_err(|e| TabsError::io(file.path(), e))?;
    file.persist(path).map_err(|e| TabsError::io(path, e.error))?;
    tracing::debug!(target: targets::CONFIG, path = %path.display(), "settings saved");
    Ok(())
}
