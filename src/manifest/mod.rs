//! Extension manifest descriptors.
//!
//! The browser action and NPAPI plugin declarations are plain structs,
//! validated before they are rendered to `manifest.json`.

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "config")]
pub use config::load_config;

use crate::error::{Error, Result};
use crate::json::{JsonObject, JsonValue};
use serde::Deserialize;
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Component, Path, PathBuf},
};
use tracing::debug;

pub const MANIFEST_FILE: &str = "manifest.json";

/// The toolbar button declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrowserActionInfo {
    pub default_icon: String,
    pub name: String,
    /// Page shown when the button is clicked. Empty means none.
    #[serde(default)]
    pub popup: Option<String>,
}

/// An NPAPI plugin shipped inside the extension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginInfo {
    pub path: String,
    /// Whether regular web pages may load the plugin.
    #[serde(default, alias = "is_public")]
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub browser_action: Option<BrowserActionInfo>,
    #[serde(default)]
    pub plugins: Vec<PluginInfo>,
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidManifest(msg.into())
}

/// One to four dot-separated integers, each at most 65535, without leading
/// zeros ("0" itself is fine).
fn validate_version(version: &str) -> Result<()> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() > 4 {
        return Err(invalid(format!("version {version:?} has more than 4 parts")));
    }
    for part in parts {
        let ok = !part.is_empty()
            && part.bytes().all(|b| b.is_ascii_digit())
            && !(part.len() > 1 && part.starts_with('0'))
            && part.parse::<u16>().is_ok();
        if !ok {
            return Err(invalid(format!("version {version:?} is not dotted integers")));
        }
    }
    Ok(())
}

impl BrowserActionInfo {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("browser_action.name must not be empty"));
        }
        if self.default_icon.trim().is_empty() {
            return Err(invalid("browser_action.default_icon must not be empty"));
        }
        Ok(())
    }

    fn popup(&self) -> Option<&str> {
        self.popup.as_deref().filter(|p| !p.is_empty())
    }

    pub fn to_json(&self) -> JsonValue {
        let mut obj = JsonObject::new();
        obj.insert("default_icon", self.default_icon.as_str());
        obj.insert("name", self.name.as_str());
        if let Some(popup) = self.popup() {
            obj.insert("popup", popup);
        }
        obj.into()
    }
}

impl PluginInfo {
    /// Paths are relative to the extension root and may not escape it.
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(invalid("plugin path must not be empty"));
        }
        let path = Path::new(&self.path);
        if path.has_root()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(invalid(format!(
                "plugin path {:?} must stay inside the extension",
                self.path
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> JsonValue {
        [
            ("path", JsonValue::from(self.path.as_str())),
            ("public", JsonValue::from(self.public)),
        ]
        .into_iter()
        .collect()
    }
}

impl ExtensionManifest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        validate_version(&self.version)?;
        if let Some(action) = &self.browser_action {
            action.validate()?;
        }
        for plugin in &self.plugins {
            plugin.validate()?;
        }
        Ok(())
    }

    /// Render with a fixed member order. Does not validate.
    pub fn to_json(&self) -> JsonValue {
        let mut obj = JsonObject::new();
        obj.insert("name", self.name.as_str());
        obj.insert("version", self.version.as_str());
        if let Some(description) = &self.description {
            obj.insert("description", description.as_str());
        }
        if let Some(action) = &self.browser_action {
            obj.insert("browser_action", action.to_json());
        }
        if !self.plugins.is_empty() {
            obj.insert(
                "plugins",
                self.plugins.iter().map(PluginInfo::to_json).collect::<JsonValue>(),
            );
        }
        obj.into()
    }

    /// Validate, then write compact JSON to `sink`.
    pub fn write<W: Write>(&self, sink: W) -> Result<()> {
        self.validate()?;
        self.to_json().write(sink)?;
        Ok(())
    }
}

/// Validate `manifest` and write it to `<dir>/manifest.json`, creating `dir`
/// if needed. Returns the written path.
pub fn write_manifest(dir: &Path, manifest: &ExtensionManifest) -> Result<PathBuf> {
    manifest.validate()?;
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(MANIFEST_FILE);
    let mut out = BufWriter::new(File::create(&path)?);
    manifest.to_json().write_pretty(&mut out)?;
    out.write_all(b"\n")?;
    out.flush()?;
    debug!(path = %path.display(), "manifest written");
    Ok(path)
}

/// Read back a previously written manifest's raw JSON.
pub fn read_manifest(dir: &Path) -> io::Result<JsonValue> {
    let raw = fs::read_to_string(dir.join(MANIFEST_FILE))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(value.into())
}
