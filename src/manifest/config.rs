//! TOML manifest configuration.
//!
//! ```toml
//! name = "Hello"
//! version = "1.0"
//!
//! [browser_action]
//! default_icon = "icon.png"
//! name = "Say hello"
//! popup = "popup.html"
//!
//! [[plugins]]
//! path = "plugin.so"
//! public = true
//! ```

use super::ExtensionManifest;
use crate::error::Result;
use std::{fs, path::Path};
use tracing::debug;

impl ExtensionManifest {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let manifest: ExtensionManifest = toml::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }
}

pub fn load_config(path: &Path) -> Result<ExtensionManifest> {
    debug!(path = %path.display(), "loading manifest config");
    let raw = fs::read_to_string(path)?;
    ExtensionManifest::from_toml_str(&raw)
}
