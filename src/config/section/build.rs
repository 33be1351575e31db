//! `[build]` section: where the page comes from and where it goes.
//!
//! # Example
//!
//! ```toml
//! [build]
//! input = "index.html"
//! stylesheet = "css/main.css"
//! output = "amp/index.html"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Canonical source page.
    pub input: PathBuf,
    /// Stylesheet inlined as the custom style.
    pub stylesheet: PathBuf,
    /// Generated AMP page.
    pub output: PathBuf,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            input: "index.html".into(),
            stylesheet: "css/main.css".into(),
            output: "amp/index.html".into(),
        }
    }
}

impl BuildSectionConfig {
    const OUTPUT: FieldPath = FieldPath::new("build.output");

    /// Validate build paths (after normalization).
    ///
    /// An unreadable `input` is left to the loader.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.input == self.output {
            diag.error_with_hint(
                Self::OUTPUT,
                "output would overwrite the source page",
                "choose a different build.output, e.g. `amp/index.html`",
            );
        }
    }
}
