//! `[css]` section: how the custom stylesheet is compiled.
//!
//! # Example
//!
//! ```toml
//! [css]
//! targets = ["> 0.5%", "last 2 versions", "not dead"]
//! minify = true
//! max_bytes = 75000
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use lightningcss::targets::Browsers;
use serde::{Deserialize, Serialize};

/// Inline CSS budget of an AMP page.
pub const DEFAULT_MAX_BYTES: usize = 75_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    /// Browserslist queries driving vendor prefixes. Empty: no prefixing.
    pub targets: Vec<String>,
    /// Minify compiled CSS.
    pub minify: bool,
    /// Warn when the compiled CSS grows past this many bytes.
    pub max_bytes: usize,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            targets: vec!["defaults".into()],
            minify: true,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl CssConfig {
    const TARGETS: FieldPath = FieldPath::new("css.targets");

    /// Resolve browserslist queries. `Ok(None)` when no targets are set.
    pub fn browsers(&self) -> Result<Option<Browsers>, String> {
        if self.targets.is_empty() {
            return Ok(None);
        }
        Browsers::from_browserslist(&self.targets).map_err(|e| e.to_string())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(e) = self.browsers() {
            diag.error_with_hint(
                Self::TARGETS,
                format!("invalid browserslist query: {e}"),
                "see https://browsersl.ist for the query syntax",
            );
        }
    }
}
