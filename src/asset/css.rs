//! Stylesheet compilation.
//!
//! The stylesheet is read once per build, compiled by a [`StyleCompiler`]
//! and cleaned up by [`StyleResolver`] before it is inlined.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::Targets;
use regex::Regex;
use thiserror::Error;

use crate::config::CssConfig;
use crate::config::section::DEFAULT_MAX_BYTES;
use crate::{debug, log};

/// Leading `@charset` rule (with optional BOM and surrounding whitespace).
static CHARSET_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\x{FEFF}?\s*(?i:@charset)\s*(?:"[^"]*"|'[^']*')\s*;\s*"#)
        .expect("charset pattern is valid")
});

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read stylesheet `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to compile `{path}`: {message}")]
    Compile { path: PathBuf, message: String },

    #[error("invalid css targets: {0}")]
    Targets(String),
}

/// Stylesheet text and where it came from.
#[derive(Debug, Clone)]
pub struct StyleSource {
    pub path: PathBuf,
    pub text: String,
}

impl StyleSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a stylesheet from disk.
    pub fn read(path: &Path) -> Result<Self, StyleError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| StyleError::Read(path.to_path_buf(), e))?;
        Ok(Self::new(path, text))
    }
}

/// Turns stylesheet source into final CSS text.
pub trait StyleCompiler {
    fn compile(&self, source: &StyleSource) -> Result<String, StyleError>;
}

// ============================================================================
// lightningcss
// ============================================================================

/// Parses, prefixes for the configured browsers and prints the stylesheet.
#[derive(Debug, Clone, Default)]
pub struct LightningCss {
    targets: Targets,
    minify: bool,
}

impl LightningCss {
    pub fn from_config(config: &CssConfig) -> Result<Self, StyleError> {
        let browsers = config.browsers().map_err(StyleError::Targets)?;
        Ok(Self {
            targets: Targets {
                browsers,
                ..Targets::default()
            },
            minify: config.minify,
        })
    }
}

impl StyleCompiler for LightningCss {
    fn compile(&self, source: &StyleSource) -> Result<String, StyleError> {
        let compile_error = |message: String| StyleError::Compile {
            path: source.path.clone(),
            message,
        };

        let options = ParserOptions {
            filename: source.path.display().to_string(),
            ..ParserOptions::default()
        };
        let mut stylesheet =
            StyleSheet::parse(&source.text, options).map_err(|e| compile_error(e.to_string()))?;

        stylesheet
            .minify(MinifyOptions {
                targets: self.targets,
                ..MinifyOptions::default()
            })
            .map_err(|e| compile_error(e.to_string()))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: self.minify,
                targets: self.targets,
                ..PrinterOptions::default()
            })
            .map_err(|e| compile_error(e.to_string()))?;
        Ok(result.code)
    }
}

// ============================================================================
// resolver
// ============================================================================

/// Strip a leading `@charset` rule; it is not allowed inside `<style>`.
pub fn strip_charset(css: &str) -> &str {
    match CHARSET_RULE.find(css) {
        Some(m) => &css[m.end()..],
        None => css,
    }
}

/// Produces the inlined custom CSS from an already-read stylesheet.
///
/// A failed read is carried until [`StyleResolver::resolve`] so the error
/// surfaces at the point where the style is needed.
pub struct StyleResolver<'a> {
    compiler: &'a dyn StyleCompiler,
    source: Result<StyleSource, StyleError>,
    max_bytes: usize,
}

impl<'a> StyleResolver<'a> {
    pub fn new(compiler: &'a dyn StyleCompiler, source: Result<StyleSource, StyleError>) -> Self {
        Self {
            compiler,
            source,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Size above which a warning is logged.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn resolve(self) -> Result<String, StyleError> {
        let source = self.source?;
        let compiled = self.compiler.compile(&source)?;
        let css = strip_charset(&compiled).to_string();

        debug!("css"; "{} -> {} bytes", source.path.display(), css.len());
        if css.len() > self.max_bytes {
            log!("warning"; "custom css is {} bytes, over the {} byte limit", css.len(), self.max_bytes);
        }
        Ok(css)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Compiler returning fixed text.
    struct Fixed(&'static str);

    impl StyleCompiler for Fixed {
        fn compile(&self, _source: &StyleSource) -> Result<String, StyleError> {
            Ok(self.0.to_string())
        }
    }

    fn source(text: &str) -> StyleSource {
        StyleSource::new("main.css", text)
    }

    #[test]
    fn test_charset_pattern_compiles() {
        LazyLock::force(&CHARSET_RULE);
    }

    #[test]
    fn test_strip_charset() {
        assert_eq!(strip_charset(r#"@charset "UTF-8";body{color:red}"#), "body{color:red}");
        assert_eq!(strip_charset("@CHARSET 'utf-8' ;\nbody{}"), "body{}");
        assert_eq!(strip_charset("\u{feff}@charset \"UTF-8\";a{}"), "a{}");
        assert_eq!(strip_charset("body{color:red}"), "body{color:red}");
    }

    #[test]
    fn test_strip_charset_only_leading() {
        let css = r#"a{}@charset "UTF-8";"#;
        assert_eq!(strip_charset(css), css);
    }

    #[test]
    fn test_resolver_strips_compiled_charset() {
        let compiler = Fixed(r#"@charset "UTF-8";body{color:red}"#);
        let css = StyleResolver::new(&compiler, Ok(source(""))).resolve().unwrap();
        assert_eq!(css, "body{color:red}");
    }

    #[test]
    fn test_resolver_reports_read_failure() {
        let compiler = Fixed("");
        let dir = TempDir::new().unwrap();
        let missing = StyleSource::read(&dir.path().join("missing.css"));

        let err = StyleResolver::new(&compiler, missing).resolve().unwrap_err();
        assert!(matches!(err, StyleError::Read(..)));
    }

    #[test]
    fn test_lightningcss_minifies() {
        let compiler = LightningCss::from_config(&CssConfig::default()).unwrap();
        let css = compiler
            .compile(&source("body {\n  color: red;\n}\n"))
            .unwrap();
        assert_eq!(css, "body{color:red}");
    }

    #[test]
    fn test_lightningcss_empty_stylesheet() {
        let compiler = LightningCss::from_config(&CssConfig::default()).unwrap();
        assert_eq!(compiler.compile(&source("")).unwrap(), "");
    }
}
