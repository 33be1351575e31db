//! AMP conversion pipeline.
//!
//! ```text
//! ┌────────────────────────────┐
//! │  read (rayon::join)        │
//! │  source page │ stylesheet  │
//! └──────┬─────────────┬───────┘
//!        ▼             │
//!      parse           ▼
//!   HeadBuilder ◄── StyleResolver
//!   BodyBuilder
//!        │
//!        ▼
//!   assemble -> serialize -> write
//! ```
//!
//! The output file is written only after the whole page has been built, so
//! a failed run never leaves a partial page behind.

mod error;
mod load;
pub mod transform;

pub use error::BuildError;
pub use load::{parse_source, read_source};
pub use transform::{BodyBuilder, HeadBuilder, assemble};

use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::{self, LightningCss, StyleCompiler, StyleError, StyleResolver, StyleSource};
use crate::config::ProjectConfig;
use crate::debug;
use crate::dom::{Document, NodeExt};

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    /// Absolute path of the written page.
    pub path: PathBuf,
    /// Size of the written page.
    pub bytes: usize,
}

/// Convert the configured source page with the lightningcss compiler.
pub fn build(config: &ProjectConfig) -> Result<BuildOutput, BuildError> {
    let compiler = LightningCss::from_config(&config.css)?;
    build_with(config, &compiler)
}

/// Convert the configured source page with the given stylesheet compiler.
pub fn build_with(
    config: &ProjectConfig,
    compiler: &dyn StyleCompiler,
) -> Result<BuildOutput, BuildError> {
    let build = &config.build;
    let (source, stylesheet) = rayon::join(
        || read_source(&build.input),
        || StyleSource::read(&build.stylesheet),
    );
    let document = parse_source(&build.input, &source?)?;

    let html = render_page(&document, stylesheet, config, compiler)?;
    write_output(&build.output, &html)?;

    Ok(BuildOutput {
        path: build.output.clone(),
        bytes: html.len(),
    })
}

/// Build and serialize the AMP page for `source`.
pub fn render_page(
    source: &Document,
    stylesheet: Result<StyleSource, StyleError>,
    config: &ProjectConfig,
    compiler: &dyn StyleCompiler,
) -> Result<String, BuildError> {
    let doc = compose(source, stylesheet, config, compiler)?;
    Ok(asset::serialize(&doc, &config.minify)?)
}

/// Build the AMP document tree for `source`.
///
/// Head steps run first and in order; the first failure aborts the page.
pub fn compose(
    source: &Document,
    stylesheet: Result<StyleSource, StyleError>,
    config: &ProjectConfig,
    compiler: &dyn StyleCompiler,
) -> Result<Document, BuildError> {
    let styles = StyleResolver::new(compiler, stylesheet).with_max_bytes(config.css.max_bytes);
    let head = HeadBuilder::new(source, styles).build()?;
    let body = BodyBuilder::new(source, &config.analytics).build();
    debug!(
        "build"; "head: {} elements, body: {} elements",
        head.elements().len(),
        body.elements().len()
    );

    Ok(assemble(source, head, body))
}

fn write_output(path: &Path, html: &str) -> Result<(), BuildError> {
    let write_error = |e| BuildError::Write(path.to_path_buf(), e);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, html).map_err(write_error)
}

// ============================================================================
// tests
// ============================================================================
