//! `ampify build`: run the pipeline for the loaded project.

use anyhow::Result;

use crate::config::ProjectConfig;
use crate::{debug, log, pipeline};

/// Build the AMP page and report where it went.
pub fn build_page(config: &ProjectConfig) -> Result<()> {
    debug!(
        "build";
        "{} + {} -> {}",
        config.root_relative(&config.build.input).display(),
        config.root_relative(&config.build.stylesheet).display(),
        config.root_relative(&config.build.output).display()
    );

    let output = pipeline::build(config)?;

    log!(
        "done";
        "wrote {} ({} bytes)",
        config.root_relative(&output.path).display(),
        output.bytes
    );
    Ok(())
}
