//! `ampify shim`: emit the stylesheet preload script.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::embed::shim::PRELOAD_JS;
use crate::log;

/// Write the script to `output`, or to stdout when no path is given.
pub fn write_shim(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create `{}`", parent.display()))?;
            }
            std::fs::write(path, PRELOAD_JS)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            log!("done"; "wrote {} ({} bytes)", path.display(), PRELOAD_JS.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{PRELOAD_JS}")?;
        }
    }
    Ok(())
}
