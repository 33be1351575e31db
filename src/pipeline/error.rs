//! Build failures. None are retried; all end the build.

use std::path::PathBuf;
use thiserror::Error;

use crate::asset::{MinifyError, StyleError};
use crate::dom::ParseError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read `{0}`")]
    Load(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{0}`")]
    Parse(PathBuf, #[source] ParseError),

    #[error("structured data block #{index} is not valid JSON")]
    Data {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    StyleCompile(#[from] StyleError),

    #[error(transparent)]
    Minify(#[from] MinifyError),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}
