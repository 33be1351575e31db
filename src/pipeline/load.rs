//! Document loading: the read and the parse are separate steps so the read
//! can run alongside the stylesheet read.

use std::path::Path;

use super::BuildError;
use crate::dom::{Document, parse_document};

/// Read the source page bytes.
pub fn read_source(path: &Path) -> Result<Vec<u8>, BuildError> {
    std::fs::read(path).map_err(|e| BuildError::Load(path.to_path_buf(), e))
}

/// Parse source bytes read from `path`.
pub fn parse_source(path: &Path, bytes: &[u8]) -> Result<Document, BuildError> {
    parse_document(bytes).map_err(|e| BuildError::Parse(path.to_path_buf(), e))
}
