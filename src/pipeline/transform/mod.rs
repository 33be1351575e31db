//! Page transforms.
//!
//! Each builder reads the source document and produces new nodes; nothing
//! here mutates the source tree.
//!
//! # Modules
//!
//! - `head`: Builds the AMP `<head>` (meta, canonical, title, structured data, styles, loaders)
//! - `body`: Copies `<body>` without scripts and appends `<amp-analytics>`
//! - `assemble`: Joins head and body under a marked copy of the root

mod assemble;
mod body;
mod head;

pub use assemble::assemble;
pub use body::BodyBuilder;
pub use head::HeadBuilder;
