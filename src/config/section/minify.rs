//! `[minify]` section.
//!
//! ```toml
//! [minify]
//! enable = true
//! remove_comments = true
//! remove_optional_tags = false
//! sort_attributes = true
//! sort_class_names = true
//! remove_empty_attributes = true
//! remove_script_type_attributes = true
//! ```
//!
//! With `enable` set, minify-html always collapses whitespace and boolean
//! attributes and drops attribute quotes where HTML5 allows it. The rest are
//! individual switches.

use crate::dom::RenderConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Run the HTML minifier over the serialized page.
    pub enable: bool,
    /// Drop comments (minifier).
    pub remove_comments: bool,
    /// Omit closing tags and `<html>`/`<head>` opening tags where HTML5 allows (minifier).
    pub remove_optional_tags: bool,
    pub sort_attributes: bool,
    pub sort_class_names: bool,
    pub remove_empty_attributes: bool,
    pub remove_script_type_attributes: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            enable: true,
            remove_comments: true,
            remove_optional_tags: false,
            sort_attributes: true,
            sort_class_names: true,
            remove_empty_attributes: true,
            remove_script_type_attributes: true,
        }
    }
}

impl MinifyConfig {
    /// Rules applied to the tree before serialization.
    pub const fn render_config(&self) -> RenderConfig {
        RenderConfig {
            sort_attributes: self.sort_attributes,
            sort_class_names: self.sort_class_names,
            remove_empty_attributes: self.remove_empty_attributes,
            remove_script_type_attributes: self.remove_script_type_attributes,
        }
    }
}
