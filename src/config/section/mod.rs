//! Configuration section definitions.
//!
//! Each module corresponds to a section in `ampify.toml`:
//!
//! | Module      | TOML Section    | Purpose                              |
//! |-------------|-----------------|--------------------------------------|
//! | `build`     | `[build]`       | Source page, stylesheet, output path |
//! | `css`       | `[css]`         | Browser targets, minify, size budget |
//! | `analytics` | `[analytics]`   | Analytics account and vendor         |
//! | `minify`    | `[minify]`      | Output minifier rules                |

mod analytics;
mod build;
mod css;
mod minify;

pub use analytics::AnalyticsConfig;
pub use build::BuildSectionConfig;
pub use css::{CssConfig, DEFAULT_MAX_BYTES};
pub use minify::MinifyConfig;
