//! Asset compilation for the generated page.
//!
//! - `css`: stylesheet source -> inlined custom CSS (lightningcss)
//! - `minify`: rendered tree -> final minified markup (minify-html)

pub mod css;
pub mod minify;

pub use css::{LightningCss, StyleCompiler, StyleError, StyleResolver, StyleSource};
pub use minify::{MinifyError, serialize};
