//! Embedded static resources.
//!
//! - `amp` - literal AMP boilerplate, runtime URLs and analytics defaults
//! - `shim` - the browser-side preload promotion script

pub mod amp {
    /// `<style amp-boilerplate>` content.
    pub const BOILERPLATE_CSS: &str = "body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-moz-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-ms-animation:-amp-start 8s steps(1,end) 0s 1 normal both;animation:-amp-start 8s steps(1,end) 0s 1 normal both}@-webkit-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-moz-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-ms-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-o-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}";

    /// `<noscript><style amp-boilerplate>` content.
    pub const NOSCRIPT_BOILERPLATE_CSS: &str =
        "body{-webkit-animation:none;-moz-animation:none;-ms-animation:none;animation:none}";

    /// AMP runtime.
    pub const RUNTIME_URL: &str = "https://cdn.ampproject.org/v0.js";

    /// `amp-analytics` extension.
    pub const ANALYTICS_EXTENSION_URL: &str =
        "https://cdn.ampproject.org/v0/amp-analytics-0.1.js";

    pub const VIEWPORT: &str = "width=device-width,minimum-scale=1,initial-scale=1";

    /// Analytics account id, fixed at compile time through `AMPIFY_ANALYTICS_ACCOUNT`.
    pub const ANALYTICS_ACCOUNT: &str = match option_env!("AMPIFY_ANALYTICS_ACCOUNT") {
        Some(account) => account,
        None => "UA-XXXXX-Y",
    };

    pub const ANALYTICS_VENDOR: &str = "googleanalytics";

    /// Root marker attribute.
    pub const MARKER_ATTR: &str = "amp";
}

pub mod shim {
    /// Minified script promoting `<link rel="preload">` to stylesheets on load.
    pub const PRELOAD_JS: &str = include_str!(concat!(env!("OUT_DIR"), "/preload.min.js"));

    /// The script wrapped in a `<script>` tag, for pasting into a page.
    pub fn preload_tag() -> String {
        format!("<script>{PRELOAD_JS}</script>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boilerplate_covers_vendor_prefixes() {
        for prefix in ["-webkit-", "-moz-", "-ms-", "-o-"] {
            assert!(amp::BOILERPLATE_CSS.contains(&format!("@{prefix}keyframes -amp-start")));
        }
        assert!(amp::NOSCRIPT_BOILERPLATE_CSS.ends_with("animation:none}"));
    }

    #[test]
    fn test_preload_shim_promotes_to_stylesheet() {
        assert!(shim::PRELOAD_JS.contains("preload"));
        assert!(shim::PRELOAD_JS.contains("stylesheet"));
        assert!(shim::preload_tag().starts_with("<script>"));
    }
}
