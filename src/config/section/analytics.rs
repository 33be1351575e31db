//! `[analytics]` section.
//!
//! ```toml
//! [analytics]
//! account = "UA-12345678-1"
//! vendor = "googleanalytics"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::embed::amp::{ANALYTICS_ACCOUNT, ANALYTICS_VENDOR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Tracking account id. Defaults to the id compiled into the binary.
    pub account: String,
    /// `type` of the `<amp-analytics>` element.
    pub vendor: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            account: ANALYTICS_ACCOUNT.into(),
            vendor: ANALYTICS_VENDOR.into(),
        }
    }
}

impl AnalyticsConfig {
    const ACCOUNT: FieldPath = FieldPath::new("analytics.account");
    const VENDOR: FieldPath = FieldPath::new("analytics.vendor");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.account.trim().is_empty() {
            diag.error(Self::ACCOUNT, "account must not be empty");
        }
        if self.vendor.trim().is_empty() {
            diag.error(Self::VENDOR, "vendor must not be empty");
        }
    }
}
