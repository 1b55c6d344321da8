//! Client platform detection and spoofed device profiles.
//!
//! Some hosts only answer their AJAX endpoints for mobile browsers, and some
//! servers are known broken on particular client platforms. Both concerns
//! are modelled here so scrapers never read global environment state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform family of the client that will play the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientPlatform {
    #[default]
    Desktop,
    Ios,
    Android,
}

impl ClientPlatform {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientPlatform::Desktop => "desktop",
            ClientPlatform::Ios => "ios",
            ClientPlatform::Android => "android",
        }
    }
}

impl fmt::Display for ClientPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" | "web" => Ok(ClientPlatform::Desktop),
            "ios" | "iphone" | "ipad" => Ok(ClientPlatform::Ios),
            "android" => Ok(ClientPlatform::Android),
            other => Err(format!(
                "unknown platform '{other}' (expected desktop, ios or android)"
            )),
        }
    }
}

/// Browser identity presented to a remote site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub user_agent: String,
    /// `Viewport-Width` client hint; mobile sites gate responses on it.
    pub viewport_width: Option<u32>,
}

impl DeviceProfile {
    /// Safari on iOS 18 (iPhone).
    #[must_use]
    pub fn iphone_safari() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 18_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0 Mobile/15E148 Safari/604.1".to_string(),
            viewport_width: Some(375),
        }
    }

    /// Header pairs identifying this device.
    #[must_use]
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let mut headers = vec![("User-Agent".to_string(), self.user_agent.clone())];
        if let Some(width) = self.viewport_width {
            headers.push(("Viewport-Width".to_string(), width.to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests;
