//! WLAN credential lookup and network mode derivation.

use serde::Serialize;

/// Network role the firmware boots into.
///
/// With complete credentials the firmware joins the existing network;
/// otherwise it opens its own access point so it stays reachable for
/// initial configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WlanMode {
    Connect,
    Ap,
}

impl WlanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WlanMode::Connect => "CONNECT",
            WlanMode::Ap => "AP",
        }
    }
}

/// WLAN credentials as found in the environment. Unset and empty are
/// treated alike: both fall back to access-point mode.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub ssid: Option<String>,
    pub psk: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment under the given
    /// variable names. Empty values are normalized to `None`.
    pub fn from_env(ssid_var: &str, psk_var: &str) -> Self {
        Self {
            ssid: read_non_empty(ssid_var),
            psk: read_non_empty(psk_var),
        }
    }

    /// `Connect` only when both SSID and PSK are present and non-empty.
    /// No validation of contents is performed.
    pub fn mode(&self) -> WlanMode {
        match (&self.ssid, &self.psk) {
            (Some(_), Some(_)) => WlanMode::Connect,
            _ => WlanMode::Ap,
        }
    }
}

fn read_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(ssid: Option<&str>, psk: Option<&str>) -> Credentials {
        Credentials {
            ssid: ssid.map(String::from),
            psk: psk.map(String::from),
        }
    }

    #[test]
    fn test_mode_connect_with_both_credentials() {
        assert_eq!(creds(Some("net"), Some("secret")).mode(), WlanMode::Connect);
    }

    #[test]
    fn test_mode_ap_when_either_credential_missing() {
        assert_eq!(creds(Some("net"), None).mode(), WlanMode::Ap);
        assert_eq!(creds(None, Some("secret")).mode(), WlanMode::Ap);
        assert_eq!(creds(None, None).mode(), WlanMode::Ap);
    }

    #[test]
    fn test_mode_strings() {
        assert_eq!(WlanMode::Connect.as_str(), "CONNECT");
        assert_eq!(WlanMode::Ap.as_str(), "AP");
    }
}
