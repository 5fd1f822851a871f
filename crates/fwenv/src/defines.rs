//! Preprocessor definition assembly and rendering.
//!
//! The definition set is the sole output of the tool: a flat, ordered list of
//! name/value pairs handed to the build orchestrator. Rendering supports:
//! - `cflags`: `-DKEY=value` tokens for C/C++ compiler command lines
//! - `cargo`: `cargo::rustc-env=` directives for Rust build scripts
//! - `json`: a structured object for orchestrators that parse output

use serde::Serialize;

/// How a value is emitted into generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Emitted verbatim (`-DWLAN_MODE=CONNECT`).
    Bare,
    /// Wrapped in escaped double quotes so the preprocessor sees a C string
    /// literal (`-DFIRMWARE_VERSION=\"v1.2.3\"`).
    Quoted,
}

/// A single preprocessor definition.
#[derive(Debug, Clone, Serialize)]
pub struct Define {
    pub name: String,
    /// `None` renders as a flag-style definition (`-DKEY`) where the format
    /// supports it.
    pub value: Option<String>,
    pub quoting: Quoting,
}

/// Ordered collection of definitions for one build invocation.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct DefineSet {
    defines: Vec<Define>,
}

impl DefineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare definition. `None` values become flag-style defines.
    pub fn push_bare(&mut self, name: impl Into<String>, value: Option<String>) {
        self.defines.push(Define {
            name: name.into(),
            value,
            quoting: Quoting::Bare,
        });
    }

    /// Append a quoted definition. Missing upstream values are emitted as an
    /// empty string literal, never dropped.
    pub fn push_quoted(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.defines.push(Define {
            name: name.into(),
            value: Some(value.into()),
            quoting: Quoting::Quoted,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Define> {
        self.defines.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Define> {
        self.defines.iter().find(|d| d.name == name)
    }

    /// Render as compiler flags, one token per line.
    ///
    /// Quoted values carry backslash-escaped double quotes so they survive a
    /// shell word-split into the compiler argv.
    pub fn render_cflags(&self) -> String {
        let mut out = String::new();
        for define in &self.defines {
            match (&define.value, define.quoting) {
                (Some(value), Quoting::Bare) => {
                    out.push_str(&format!("-D{}={}\n", define.name, value));
                }
                (Some(value), Quoting::Quoted) => {
                    out.push_str(&format!(
                        "-D{}=\\\"{}\\\"\n",
                        define.name,
                        escape_c_string(value)
                    ));
                }
                (None, _) => {
                    out.push_str(&format!("-D{}\n", define.name));
                }
            }
        }
        out
    }

    /// Render as `cargo::rustc-env` directives for a wrapping build script.
    ///
    /// Values reach the firmware through `env!`/`option_env!`, which already
    /// yield string literals, so the quoting discipline does not apply here.
    /// Valueless defines are skipped; `option_env!` reports their absence.
    pub fn render_cargo(&self) -> String {
        let mut out = String::new();
        for define in &self.defines {
            if let Some(value) = &define.value {
                out.push_str(&format!("cargo::rustc-env={}={}\n", define.name, value));
            }
        }
        out
    }

    /// Render as a JSON object mapping names to values (`null` when absent).
    pub fn render_json(&self) -> anyhow::Result<String> {
        let mut map = serde_json::Map::new();
        for define in &self.defines {
            let value = match &define.value {
                Some(v) => serde_json::Value::String(v.clone()),
                None => serde_json::Value::Null,
            };
            map.insert(define.name.clone(), value);
        }
        Ok(serde_json::to_string_pretty(&map)?)
    }
}

/// Escape a value for embedding inside a C string literal.
fn escape_c_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cflags_bare_and_quoted() {
        let mut set = DefineSet::new();
        set.push_bare("WLAN_MODE", Some("CONNECT".to_string()));
        set.push_quoted("FIRMWARE_VERSION", "v1.2.3");

        let rendered = set.render_cflags();
        assert!(rendered.contains("-DWLAN_MODE=CONNECT"));
        assert!(rendered.contains("-DFIRMWARE_VERSION=\\\"v1.2.3\\\""));
    }

    #[test]
    fn test_cflags_valueless_define_is_flag_style() {
        let mut set = DefineSet::new();
        set.push_bare("WLAN_SSID", None);
        assert_eq!(set.render_cflags(), "-DWLAN_SSID\n");
    }

    #[test]
    fn test_cflags_empty_quoted_value_stays_quoted() {
        let mut set = DefineSet::new();
        set.push_quoted("FIRMWARE_VERSION", "");
        assert_eq!(set.render_cflags(), "-DFIRMWARE_VERSION=\\\"\\\"\n");
    }

    #[test]
    fn test_quoted_value_escapes_embedded_quotes() {
        let mut set = DefineSet::new();
        set.push_quoted("FIRMWARE_VERSION", "v1.0-\"beta\"");
        let rendered = set.render_cflags();
        assert!(rendered.contains("\\\"v1.0-\\\"beta\\\"\\\""));
    }

    #[test]
    fn test_cargo_render_skips_valueless_defines() {
        let mut set = DefineSet::new();
        set.push_bare("WLAN_SSID", None);
        set.push_bare("WLAN_MODE", Some("AP".to_string()));

        let rendered = set.render_cargo();
        assert!(!rendered.contains("WLAN_SSID"));
        assert_eq!(rendered, "cargo::rustc-env=WLAN_MODE=AP\n");
    }

    #[test]
    fn test_json_render_preserves_insertion_order() {
        let mut set = DefineSet::new();
        set.push_bare("WLAN_SSID", Some("mynet".to_string()));
        set.push_bare("WLAN_PSK", None);
        set.push_bare("WLAN_MODE", Some("CONNECT".to_string()));

        let json = set.render_json().unwrap();
        let ssid_pos = json.find("WLAN_SSID").unwrap();
        let psk_pos = json.find("WLAN_PSK").unwrap();
        let mode_pos = json.find("WLAN_MODE").unwrap();
        assert!(ssid_pos < psk_pos && psk_pos < mode_pos);
        assert!(json.contains("\"WLAN_PSK\": null"));
    }

    #[test]
    fn test_get_finds_define_by_name() {
        let mut set = DefineSet::new();
        set.push_bare("WLAN_MODE", Some("AP".to_string()));
        assert!(set.get("WLAN_MODE").is_some());
        assert!(set.get("MISSING").is_none());
    }
}
