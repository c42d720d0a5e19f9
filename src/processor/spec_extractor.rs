use anyhow::Result;
use regex::Regex;

use crate::models::SpecMap;

pub const SPEC_NOISE_CANCELLING: &str = "ノイズキャンセリング";
pub const SPEC_WATERPROOF: &str = "防水";
pub const SPEC_CONNECTIVITY: &str = "接続";
pub const SPEC_CONNECTION_METHOD: &str = "接続方式";

/// Detects spec attributes in product titles. The four rules are
/// independent; any subset may fire for one title. Marker matching is
/// case-sensitive, matching how listings actually spell ANC/IPX/Bluetooth.
pub struct SpecExtractor {
    ipx_pattern: Regex,
    bluetooth_pattern: Regex,
}

impl SpecExtractor {
    pub fn new() -> Result<Self> {
        Ok(SpecExtractor {
            ipx_pattern: Regex::new(r"IPX(\d)")?,
            bluetooth_pattern: Regex::new(r"Bluetooth\s*(\d\.\d)")?,
        })
    }

    /// Total: returns an empty map when nothing is detected.
    pub fn extract(&self, title: &str) -> SpecMap {
        let mut specs = SpecMap::new();

        if title.contains("ノイズキャンセリング") || title.contains("ANC") {
            specs.insert(SPEC_NOISE_CANCELLING.to_string(), "あり".to_string());
        }

        if title.contains("防水") || title.contains("IPX") {
            let value = self
                .ipx_pattern
                .captures(title)
                .map(|c| format!("IPX{}", &c[1]))
                .unwrap_or_else(|| "対応".to_string());
            specs.insert(SPEC_WATERPROOF.to_string(), value);
        }

        if title.contains("Bluetooth") {
            let value = self
                .bluetooth_pattern
                .captures(title)
                .map(|c| format!("Bluetooth {}", &c[1]))
                .unwrap_or_else(|| "Bluetooth".to_string());
            specs.insert(SPEC_CONNECTIVITY.to_string(), value);
        }

        if title.contains("ワイヤレス") || title.contains("Wireless") {
            specs.insert(
                SPEC_CONNECTION_METHOD.to_string(),
                "ワイヤレス".to_string(),
            );
        }

        specs
    }
}
