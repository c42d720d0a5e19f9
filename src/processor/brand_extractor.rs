/// Sentinel brand value for titles matching no known brand.
pub const UNKNOWN_BRAND: &str = "不明";

/// Known consumer-electronics brands, in match-priority order. Matching is
/// a case-sensitive substring test against the brand names as written.
const BRANDS: &[&str] = &[
    "Apple",
    "Sony",
    "Samsung",
    "Bose",
    "Anker",
    "JBL",
    "Beats",
    "Sennheiser",
    "Audio-Technica",
    "Panasonic",
    "ASUS",
    "Dell",
    "HP",
    "Lenovo",
    "Microsoft",
    "Google",
    "Xiaomi",
    "Huawei",
    "Canon",
    "Nikon",
    "Fujifilm",
    "GoPro",
];

/// Total: falls back to [`UNKNOWN_BRAND`] when no brand name appears in
/// the title. First brand in list order wins.
pub fn extract_brand(title: &str) -> &'static str {
    BRANDS
        .iter()
        .find(|brand| title.contains(*brand))
        .copied()
        .unwrap_or(UNKNOWN_BRAND)
}
