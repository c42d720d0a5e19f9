use crate::models::Category;

/// Priority-ordered keyword table. Narrower categories come first because
/// the keyword sets overlap: a title naming both "smart glass" and "watch"
/// must land on smart glasses, not smartwatch. A rule fires when the
/// lower-cased title contains any of its keywords.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::SmartGlasses,
        &["スマートグラス", "スマートメガネ", "smart glass", "ar glass"],
    ),
    (
        Category::Smartwatch,
        &[
            "スマートウォッチ",
            "smartwatch",
            "apple watch",
            "fitbit",
            "garmin",
        ],
    ),
    (
        Category::WirelessEarphones,
        &[
            "ワイヤレスイヤホン",
            "イヤホン",
            "earphone",
            "airpods",
            "earbuds",
        ],
    ),
    (
        Category::Laptop,
        &[
            "ノートpc",
            "ノートパソコン",
            "laptop",
            "macbook",
            "thinkpad",
        ],
    ),
    (Category::Tablet, &["タブレット", "ipad", "tablet"]),
    (
        Category::Camera,
        &["カメラ", "デジカメ", "デジタルカメラ", "ミラーレス"],
    ),
    (
        Category::Smartphone,
        &[
            "スマートフォン",
            "スマホ",
            "iphone",
            "galaxy",
            "xperia",
        ],
    ),
];

/// Maps a free-text product title to a category. Total: unmatched titles
/// fall back to `Category::Gadget`, this never fails.
pub fn classify(title: &str) -> Category {
    let lower = title.to_lowercase();

    for (category, keywords) in RULES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *category;
        }
    }

    Category::Gadget
}
