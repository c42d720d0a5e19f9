use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Closed product taxonomy. Every listing resolves to exactly one variant;
/// `Gadget` is the fallback bucket for titles nothing else matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    WirelessEarphones,
    Smartwatch,
    Laptop,
    Smartphone,
    Camera,
    Tablet,
    SmartGlasses,
    Gadget,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::WirelessEarphones,
        Category::Smartwatch,
        Category::Laptop,
        Category::Smartphone,
        Category::Camera,
        Category::Tablet,
        Category::SmartGlasses,
        Category::Gadget,
    ];

    /// Categories with a Rakuten genre id, i.e. the ones the import
    /// pipeline can search for directly.
    pub const IMPORTABLE: &'static [Category] = &[
        Category::WirelessEarphones,
        Category::Smartwatch,
        Category::Laptop,
        Category::Smartphone,
        Category::Camera,
        Category::Tablet,
    ];

    /// ASCII identifier, used in entry slugs and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::WirelessEarphones => "wireless-earphones",
            Category::Smartwatch => "smartwatch",
            Category::Laptop => "laptop",
            Category::Smartphone => "smartphone",
            Category::Camera => "camera",
            Category::Tablet => "tablet",
            Category::SmartGlasses => "smart-glasses",
            Category::Gadget => "gadget",
        }
    }

    /// Display label as stored in the CMS `category` field.
    pub fn label(&self) -> &'static str {
        match self {
            Category::WirelessEarphones => "ワイヤレスイヤホン",
            Category::Smartwatch => "スマートウォッチ",
            Category::Laptop => "ノートPC",
            Category::Smartphone => "スマートフォン",
            Category::Camera => "カメラ",
            Category::Tablet => "タブレット",
            Category::SmartGlasses => "スマートグラス",
            Category::Gadget => "ガジェット",
        }
    }

    /// Search keyword sent to the Rakuten API for this category.
    pub fn search_keyword(&self) -> &'static str {
        match self {
            Category::WirelessEarphones => "ワイヤレス イヤホン Bluetooth",
            Category::Smartwatch => "スマートウォッチ",
            Category::Laptop => "ノートパソコン",
            Category::Smartphone => "スマートフォン",
            Category::Camera => "デジタルカメラ",
            Category::Tablet => "タブレット",
            Category::SmartGlasses => "スマートグラス",
            Category::Gadget => "ガジェット",
        }
    }

    /// Rakuten Ichiba genre id, where one exists for the category.
    pub fn genre_id(&self) -> Option<&'static str> {
        match self {
            Category::WirelessEarphones => Some("216131"),
            Category::Smartwatch => Some("560298"),
            Category::Laptop => Some("100026"),
            Category::Smartphone => Some("110730"),
            Category::Camera => Some("110829"),
            Category::Tablet => Some("559921"),
            Category::SmartGlasses | Category::Gadget => None,
        }
    }

    /// Parses a CLI argument; accepts either the slug or the display label.
    pub fn from_arg(arg: &str) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == arg || c.label() == arg)
    }

    /// Parses a stored CMS label. Returns `None` for labels outside the
    /// taxonomy, which reconciliation treats as drift.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }

    pub fn random_importable() -> Category {
        *Category::IMPORTABLE
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Category::WirelessEarphones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg_accepts_slug_and_label() {
        assert_eq!(
            Category::from_arg("wireless-earphones"),
            Some(Category::WirelessEarphones)
        );
        assert_eq!(
            Category::from_arg("ワイヤレスイヤホン"),
            Some(Category::WirelessEarphones)
        );
        assert_eq!(Category::from_arg("ノートPC"), Some(Category::Laptop));
        assert_eq!(Category::from_arg("no-such-category"), None);
    }

    #[test]
    fn test_importable_categories_have_genre_ids() {
        for category in Category::IMPORTABLE {
            assert!(category.genre_id().is_some(), "{:?}", category);
        }
        assert_eq!(Category::SmartGlasses.genre_id(), None);
        assert_eq!(Category::Gadget.genre_id(), None);
    }

    #[test]
    fn test_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(*category));
        }
        assert_eq!(Category::from_label("家電"), None);
    }

    #[test]
    fn test_random_importable_stays_in_taxonomy() {
        for _ in 0..20 {
            let category = Category::random_importable();
            assert!(Category::IMPORTABLE.contains(&category));
        }
    }
}
