pub mod brand_extractor;
pub mod category_classifier;
pub mod spec_extractor;

pub use brand_extractor::*;
pub use category_classifier::*;
pub use spec_extractor::*;
