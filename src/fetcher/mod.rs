pub mod rakuten;

pub use rakuten::{RakutenFetcher, SORT_REVIEW_AVERAGE, SORT_REVIEW_COUNT, SearchParams};
