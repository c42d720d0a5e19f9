pub mod contentful;

pub use contentful::{ContentfulStore, DeliveryClient, DeliveryItem, PRODUCT_CONTENT_TYPE};
