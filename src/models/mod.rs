pub mod category;
pub mod data_models;

pub use category::Category;
pub use data_models::*;
