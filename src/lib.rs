//! Offline pipelines for a Contentful-backed gadget review site: import
//! Rakuten product listings, keep category assignments consistent, and
//! generate review articles through a local Ollama model.

pub mod config;
pub mod fetcher;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod storage;
