pub mod analyzer;
pub mod api;
pub mod config;
pub mod corpus;
pub mod indexer;
pub mod query_engine;
pub mod render;
