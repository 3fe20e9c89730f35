pub mod storage;

/// Top-level content of a JSON configuration document
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

pub use storage::{JsonDocumentStore, parse_object, to_pretty_json};
