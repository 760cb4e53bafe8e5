pub mod extract;
pub mod types;

pub use extract::{extract_json_payload, parse_concepts};
pub use types::{rank_concepts, top_concepts, ProductConcept};
