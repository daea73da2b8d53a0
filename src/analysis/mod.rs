//! Text Analysis Module
//!
//! Everything the service knows about text itself lives here. The orchestrator only
//! sees the three capability traits, so each one can be swapped for a model-backed or
//! remote implementation without touching the request flow.
//!
//! ## Submodules
//! - **`tokenizer`**: Normalisation and stop-word filtering shared by the extractor.
//! - **`extractor`**: The `KeywordExtractor` capability and the built-in statistical ranker.
//! - **`definitions`**: The `DefinitionProvider` capability and the dictionary API client.
//! - **`filter`**: The `ContentClassifier` capability and the block-list filter.
//! - **`types`**: Keyword and result DTOs returned to clients.

pub mod definitions;
pub mod extractor;
pub mod filter;
pub mod tokenizer;
pub mod types;
