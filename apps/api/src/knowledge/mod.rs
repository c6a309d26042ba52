// Knowledge core: static data models, lenient loading, trigger scoring, snippet retrieval.
// Scoring and retrieval are pure functions with no I/O; the loader runs once at startup.

pub mod loader;
pub mod models;
pub mod normalize;
pub mod retrieval;
pub mod scoring;

pub use models::{KnowledgeBase, KnowledgeSnippet, MatchResult, ServiceRecord};
pub use retrieval::retrieve_snippets;
pub use scoring::score_triggers;
