//! Trigram language model: table construction, persistence and queries.
//!
//! - Frequency tables per order (`FrequencyTable`) and their metrics
//! - The table builder (`builder::build`)
//! - The persisted model (`NGramTables`)
//! - The query engine (`QueryEngine`) scoring and extending sentences

/// Sliding-window construction of the unigram, bigram and trigram tables.
pub mod builder;

/// Output of a greedy continuation search and its text rendering.
pub mod continuation;

/// Prefix lookup used by the argmax searches.
///
/// Not exposed.
mod index;

/// Per-order and corpus-level occurrence statistics.
pub mod metrics;

/// Immutable argmax candidate.
pub mod node;

/// Scoring, backoff and continuation over loaded tables.
pub mod predictor;

/// Frequency table for a single n-gram order.
pub mod table;

/// The three tables of a model, with save / load.
pub mod tables;

pub use builder::{build, build_from_file};
pub use continuation::{Continuation, CONTINUATION_LENGTH, NOT_RECOGNIZED};
pub use metrics::{CorpusMetrics, OrderMetrics};
pub use node::Node;
pub use predictor::{tokenize_query, QueryEngine};
pub use table::FrequencyTable;
pub use tables::NGramTables;
