//! Word-level trigram language model.
//!
//! This crate builds unigram, bigram and trigram frequency tables from a
//! token stream and answers two kinds of queries on them:
//! - score a word sequence (bigram model with add-one smoothing, or trigram
//!   model backing off to bigrams)
//! - greedily predict the next words of a partial sentence
//!
//! Tables are persisted with `postcard` and loaded read-only by the query
//! engine.

/// Model data, builder and query engine.
pub mod model;

/// On-disk layout of a persisted model.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (line files, folder helpers).
///
/// Not exposed
pub(crate) mod io;

pub use config::DataLayout;
pub use error::{NgramError, Result};
