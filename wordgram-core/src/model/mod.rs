//! Top-level module for the n-gram language model.
//!
//! This crate provides a word-level maximum-likelihood n-gram model, including:
//! - Count tables for n-grams and histories (`CountTables`)
//! - Conditional probability estimation (`ProbabilityTable`)
//! - Token sequence helpers (`sequence`)
//! - A high-level model interface (`LanguageModel`)

/// High-level interface owning the vocabulary, the probability table
/// and the seeded random stream.
///
/// Exposes corpus loading, next-word sampling and sentence completion.
pub mod language_model;

/// N-gram and history count tables built from a tokenized corpus.
///
/// Handles the sliding-window scan over every order from 2 up to the
/// configured maximum, plus vocabulary collection.
pub mod counts;

/// Maximum-likelihood conditional probabilities derived from the
/// count tables. Sparse: only non-zero entries are stored.
pub mod probability;

/// Token sequence helpers (joining, splitting, history extraction).
///
/// This module is not exposed publicly.
mod sequence;
