//! Word-level n-gram language modelling library.
//!
//! This crate provides a maximum-likelihood n-gram model including:
//! - N-gram and history count tables for all orders up to a maximum
//! - Conditional probability estimation (counts ratios, no smoothing)
//! - Reproducible next-word sampling from a seeded random stream
//! - Sentence completion until an end or failure token is drawn
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core model tables, sampling and completion logic.
///
/// This module exposes the high-level model interface while keeping
/// internal table representations private.
pub mod model;

/// I/O utilities (file loading, output sinks, path helpers).
///
/// Not exposed
pub(crate) mod io;
