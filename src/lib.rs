//! Serves precomputed content recommendations from static CSV tables.
//!
//! Up to three differently-shaped recommender tables (a positional
//! collaborative-filtering export, a wide content-filtering score matrix,
//! and a long wide-and-deep pairwise list) plus an optional content
//! catalog are loaded into an immutable snapshot, joined on a shared
//! content identifier, and queried over a small HTTP API: the merged
//! identifier list and top-K lookups per source.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
