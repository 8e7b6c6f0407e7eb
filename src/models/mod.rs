use serde::{Deserialize, Serialize};

/// Display title used when the catalog has no entry for an identifier
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Catalog metadata for a piece of content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentRecord {
    pub content_id: String,
    pub title: String,
}

/// One row of the positional recommender table.
///
/// The upstream producer emits these lists pre-ranked, so the order of
/// `recommendations` is meaningful and preserved as-is. The list always
/// holds exactly five entries; short source rows pad with empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalRow {
    pub content_id: String,
    pub recommendations: Vec<String>,
}

/// One row of the wide scored recommender table.
///
/// Every non-identifier column of the source names a candidate identifier;
/// `scores` keeps the source column order so equal scores rank in a stable,
/// reproducible order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub content_id: String,
    pub scores: Vec<(String, f64)>,
}

/// One row of the long pairwise recommender table
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseRow {
    pub content_id: String,
    pub recommended_content_id: String,
    pub score: f64,
}

/// A ranked recommendation with its display title resolved
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRecommendation {
    pub content_id: String,
    pub score: f64,
    pub title: String,
}
