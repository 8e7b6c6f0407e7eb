use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ContentRecord, PairwiseRow, PositionalRow, RankedRecommendation, ScoredRow, UNKNOWN_TITLE};
use crate::services::joiner;
use crate::services::tables::KeyedTable;

/// Raw tables collected for one load event, before normalization.
///
/// A `None` source was disabled by configuration.
#[derive(Debug, Default)]
pub struct SourceTables {
    pub catalog: Option<KeyedTable>,
    pub positional: Option<Vec<Vec<String>>>,
    pub scored: Option<KeyedTable>,
    pub pairwise: Option<KeyedTable>,
}

/// Per-source row counts, reported by the status endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SourceCounts {
    pub catalog: usize,
    pub collaborative: usize,
    pub content_filtering: usize,
    pub wide_deep: usize,
    pub content_ids: usize,
}

/// Immutable result of one load event.
///
/// Queries only ever read from a snapshot; a reload builds a fresh one and
/// swaps it in, so nothing here mutates after construction.
#[derive(Debug)]
pub struct Snapshot {
    catalog: HashMap<String, String>,
    positional: Vec<PositionalRow>,
    scored: Vec<ScoredRow>,
    pairwise: Vec<PairwiseRow>,
    content_ids: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Normalizes the collected tables and merges the identifier space.
    ///
    /// The identifier universe spans the recommender sources; the catalog
    /// only contributes display titles.
    pub fn build(tables: SourceTables) -> Self {
        let catalog = tables
            .catalog
            .map(|table| joiner::normalize_catalog(&table))
            .unwrap_or_default();
        let positional = tables
            .positional
            .map(|rows| joiner::normalize_positional(&rows))
            .unwrap_or_default();
        let scored = tables
            .scored
            .map(|table| joiner::normalize_scored(&table))
            .unwrap_or_default();
        let pairwise = tables
            .pairwise
            .map(|table| joiner::normalize_pairwise(&table))
            .unwrap_or_default();

        let content_ids = joiner::merge_identifier_space(
            positional
                .iter()
                .map(|row| row.content_id.as_str())
                .chain(scored.iter().map(|row| row.content_id.as_str()))
                .chain(pairwise.iter().map(|row| row.content_id.as_str())),
        );

        Self {
            catalog,
            positional,
            scored,
            pairwise,
            content_ids,
            loaded_at: Utc::now(),
        }
    }

    /// Merged, sorted identifier universe across the recommender sources
    pub fn content_ids(&self) -> &[String] {
        &self.content_ids
    }

    /// Display title for an identifier, [`UNKNOWN_TITLE`] when uncataloged
    pub fn title_for(&self, id: &str) -> &str {
        self.catalog
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TITLE)
    }

    /// Merged identifiers paired with their catalog titles
    pub fn content_records(&self) -> Vec<ContentRecord> {
        self.content_ids
            .iter()
            .map(|id| ContentRecord {
                content_id: id.clone(),
                title: self.title_for(id).to_string(),
            })
            .collect()
    }

    pub fn top_k_positional(&self, id: &str, k: usize) -> Vec<String> {
        joiner::top_k_positional(&self.positional, id, k)
    }

    pub fn top_k_scored(&self, id: &str, k: usize) -> Vec<String> {
        joiner::top_k_scored(&self.scored, id, k)
    }

    pub fn top_k_pairwise(&self, id: &str, k: usize) -> Vec<RankedRecommendation> {
        joiner::top_k_pairwise(&self.pairwise, &self.catalog, id, k)
    }

    /// When this snapshot's load event ran
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn counts(&self) -> SourceCounts {
        SourceCounts {
            catalog: self.catalog.len(),
            collaborative: self.positional.len(),
            content_filtering: self.scored.len(),
            wide_deep: self.pairwise.len(),
            content_ids: self.content_ids.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tables::parse_keyed;

    fn sample_tables() -> SourceTables {
        let positional = vec![
            vec!["contentId".into(), "score".into(), "r1".into()],
            vec!["b".into(), "0.9".into(), "x1".into(), "x2".into()],
        ];
        let scored = parse_keyed("contentId,x,y\na,0.4,0.6\n").unwrap();
        let pairwise =
            parse_keyed("contentId,recommendedContentId,score\nc,x,0.7\n").unwrap();
        let catalog = parse_keyed("contentId,title\na,Alpha\nx,Crossing\n").unwrap();

        SourceTables {
            catalog: Some(catalog),
            positional: Some(positional),
            scored: Some(scored),
            pairwise: Some(pairwise),
        }
    }

    #[test]
    fn test_build_merges_ids_from_recommender_sources_only() {
        let snapshot = Snapshot::build(sample_tables());
        // "x" appears only in the catalog, so it is not selectable.
        assert_eq!(snapshot.content_ids(), ["a", "b", "c"]);
    }

    #[test]
    fn test_title_lookup_defaults_to_unknown() {
        let snapshot = Snapshot::build(sample_tables());
        assert_eq!(snapshot.title_for("a"), "Alpha");
        assert_eq!(snapshot.title_for("b"), UNKNOWN_TITLE);
    }

    #[test]
    fn test_content_records_pair_ids_with_titles() {
        let snapshot = Snapshot::build(sample_tables());
        let records = snapshot.content_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].content_id, "a");
        assert_eq!(records[0].title, "Alpha");
        assert_eq!(records[1].title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_disabled_sources_yield_an_empty_snapshot() {
        let snapshot = Snapshot::build(SourceTables::default());
        assert!(snapshot.content_ids().is_empty());
        assert!(snapshot.top_k_positional("a", 5).is_empty());
        assert!(snapshot.top_k_scored("a", 5).is_empty());
        assert!(snapshot.top_k_pairwise("a", 5).is_empty());
    }

    #[test]
    fn test_counts_reflect_each_source() {
        let snapshot = Snapshot::build(sample_tables());
        let counts = snapshot.counts();
        assert_eq!(counts.catalog, 2);
        assert_eq!(counts.collaborative, 1);
        assert_eq!(counts.content_filtering, 1);
        assert_eq!(counts.wide_deep, 1);
        assert_eq!(counts.content_ids, 3);
    }
}
