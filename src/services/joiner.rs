//! Join and ranking core for the recommendation tables.
//!
//! Every function here is pure: the loader hands in parsed tables once per
//! load event and the query layer reads the normalized results through the
//! `top_k_*` lookups. Unknown identifiers, malformed numeric cells and
//! short rows never raise; they degrade to empty results or placeholders
//! so a lookup can always be answered.

use std::collections::{BTreeSet, HashMap};

use crate::models::{PairwiseRow, PositionalRow, RankedRecommendation, ScoredRow, UNKNOWN_TITLE};
use crate::services::tables::KeyedTable;

/// Header naming the identifier column in every header-keyed table
pub const ID_COLUMN: &str = "contentId";

/// Header naming the display-title column in the catalog table
pub const TITLE_COLUMN: &str = "title";

/// Header naming the recommended-identifier column in the pairwise table
pub const RECOMMENDED_COLUMN: &str = "recommendedContentId";

/// Header naming the score column in the pairwise table
pub const SCORE_COLUMN: &str = "score";

/// Number of recommendation cells carried by each positional row
pub const POSITIONAL_LIST_LEN: usize = 5;

// The positional format reserves column 0 for the identifier and column 1
// for the producer's own bookkeeping; recommendations start at column 2.
const POSITIONAL_LIST_START: usize = 2;

fn cell(row: &[String], index: usize) -> String {
    row.get(index)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Normalizes the positional recommender table.
///
/// The first input row is a header and is discarded. Each remaining row
/// yields the identifier from column 0 and exactly [`POSITIONAL_LIST_LEN`]
/// recommendations from the columns after the bookkeeping column. Short
/// rows pad with empty strings instead of erroring.
pub fn normalize_positional(rows: &[Vec<String>]) -> Vec<PositionalRow> {
    rows.iter()
        .skip(1)
        .map(|row| PositionalRow {
            content_id: cell(row, 0),
            recommendations: (POSITIONAL_LIST_START..POSITIONAL_LIST_START + POSITIONAL_LIST_LEN)
                .map(|index| cell(row, index))
                .collect(),
        })
        .collect()
}

/// Normalizes the wide scored recommender table.
///
/// Every column other than the identifier column names a candidate; its
/// cell is kept only when it parses as a finite number. Candidates keep the
/// source column order.
pub fn normalize_scored(table: &KeyedTable) -> Vec<ScoredRow> {
    let Some(id_index) = table.column(ID_COLUMN) else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .map(|row| {
            let mut scores = Vec::new();
            for (index, header) in table.headers.iter().enumerate() {
                if index == id_index {
                    continue;
                }
                if let Some(score) = row.get(index).and_then(|v| v.trim().parse::<f64>().ok()) {
                    if score.is_finite() {
                        scores.push((header.trim().to_string(), score));
                    }
                }
            }
            ScoredRow {
                content_id: cell(row, id_index),
                scores,
            }
        })
        .collect()
}

/// Normalizes the long pairwise recommender table.
///
/// Rows whose score cell does not parse as a finite number are dropped,
/// mirroring the dropped-cell policy of the wide table.
pub fn normalize_pairwise(table: &KeyedTable) -> Vec<PairwiseRow> {
    let (Some(id_index), Some(rec_index), Some(score_index)) = (
        table.column(ID_COLUMN),
        table.column(RECOMMENDED_COLUMN),
        table.column(SCORE_COLUMN),
    ) else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .filter_map(|row| {
            let score = row.get(score_index)?.trim().parse::<f64>().ok()?;
            if !score.is_finite() {
                return None;
            }
            Some(PairwiseRow {
                content_id: cell(row, id_index),
                recommended_content_id: cell(row, rec_index),
                score,
            })
        })
        .collect()
}

/// Builds the identifier-to-title index from the catalog table.
///
/// Rows with an empty identifier or an empty title are skipped; lookups
/// for skipped entries fall back to [`UNKNOWN_TITLE`].
pub fn normalize_catalog(table: &KeyedTable) -> HashMap<String, String> {
    let (Some(id_index), Some(title_index)) =
        (table.column(ID_COLUMN), table.column(TITLE_COLUMN))
    else {
        return HashMap::new();
    };

    let mut catalog = HashMap::new();
    for row in &table.rows {
        let content_id = cell(row, id_index);
        let title = cell(row, title_index);
        if !content_id.is_empty() && !title.is_empty() {
            catalog.insert(content_id, title);
        }
    }
    catalog
}

/// Merges identifier values from every supplied source into a
/// deduplicated, lexicographically sorted list.
pub fn merge_identifier_space<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = ids.into_iter().collect();
    unique.into_iter().map(String::from).collect()
}

/// Top-K lookup against the positional source.
///
/// The producer pre-ranks these lists, so the source order is preserved and
/// the list is only truncated to `k`. Unknown identifiers yield an empty
/// list.
pub fn top_k_positional(rows: &[PositionalRow], id: &str, k: usize) -> Vec<String> {
    rows.iter()
        .find(|row| row.content_id == id)
        .map(|row| row.recommendations.iter().take(k).cloned().collect())
        .unwrap_or_default()
}

/// Top-K lookup against the wide scored source.
///
/// Candidates sort by score descending; equal scores keep their source
/// column order. The queried identifier is trimmed before comparison.
pub fn top_k_scored(rows: &[ScoredRow], id: &str, k: usize) -> Vec<String> {
    let id = id.trim();
    let Some(row) = rows.iter().find(|row| row.content_id == id) else {
        return Vec::new();
    };

    let mut candidates: Vec<&(String, f64)> = row.scores.iter().collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .take(k)
        .map(|(candidate, _)| candidate.clone())
        .collect()
}

/// Top-K lookup against the pairwise source, with display titles resolved
/// from the catalog.
///
/// Matching rows sort by score descending; equal scores keep their source
/// row order. Identifiers without a catalog entry are titled
/// [`UNKNOWN_TITLE`].
pub fn top_k_pairwise(
    rows: &[PairwiseRow],
    catalog: &HashMap<String, String>,
    id: &str,
    k: usize,
) -> Vec<RankedRecommendation> {
    let mut matches: Vec<&PairwiseRow> =
        rows.iter().filter(|row| row.content_id == id).collect();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
        .into_iter()
        .take(k)
        .map(|row| RankedRecommendation {
            content_id: row.recommended_content_id.clone(),
            score: row.score,
            title: catalog
                .get(&row.recommended_content_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        })
        .collect()
}
