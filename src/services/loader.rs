use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::joiner::{ID_COLUMN, RECOMMENDED_COLUMN, SCORE_COLUMN, TITLE_COLUMN};
use crate::services::snapshot::{Snapshot, SourceTables};
use crate::services::tables::{self, KeyedTable};

/// Runs one load event.
///
/// Every configured table is read and parsed concurrently; the identifier
/// space can only be merged once all of them are in, so the join is a
/// barrier. A source that is configured but unreadable, unparseable, or
/// missing a required column fails the whole load; disabled sources are
/// skipped.
pub async fn load_snapshot(config: &Config) -> AppResult<Snapshot> {
    let (catalog, positional, scored, pairwise) = tokio::try_join!(
        read_keyed(config.catalog_path(), "catalog", &[ID_COLUMN, TITLE_COLUMN]),
        read_positional(config.collaborative_path()),
        read_keyed(config.content_scores_path(), "content_filtering", &[ID_COLUMN]),
        read_keyed(
            config.wide_deep_path(),
            "wide_deep",
            &[ID_COLUMN, RECOMMENDED_COLUMN, SCORE_COLUMN],
        ),
    )?;

    let snapshot = Snapshot::build(SourceTables {
        catalog,
        positional,
        scored,
        pairwise,
    });

    let counts = snapshot.counts();
    tracing::info!(
        catalog = counts.catalog,
        collaborative = counts.collaborative,
        content_filtering = counts.content_filtering,
        wide_deep = counts.wide_deep,
        content_ids = counts.content_ids,
        "Snapshot loaded"
    );

    Ok(snapshot)
}

async fn read_text(path: &Path) -> AppResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::TableRead {
            path: path.to_path_buf(),
            source,
        })
}

async fn read_positional(path: Option<PathBuf>) -> AppResult<Option<Vec<Vec<String>>>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = read_text(&path).await?;
    let rows =
        tables::parse_positional(&text).map_err(|source| AppError::TableParse { path, source })?;
    Ok(Some(rows))
}

async fn read_keyed(
    path: Option<PathBuf>,
    table_name: &str,
    required: &[&str],
) -> AppResult<Option<KeyedTable>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let text = read_text(&path).await?;
    let table =
        tables::parse_keyed(&text).map_err(|source| AppError::TableParse { path, source })?;
    tables::ensure_columns(&table, required, table_name)?;
    Ok(Some(table))
}
