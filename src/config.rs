use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the source CSV tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Catalog table file name (set empty to run without a catalog)
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    /// Collaborative-filtering table file name (positional format)
    #[serde(default = "default_collaborative_file")]
    pub collaborative_file: String,

    /// Content-filtering score table file name (wide format)
    #[serde(default = "default_content_scores_file")]
    pub content_scores_file: String,

    /// Wide-and-deep table file name (long pairwise format)
    #[serde(default = "default_wide_deep_file")]
    pub wide_deep_file: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Result count used when a query does not pass `k`
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_catalog_file() -> String {
    "catalog.csv".to_string()
}

fn default_collaborative_file() -> String {
    "colab_recommender.csv".to_string()
}

fn default_content_scores_file() -> String {
    "content_filtering_results.csv".to_string()
}

fn default_wide_deep_file() -> String {
    "wide_deep_results.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_k() -> usize {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Resolved path of the catalog table, `None` when disabled
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.source_path(&self.catalog_file)
    }

    /// Resolved path of the collaborative-filtering table, `None` when disabled
    pub fn collaborative_path(&self) -> Option<PathBuf> {
        self.source_path(&self.collaborative_file)
    }

    /// Resolved path of the content-filtering score table, `None` when disabled
    pub fn content_scores_path(&self) -> Option<PathBuf> {
        self.source_path(&self.content_scores_file)
    }

    /// Resolved path of the wide-and-deep table, `None` when disabled
    pub fn wide_deep_path(&self) -> Option<PathBuf> {
        self.source_path(&self.wide_deep_file)
    }

    fn source_path(&self, file: &str) -> Option<PathBuf> {
        let file = file.trim();
        if file.is_empty() {
            None
        } else {
            Some(self.data_dir.join(file))
        }
    }
}
