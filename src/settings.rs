//! Application settings

use std::env;
use std::path::PathBuf;

use tweetrag_core::{Error, Result, RetrievalBreadth, SimilarityMetric};

/// Settings for the command-line front end. Provider settings live in `OpenAiConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub project_name: String,
    pub upload_dir: PathBuf,
    pub top_k: Option<usize>,
    pub metric: SimilarityMetric,
}

impl Settings {
    /// Create settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let top_k = match lookup("RETRIEVAL_TOP_K") {
            Some(raw) => Some(parse_top_k(&raw)?),
            None => None,
        };
        let metric = match lookup("SIMILARITY_METRIC") {
            Some(raw) => raw.parse::<SimilarityMetric>()?,
            None => SimilarityMetric::default(),
        };

        Ok(Self {
            project_name: lookup("PROJECT_NAME").unwrap_or_else(|| "tweetrag".to_string()),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            top_k,
            metric,
        })
    }

    /// Apply command-line overrides on top of the environment
    pub fn with_overrides(
        mut self,
        upload_dir: Option<PathBuf>,
        top_k: Option<usize>,
        metric: Option<SimilarityMetric>,
    ) -> Self {
        if let Some(dir) = upload_dir {
            self.upload_dir = dir;
        }
        if top_k.is_some() {
            self.top_k = top_k;
        }
        if let Some(metric) = metric {
            self.metric = metric;
        }
        self
    }

    pub fn breadth(&self) -> RetrievalBreadth {
        match self.top_k {
            Some(k) => RetrievalBreadth::TopK(k),
            None => RetrievalBreadth::FullCorpus,
        }
    }
}

fn parse_top_k(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(k) if k > 0 => Ok(k),
        _ => Err(Error::Configuration(format!(
            "RETRIEVAL_TOP_K must be a positive integer, got '{}'",
            raw
        ))),
    }
}
