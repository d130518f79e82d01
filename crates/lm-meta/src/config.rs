//! Decoder configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::batch::BatchPolicy;
use crate::error::{MetaError, MetaResult};

/// How batches of affected nodes are decoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// What a batch does when one fragment fails.
    pub policy: BatchPolicy,
    /// Worker threads for batch decoding. `0` and `1` both mean sequential.
    pub workers: usize,
    /// Batches shorter than this are decoded sequentially regardless of
    /// `workers`.
    pub min_parallel_batch: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            policy: BatchPolicy::FailFast,
            workers: 1,
            min_parallel_batch: 64,
        }
    }
}

impl DecoderConfig {
    /// A skip-invalid configuration, for tooling that prefers partial output.
    pub fn lenient() -> Self {
        Self {
            policy: BatchPolicy::SkipInvalid,
            ..Default::default()
        }
    }

    /// Parse a TOML document. Missing keys take their default.
    pub fn from_toml_str(source: &str) -> MetaResult<Self> {
        toml::from_str(source).map_err(|e| MetaError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> MetaResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| MetaError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Whether a batch of `len` fragments should be split across workers.
    pub fn runs_parallel(&self, len: usize) -> bool {
        self.workers > 1 && len >= self.min_parallel_batch.max(2)
    }
}
