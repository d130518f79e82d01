//! Decoding a whole `AffectedNodes` array.
//!
//! Fragments are independent, so a batch may be split across worker
//! threads. Results always come back in input order. Whether one bad
//! fragment sinks the batch is the caller's [`BatchPolicy`].

use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::DecoderConfig;
use crate::decoder::MetadataDecoder;
use crate::error::{MetaError, MetaResult};
use crate::node::AffectedNode;

/// What to do when a fragment in a batch fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchPolicy {
    /// Abort on the first failing position.
    #[default]
    FailFast,
    /// Drop failing fragments and report them alongside the decoded nodes.
    SkipInvalid,
}

/// A fragment dropped under [`BatchPolicy::SkipInvalid`].
#[derive(Debug)]
pub struct BatchFailure {
    /// Index of the fragment in the input array.
    pub position: usize,
    pub error: MetaError,
}

/// Decoded nodes, in input order, plus any skipped fragments.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub nodes: Vec<AffectedNode>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl MetadataDecoder {
    /// Decode every element independently, returning one result per
    /// element in input order.
    pub fn decode_nodes(&self, elements: &[Value]) -> Vec<MetaResult<AffectedNode>> {
        elements.iter().map(|e| self.decode_element(e)).collect()
    }

    /// [`decode_nodes`](Self::decode_nodes) spread over up to `workers`
    /// scoped threads, each taking one contiguous chunk.
    pub fn decode_nodes_parallel(
        &self,
        elements: &[Value],
        workers: usize,
    ) -> Vec<MetaResult<AffectedNode>> {
        if workers <= 1 || elements.len() < 2 {
            return self.decode_nodes(elements);
        }

        let chunk_size = elements.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = elements
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.decode_nodes(chunk)))
                .collect();

            let mut results = Vec::with_capacity(elements.len());
            for handle in handles {
                match handle.join() {
                    Ok(chunk) => results.extend(chunk),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            results
        })
    }

    /// Decode a batch sequentially under `policy`.
    ///
    /// With [`BatchPolicy::FailFast`] the first failure is returned wrapped
    /// in [`MetaError::AtPosition`].
    pub fn decode_batch(
        &self,
        elements: &[Value],
        policy: BatchPolicy,
    ) -> MetaResult<BatchOutcome> {
        collect(self.decode_nodes(elements), policy)
    }

    /// Decode a batch with the policy and parallelism from `config`.
    pub fn decode_batch_with(
        &self,
        elements: &[Value],
        config: &DecoderConfig,
    ) -> MetaResult<BatchOutcome> {
        let results = if config.runs_parallel(elements.len()) {
            self.decode_nodes_parallel(elements, config.workers)
        } else {
            self.decode_nodes(elements)
        };
        collect(results, config.policy)
    }
}

fn collect(
    results: Vec<MetaResult<AffectedNode>>,
    policy: BatchPolicy,
) -> MetaResult<BatchOutcome> {
    let mut outcome = BatchOutcome {
        nodes: Vec::with_capacity(results.len()),
        failures: Vec::new(),
    };

    for (position, result) in results.into_iter().enumerate() {
        match (result, policy) {
            (Ok(node), _) => outcome.nodes.push(node),
            (Err(error), BatchPolicy::FailFast) => {
                return Err(MetaError::AtPosition {
                    position,
                    source: Box::new(error),
                })
            }
            (Err(error), BatchPolicy::SkipInvalid) => {
                warn!(position, %error, "skipping affected node");
                outcome.failures.push(BatchFailure { position, error });
            }
        }
    }
    Ok(outcome)
}
