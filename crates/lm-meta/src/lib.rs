//! Affected-node reconciliation for ledger transaction metadata.
//!
//! Every transaction's metadata lists the ledger objects it created,
//! modified, or deleted. The records arrive as loosely typed JSON:
//! identity lives outside the field block, bookkeeping fields are often
//! implicit, and modifications carry only the fields that changed. This
//! crate turns each record into an [`AffectedNode`] holding typed
//! snapshots of the object after (and, for modifications, before) the
//! transaction.
//!
//! Kinds without a registered schema are never an error: they decode to
//! an identity-only node so metadata stays readable as the ledger grows
//! new object kinds.
//!
//! # Key Types
//!
//! - [`MetadataDecoder`] — Decodes one affected node, a batch, or a whole metadata object
//! - [`DecodabilityRegistry`] — Build-once set of kinds with a typed schema
//! - [`CompleteRecord`] — A field block with identity and bookkeeping filled in
//! - [`AffectedNode`] — Created / Modified / Deleted result
//! - [`TransactionMetadata`] — Decoded `meta` object of one transaction
//! - [`FieldChanges`] — Field-level diff between previous and final state
//! - [`DecoderConfig`] — Batch policy and worker count

pub mod batch;
pub mod changes;
pub mod config;
pub mod decoder;
pub mod error;
pub mod metadata;
pub mod node;
pub mod normalize;
pub mod overlay;
pub mod registry;

pub use batch::{BatchFailure, BatchOutcome, BatchPolicy};
pub use changes::{diff_records, field_changes, FieldChange, FieldChanges};
pub use config::DecoderConfig;
pub use decoder::MetadataDecoder;
pub use error::{MetaError, MetaResult};
pub use metadata::TransactionMetadata;
pub use node::{AffectedNode, CreatedNode, DeletedNode, ModifiedNode, WrapperKind};
pub use normalize::{extract_identifier, normalize, Bookkeeping, CompleteRecord};
pub use overlay::{overlay, reconstruct_previous};
pub use registry::DecodabilityRegistry;
