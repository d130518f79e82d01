//! The set of entry types that have a full typed schema.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use lm_objects::{SchemaDecoder, SerdeSchema};
use lm_types::EntryTypeTag;

/// Entry-type tags for which a typed schema decoder is registered.
///
/// Built once from a schema catalog and immutable afterwards, so a single
/// registry can be shared by any number of decoding threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodabilityRegistry {
    kinds: BTreeSet<EntryTypeTag>,
}

impl DecodabilityRegistry {
    /// Build a registry from an explicit catalog of decodable tags.
    pub fn from_catalog(catalog: impl IntoIterator<Item = EntryTypeTag>) -> Self {
        let kinds: BTreeSet<_> = catalog.into_iter().collect();
        debug!(kinds = kinds.len(), "built decodability registry");
        Self { kinds }
    }

    /// Build a registry from everything `schema` says it can decode.
    pub fn from_schema(schema: &dyn SchemaDecoder) -> Self {
        Self::from_catalog(schema.catalog())
    }

    /// The process-wide registry for the built-in [`SerdeSchema`].
    ///
    /// Constructed on first call; every later call returns the same value.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<DecodabilityRegistry>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(Self::from_schema(&SerdeSchema)))
            .clone()
    }

    /// Whether `tag` has a typed schema.
    pub fn is_decodable(&self, tag: &EntryTypeTag) -> bool {
        self.kinds.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Decodable tags in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &EntryTypeTag> {
        self.kinds.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use lm_types::LedgerEntryType;

    use super::*;

    #[test]
    fn ripple_state_is_decodable() {
        let registry = DecodabilityRegistry::global();
        assert!(registry.is_decodable(&LedgerEntryType::RippleState.tag()));
        assert!(registry.is_decodable(&LedgerEntryType::Offer.tag()));
    }

    #[test]
    fn directory_node_is_not_decodable() {
        let registry = DecodabilityRegistry::global();
        assert!(!registry.is_decodable(&LedgerEntryType::DirectoryNode.tag()));
        assert!(!registry.is_decodable(&EntryTypeTag::from("SomeFutureKind")));
    }

    #[test]
    fn global_is_built_once() {
        let first = DecodabilityRegistry::global();
        let second = DecodabilityRegistry::global();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn rebuilding_yields_the_same_set() {
        let rebuilt = DecodabilityRegistry::from_schema(&SerdeSchema);
        assert_eq!(*DecodabilityRegistry::global(), rebuilt);
    }

    #[test]
    fn concurrent_first_access_agrees() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(DecodabilityRegistry::global))
            .collect();
        let registries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for registry in &registries[1..] {
            assert!(Arc::ptr_eq(&registries[0], registry));
        }
    }

    #[test]
    fn explicit_catalog_is_respected() {
        let registry = DecodabilityRegistry::from_catalog([EntryTypeTag::from("Ticket")]);
        assert_eq!(registry.len(), 1);
        assert!(registry.is_decodable(&EntryTypeTag::from("Ticket")));
        assert!(!registry.is_decodable(&EntryTypeTag::from("Offer")));
        assert!(DecodabilityRegistry::default().is_empty());
    }
}
