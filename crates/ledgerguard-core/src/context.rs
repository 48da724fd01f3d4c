//! Explicit per-transaction context
//!
//! Caller identity, the transient input channel and the substrate handle are
//! passed to every operation in one `TxContext` value instead of living in
//! ambient state.

use std::collections::BTreeMap;

use ledgerguard_core_types::{Sensitive, TxId};

use crate::stub::LedgerStub;

/// Identity of the submitting client, as resolved by the membership service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    msp_id: String,
}

impl ClientIdentity {
    /// Identity belonging to organization `msp_id`
    pub fn new(msp_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
        }
    }

    /// Organization (MSP) identifier of the caller
    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }
}

/// Transaction-local input fields that are never written to the ledger
///
/// Values are wrapped in `Sensitive` on the way in.
#[derive(Debug, Clone, Default)]
pub struct TransientMap {
    fields: BTreeMap<String, Sensitive<Vec<u8>>>,
}

impl TransientMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.fields
            .insert(field.into(), Sensitive::new(value.into()));
    }

    /// Builder form of `insert`
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Sensitive<Vec<u8>>> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Everything one contract invocation may touch
pub struct TxContext<'a> {
    stub: &'a mut dyn LedgerStub,
    identity: ClientIdentity,
    transient: TransientMap,
    tx_id: TxId,
}

impl<'a> TxContext<'a> {
    pub fn new(stub: &'a mut dyn LedgerStub, identity: ClientIdentity) -> Self {
        Self {
            stub,
            identity,
            transient: TransientMap::new(),
            tx_id: TxId::new(),
        }
    }

    pub fn with_transient(mut self, transient: TransientMap) -> Self {
        self.transient = transient;
        self
    }

    pub fn with_tx_id(mut self, tx_id: TxId) -> Self {
        self.tx_id = tx_id;
        self
    }

    pub fn stub(&mut self) -> &mut dyn LedgerStub {
        &mut *self.stub
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Organization id of the caller
    pub fn caller_org(&self) -> &str {
        self.identity.msp_id()
    }

    pub fn transient(&self) -> &TransientMap {
        &self.transient
    }

    pub fn tx_id(&self) -> &TxId {
        &self.tx_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_map_redacts_values() {
        let map = TransientMap::new().with("privateValue", "42");
        assert!(map.get("privateValue").is_some());
        assert_eq!(map.len(), 1);
        let debug = format!("{:?}", map);
        assert!(debug.contains("privateValue"));
        assert!(!debug.contains("[52, 50]"));
    }

    #[test]
    fn test_transient_map_get_exposes_bytes() {
        let map = TransientMap::new().with("privateValue", b"secret".to_vec());
        let value = map.get("privateValue").unwrap();
        assert_eq!(value.expose(), b"secret");
        assert!(map.get("other").is_none());
    }

    #[test]
    fn test_empty_transient_map() {
        let map = TransientMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_client_identity_accessors() {
        let id = ClientIdentity::new("Org1MSP");
        assert_eq!(id.msp_id(), "Org1MSP");
        assert_eq!(id, ClientIdentity::new("Org1MSP"));
    }
}
