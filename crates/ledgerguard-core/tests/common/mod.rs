use ledgerguard_core::context::{ClientIdentity, TransientMap, TxContext};
use ledgerguard_core::errors::{LedgerGuardError, Result};
use ledgerguard_core::ledger::{Ledger, MemoryWorldState};
use ledgerguard_core::stub::LedgerStub;
use ledgerguard_core::{invoke, Command, CommandResult, ContractConfig};
use ledgerguard_core_types::Sensitive;

#[allow(dead_code)]
pub const ORG1: &str = "Org1MSP";
#[allow(dead_code)]
pub const ORG2: &str = "Org2MSP";

/// A fresh in-memory ledger plus the contract configuration to run with
#[allow(dead_code)]
pub struct Harness {
    pub ledger: Ledger<MemoryWorldState>,
    pub config: ContractConfig,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_config(ContractConfig::default())
    }

    pub fn with_config(config: ContractConfig) -> Self {
        Self {
            ledger: Ledger::new(MemoryWorldState::new()),
            config,
        }
    }

    /// Submit as `org`, endorsed by `org` alone
    pub fn submit(&mut self, org: &str, cmd: Command) -> Result<CommandResult> {
        self.submit_endorsed(org, TransientMap::new(), &[org], cmd)
    }

    /// Submit as `org` with the secret in the `privateValue` transient field
    pub fn submit_secret(&mut self, org: &str, secret: &str, cmd: Command) -> Result<CommandResult> {
        self.submit_endorsed(org, secret_transient(secret), &[org], cmd)
    }

    pub fn submit_endorsed(
        &mut self,
        org: &str,
        transient: TransientMap,
        endorsers: &[&str],
        cmd: Command,
    ) -> Result<CommandResult> {
        let config = &self.config;
        let endorsers: Vec<String> = endorsers.iter().map(|e| e.to_string()).collect();
        self.ledger
            .submit(&ClientIdentity::new(org), transient, &endorsers, |ctx| {
                invoke(ctx, config, cmd)
            })
            .map(|committed| committed.output)
    }

    /// Evaluate a query as `org`; nothing is committed
    pub fn evaluate(&self, org: &str, cmd: Command) -> Result<CommandResult> {
        self.ledger
            .evaluate(&ClientIdentity::new(org), TransientMap::new(), |ctx| {
                invoke(ctx, &self.config, cmd)
            })
    }

    pub fn create_confidential(&mut self, org: &str, id: &str, secret: &str) {
        self.submit_secret(org, secret, create_confidential(id)).unwrap();
    }

    pub fn create_public(&mut self, org: &str, id: &str, payload: &str) {
        self.submit(org, create_public(id, payload)).unwrap();
    }

    pub fn verify(&self, caller: &str, org: &str, id: &str, candidate: &str) -> Result<bool> {
        match self.evaluate(caller, verify(org, id, candidate))? {
            CommandResult::Verified(matched) => Ok(matched),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[allow(dead_code)]
pub fn secret_transient(secret: &str) -> TransientMap {
    TransientMap::new().with("privateValue", secret)
}

#[allow(dead_code)]
pub fn asset_exists(id: &str) -> Command {
    Command::AssetExists {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn create_confidential(id: &str) -> Command {
    Command::CreateConfidential {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn read_confidential(id: &str) -> Command {
    Command::ReadConfidential {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn update_confidential(id: &str) -> Command {
    Command::UpdateConfidential {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn delete_confidential(id: &str) -> Command {
    Command::DeleteConfidential {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn verify(org: &str, id: &str, candidate: &str) -> Command {
    Command::Verify {
        msp_id: org.to_string(),
        asset_id: id.to_string(),
        candidate: Sensitive::new(candidate.as_bytes().to_vec()),
    }
}

#[allow(dead_code)]
pub fn public_exists(id: &str) -> Command {
    Command::PublicExists {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn create_public(id: &str, payload: &str) -> Command {
    Command::CreatePublic {
        asset_id: id.to_string(),
        payload: payload.to_string(),
    }
}

#[allow(dead_code)]
pub fn read_public(id: &str) -> Command {
    Command::ReadPublic {
        asset_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn update_public(id: &str, value: &str) -> Command {
    Command::UpdatePublic {
        asset_id: id.to_string(),
        value: value.to_string(),
    }
}

#[allow(dead_code)]
pub fn delete_public(id: &str) -> Command {
    Command::DeletePublic {
        asset_id: id.to_string(),
    }
}

/// Stub that refuses validation parameters and forwards everything else
#[allow(dead_code)]
pub struct RejectingValidationStub<'s> {
    pub inner: &'s mut dyn LedgerStub,
}

impl LedgerStub for RejectingValidationStub<'_> {
    fn get_state(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.inner.put_state(key, value)
    }

    fn delete_state(&mut self, key: &str) -> Result<()> {
        self.inner.delete_state(key)
    }

    fn get_private_data(&mut self, collection: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get_private_data(collection, key)
    }

    fn put_private_data(&mut self, collection: &str, key: &str, value: Vec<u8>) -> Result<()> {
        self.inner.put_private_data(collection, key, value)
    }

    fn delete_private_data(&mut self, collection: &str, key: &str) -> Result<()> {
        self.inner.delete_private_data(collection, key)
    }

    fn get_private_data_hash(&mut self, collection: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get_private_data_hash(collection, key)
    }

    fn set_state_validation_parameter(&mut self, _key: &str, _policy: Vec<u8>) -> Result<()> {
        Err(LedgerGuardError::Substrate {
            op: "set_state_validation_parameter".to_string(),
            message: "validation parameters disabled".to_string(),
        })
    }

    fn get_state_validation_parameter(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get_state_validation_parameter(key)
    }
}

/// Run one command in a fresh context over `stub`
#[allow(dead_code)]
pub fn invoke_on(
    stub: &mut dyn LedgerStub,
    org: &str,
    config: &ContractConfig,
    cmd: Command,
) -> Result<CommandResult> {
    let mut ctx = TxContext::new(stub, ClientIdentity::new(org));
    invoke(&mut ctx, config, cmd)
}
