use std::path::Path;

use ledgerguard_core::context::{ClientIdentity, TransientMap};
use ledgerguard_core::errors::Result;
use ledgerguard_core::ledger::Ledger;
use ledgerguard_core::{invoke, Command, CommandResult, ContractConfig};
use ledgerguard_store::SqliteWorldState;

#[allow(dead_code)]
pub const ORG1: &str = "Org1MSP";
#[allow(dead_code)]
pub const ORG2: &str = "Org2MSP";

/// Open (or reopen) a file-backed ledger
#[allow(dead_code)]
pub fn open_ledger(path: &Path) -> Ledger<SqliteWorldState> {
    Ledger::new(SqliteWorldState::open(path).expect("open sqlite ledger"))
}

/// Submit `cmd` as `org`, endorsed by `endorsers`
#[allow(dead_code)]
pub fn submit(
    ledger: &mut Ledger<SqliteWorldState>,
    org: &str,
    transient: TransientMap,
    endorsers: &[&str],
    cmd: Command,
) -> Result<CommandResult> {
    let config = ContractConfig::default();
    let endorsers: Vec<String> = endorsers.iter().map(|e| e.to_string()).collect();
    ledger
        .submit(&ClientIdentity::new(org), transient, &endorsers, |ctx| {
            invoke(ctx, &config, cmd)
        })
        .map(|committed| committed.output)
}

#[allow(dead_code)]
pub fn evaluate(ledger: &Ledger<SqliteWorldState>, org: &str, cmd: Command) -> Result<CommandResult> {
    let config = ContractConfig::default();
    ledger.evaluate(&ClientIdentity::new(org), TransientMap::new(), |ctx| {
        invoke(ctx, &config, cmd)
    })
}

#[allow(dead_code)]
pub fn secret(value: &str) -> TransientMap {
    TransientMap::new().with("privateValue", value)
}
