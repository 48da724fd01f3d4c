//! Transaction boundary
//!
//! `invoke()` is the single entry point a substrate shim calls for every
//! transaction. It owns the start/end/error lifecycle events; everything
//! below it logs at debug level only.
//!
//! ## Example
//!
//! ```
//! use ledgerguard_core::context::{ClientIdentity, TxContext};
//! use ledgerguard_core::ledger::{MemoryWorldState, Simulation};
//! use ledgerguard_core::{invoke, Command, CommandResult, ContractConfig};
//!
//! let world = MemoryWorldState::new();
//! let mut sim = Simulation::new(&world);
//! let mut ctx = TxContext::new(&mut sim, ClientIdentity::new("Org1MSP"));
//! let cmd = Command::PublicExists { asset_id: "z1".to_string() };
//! let result = invoke(&mut ctx, &ContractConfig::default(), cmd).unwrap();
//! assert_eq!(result, CommandResult::Exists(false));
//! ```

use std::time::Instant;

use crate::commands::{Command, CommandResult};
use crate::config::ContractConfig;
use crate::context::TxContext;
use crate::errors::Result;
use crate::ops::{confidential_ops, linkage_ops, public_ops, verification};
use crate::logging_facility::elapsed_ms;
use crate::{log_op_end, log_op_error, log_op_start};

/// Execute one transaction against `ctx`
///
/// # Errors
///
/// Whatever the operation returns; see `LedgerGuardError` for the taxonomy.
/// Errors are returned unchanged.
pub fn invoke(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    cmd: Command,
) -> Result<CommandResult> {
    let op = cmd.name();
    let asset_id = cmd.asset_id().to_string();
    log_op_start!(
        op,
        asset_id = %asset_id,
        msp_id = %ctx.caller_org(),
        tx_id = %ctx.tx_id()
    );
    let start = Instant::now();

    let result = dispatch(ctx, config, cmd);

    match &result {
        Ok(_) => {
            log_op_end!(
                op,
                duration_ms = elapsed_ms(start),
                asset_id = %asset_id
            );
        }
        Err(e) => {
            log_op_error!(
                op,
                e.clone(),
                duration_ms = elapsed_ms(start),
                asset_id = %asset_id
            );
        }
    }
    result
}

fn dispatch(
    ctx: &mut TxContext<'_>,
    config: &ContractConfig,
    cmd: Command,
) -> Result<CommandResult> {
    match cmd {
        Command::AssetExists { asset_id } => Ok(CommandResult::Exists(
            confidential_ops::confidential_exists(ctx, config, &asset_id)?,
        )),
        Command::CreateConfidential { asset_id } => {
            confidential_ops::create_confidential(ctx, config, &asset_id)?;
            Ok(CommandResult::Done)
        }
        Command::ReadConfidential { asset_id } => Ok(CommandResult::PrivateRecord(
            confidential_ops::read_confidential(ctx, config, &asset_id)?,
        )),
        Command::UpdateConfidential { asset_id } => {
            confidential_ops::update_confidential(ctx, config, &asset_id)?;
            Ok(CommandResult::Done)
        }
        Command::DeleteConfidential { asset_id } => {
            confidential_ops::delete_confidential(ctx, config, &asset_id)?;
            Ok(CommandResult::Done)
        }
        Command::Verify {
            msp_id,
            asset_id,
            candidate,
        } => Ok(CommandResult::Verified(verification::verify(
            ctx,
            config,
            &msp_id,
            &asset_id,
            candidate.expose(),
        )?)),
        Command::PublicExists { asset_id } => Ok(CommandResult::Exists(
            public_ops::public_exists(ctx, &asset_id)?,
        )),
        Command::CreatePublic { asset_id, payload } => Ok(CommandResult::PolicyAssignment(
            public_ops::create_public(ctx, config, &asset_id, &payload)?,
        )),
        Command::ReadPublic { asset_id } => Ok(CommandResult::PublicAsset(
            public_ops::read_public(ctx, &asset_id)?,
        )),
        Command::UpdatePublic { asset_id, value } => Ok(CommandResult::PublicAsset(
            public_ops::update_public(ctx, &asset_id, &value)?,
        )),
        Command::DeletePublic { asset_id } => {
            public_ops::delete_public(ctx, &asset_id)?;
            Ok(CommandResult::Done)
        }
        Command::ReadEndorsementPolicy { asset_id } => Ok(CommandResult::EndorsementPolicy(
            public_ops::read_endorsement_policy(ctx, &asset_id)?,
        )),
        Command::AssetLinkage { asset_id } => Ok(CommandResult::Linkage(
            linkage_ops::asset_linkage(ctx, config, &asset_id)?,
        )),
    }
}
