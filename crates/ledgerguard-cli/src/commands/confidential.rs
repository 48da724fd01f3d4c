//! Confidential record subcommands

use clap::{Args, Subcommand};
use ledgerguard_core::Command;
use ledgerguard_core_types::Sensitive;

use super::{decode_b64, CliResult};

#[derive(Debug, Args)]
pub struct ConfidentialArgs {
    #[command(subcommand)]
    pub command: ConfidentialCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfidentialCommand {
    /// Does the caller's collection hold this id
    Exists { asset_id: String },
    /// Store the secret passed as transient data
    Create { asset_id: String },
    /// Read the caller's own record
    Read { asset_id: String },
    /// Replace the secret with the one passed as transient data
    Update { asset_id: String },
    Delete { asset_id: String },
    /// Check a candidate secret against an org's committed digest
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Organization whose collection holds the record
    #[arg(long)]
    pub msp_id: String,

    pub asset_id: String,

    /// Candidate secret as text
    #[arg(long, conflicts_with = "candidate_b64", required_unless_present = "candidate_b64")]
    pub candidate: Option<String>,

    /// Candidate secret as base64
    #[arg(long)]
    pub candidate_b64: Option<String>,
}

pub fn command(args: ConfidentialArgs) -> CliResult<Command> {
    Ok(match args.command {
        ConfidentialCommand::Exists { asset_id } => Command::AssetExists { asset_id },
        ConfidentialCommand::Create { asset_id } => Command::CreateConfidential { asset_id },
        ConfidentialCommand::Read { asset_id } => Command::ReadConfidential { asset_id },
        ConfidentialCommand::Update { asset_id } => Command::UpdateConfidential { asset_id },
        ConfidentialCommand::Delete { asset_id } => Command::DeleteConfidential { asset_id },
        ConfidentialCommand::Verify(verify) => {
            let candidate = match (verify.candidate, verify.candidate_b64) {
                (_, Some(encoded)) => decode_b64(&encoded)?,
                (Some(text), None) => text.into_bytes(),
                (None, None) => return Err("either --candidate or --candidate-b64 is required".into()),
            };
            Command::Verify {
                msp_id: verify.msp_id,
                asset_id: verify.asset_id,
                candidate: Sensitive::new(candidate),
            }
        }
    })
}
