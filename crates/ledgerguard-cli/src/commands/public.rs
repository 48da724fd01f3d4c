//! Public record subcommands

use clap::{Args, Subcommand};
use ledgerguard_core::Command;

#[derive(Debug, Args)]
pub struct PublicArgs {
    #[command(subcommand)]
    pub command: PublicCommand,
}

#[derive(Debug, Subcommand)]
pub enum PublicCommand {
    Exists {
        asset_id: String,
    },
    /// Create a record owned by --org and bind its key to that org
    Create {
        asset_id: String,
        payload: String,
    },
    Read {
        asset_id: String,
    },
    /// Replace the payload, keeping owner and kind
    Update {
        asset_id: String,
        value: String,
    },
    Delete {
        asset_id: String,
    },
    /// Show the key-level endorsement policy
    Policy {
        asset_id: String,
    },
}

pub fn command(args: PublicArgs) -> Command {
    match args.command {
        PublicCommand::Exists { asset_id } => Command::PublicExists { asset_id },
        PublicCommand::Create { asset_id, payload } => Command::CreatePublic { asset_id, payload },
        PublicCommand::Read { asset_id } => Command::ReadPublic { asset_id },
        PublicCommand::Update { asset_id, value } => Command::UpdatePublic { asset_id, value },
        PublicCommand::Delete { asset_id } => Command::DeletePublic { asset_id },
        PublicCommand::Policy { asset_id } => Command::ReadEndorsementPolicy { asset_id },
    }
}
