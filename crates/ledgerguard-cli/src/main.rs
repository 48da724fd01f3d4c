//! LedgerGuard CLI
//!
//! Submits contract transactions against a SQLite-backed reference ledger.
//! Results are printed to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use ledgerguard_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ledgerguard-cli")]
#[command(about = "LedgerGuard - confidential and public asset records", long_about = None)]
struct Cli {
    #[command(flatten)]
    session: commands::SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Private-collection records and digest verification
    Confidential(commands::confidential::ConfidentialArgs),
    /// Public records and their endorsement policies
    Public(commands::public::PublicArgs),
    /// Whether an id exists in the public and confidential stores
    Linkage {
        asset_id: String,
    },
}

fn main() {
    init(Profile::Development);
    let cli = Cli::parse();

    let result = commands::Session::open(&cli.session).and_then(|mut session| {
        let cmd = match cli.command {
            Commands::Confidential(args) => commands::confidential::command(args)?,
            Commands::Public(args) => commands::public::command(args),
            Commands::Linkage { asset_id } => ledgerguard_core::Command::AssetLinkage { asset_id },
        };
        session.run(cmd)
    });

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
