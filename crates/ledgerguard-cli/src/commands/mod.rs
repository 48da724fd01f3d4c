//! Shared session plumbing for every subcommand

use std::error::Error;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Args;
use ledgerguard_core::ledger::Ledger;
use ledgerguard_core::{invoke, ClientIdentity, Command, ContractConfig, TransientMap};
use ledgerguard_store::SqliteWorldState;
use serde_json::json;

pub mod confidential;
pub mod public;

pub type CliResult<T> = Result<T, Box<dyn Error>>;

/// Options shared by all subcommands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Ledger database
    #[arg(long, global = true, default_value = ".ledgerguard/ledger.db")]
    pub db: PathBuf,

    /// Contract configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// MSP id of the submitting client
    #[arg(long, global = true, default_value = "Org1MSP")]
    pub org: String,

    /// Endorsing organization; repeatable, defaults to --org
    #[arg(long = "endorser", global = true)]
    pub endorsers: Vec<String>,

    /// Transient field as FIELD=VALUE; repeatable
    #[arg(long = "transient", global = true, value_parser = parse_field)]
    pub transient: Vec<(String, String)>,

    /// Transient field as FIELD=BASE64; repeatable
    #[arg(long = "transient-b64", global = true, value_parser = parse_field)]
    pub transient_b64: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(field, _)| !field.is_empty())
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))
}

pub fn decode_b64(value: &str) -> CliResult<Vec<u8>> {
    Ok(STANDARD.decode(value)?)
}

/// One CLI invocation: an open ledger plus who is transacting
pub struct Session {
    ledger: Ledger<SqliteWorldState>,
    config: ContractConfig,
    identity: ClientIdentity,
    endorsers: Vec<String>,
    transient: TransientMap,
}

impl Session {
    pub fn open(args: &SessionArgs) -> CliResult<Self> {
        let config = match &args.config {
            Some(path) => ContractConfig::from_toml_file(path)?,
            None => ContractConfig::default(),
        };

        let mut transient = TransientMap::new();
        for (field, value) in &args.transient {
            transient.insert(field.clone(), value.as_bytes().to_vec());
        }
        for (field, value) in &args.transient_b64 {
            transient.insert(field.clone(), decode_b64(value)?);
        }

        let endorsers = if args.endorsers.is_empty() {
            vec![args.org.clone()]
        } else {
            args.endorsers.clone()
        };

        Ok(Self {
            ledger: Ledger::new(SqliteWorldState::open(&args.db)?),
            config,
            identity: ClientIdentity::new(args.org.clone()),
            endorsers,
            transient,
        })
    }

    /// Evaluate queries, submit everything else; returns the JSON to print
    pub fn run(&mut self, cmd: Command) -> CliResult<String> {
        let config = &self.config;
        let transient = std::mem::take(&mut self.transient);

        let output = if cmd.is_read_only() {
            let result = self
                .ledger
                .evaluate(&self.identity, transient, |ctx| invoke(ctx, config, cmd))?;
            json!({ "result": result })
        } else {
            let committed = self.ledger.submit(
                &self.identity,
                transient,
                &self.endorsers,
                |ctx| invoke(ctx, config, cmd),
            )?;
            json!({
                "result": committed.output,
                "txId": committed.commit.tx_id.to_string(),
                "blockNum": committed.commit.block_num,
            })
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
