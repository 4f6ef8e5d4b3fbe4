mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde_json::Value;

use ckb_rpc::{ClientConfig, ClientError, RpcClient, TransportConfig};

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let config = ClientConfig {
        url: Some(args.rpc_url.clone()),
        transport: TransportConfig {
            connect_timeout: None,
            timeout: args.timeout_secs.map(Duration::from_secs),
            user: args.rpc_user.clone(),
            pass: args.rpc_pass.clone(),
        },
    };
    let rpc = RpcClient::with_config(&config).wrap_err("configure CKB RPC client")?;
    tracing::debug!(client = %rpc, "rpc client ready");

    let result = run(&rpc, args.command).await.map_err(|err| match err {
        RunError::Client(ClientError::Transport(source)) => {
            let message = format_rpc_connect_error(&args.rpc_url, &source.to_string());
            eyre!(message).wrap_err("while attempting to reach the CKB node")
        }
        RunError::Client(other) => eyre!(other).wrap_err("rpc call failed"),
        RunError::Argument(report) => report,
    })?;

    let rendered = if args.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .wrap_err("render result as JSON")?;
    println!("{rendered}");

    Ok(())
}

enum RunError {
    Client(ClientError),
    Argument(eyre::Report),
}

impl From<ClientError> for RunError {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

async fn run(rpc: &RpcClient, command: Command) -> Result<Value, RunError> {
    let value = match command {
        Command::GenesisBlock => rpc.genesis_block().await?.clone(),
        Command::GenesisBlockHash => rpc.genesis_block_hash().await?.clone(),
        Command::GetBlockHash { block_number } => rpc.get_block_hash(block_number).await?,
        Command::GetBlock { block_hash } => rpc.get_block(block_hash).await?,
        Command::GetBlockByNumber { block_number } => rpc.get_block_by_number(block_number).await?,
        Command::GetTipHeader => rpc.get_tip_header().await?,
        Command::GetTipBlockNumber => rpc.get_tip_block_number().await?,
        Command::GetCellsByLockHash {
            lock_hash,
            from,
            to,
        } => rpc.get_cells_by_lock_hash(lock_hash, from, to).await?,
        Command::GetTransaction { tx_hash } => rpc.get_transaction(tx_hash).await?,
        Command::GetLiveCell { out_point } => {
            rpc.get_live_cell(parse_json_arg("out_point", &out_point)?)
                .await?
        }
        Command::SendTransaction { transaction } => {
            rpc.send_transaction(parse_json_arg("transaction", &transaction)?)
                .await?
        }
        Command::LocalNodeInfo => rpc.local_node_info().await?,
        Command::TraceTransaction { transaction } => {
            rpc.trace_transaction(parse_json_arg("transaction", &transaction)?)
                .await?
        }
        Command::GetTransactionTrace { hash } => rpc.get_transaction_trace(hash).await?,
        Command::GetCurrentEpoch => rpc.get_current_epoch().await?,
        Command::GetEpochByNumber { number } => rpc.get_epoch_by_number(number).await?,
        Command::GetPeers => rpc.get_peers().await?,
        Command::TxPoolInfo => rpc.tx_pool_info().await?,
        Command::Call { method, params } => {
            let params = match params {
                None => None,
                Some(raw) => match parse_json_arg("params", &raw)? {
                    Value::Array(items) => Some(items),
                    other => {
                        return Err(RunError::Argument(eyre!(
                            "params must be a JSON array, got {other}"
                        )));
                    }
                },
            };
            rpc.call(&method, params).await?
        }
    };
    Ok(value)
}

fn parse_json_arg(name: &str, raw: &str) -> Result<Value, RunError> {
    serde_json::from_str(raw)
        .wrap_err_with(|| format!("argument `{name}` is not valid JSON"))
        .map_err(RunError::Argument)
}

fn format_rpc_connect_error(rpc_url: &str, source_error: &str) -> String {
    let mut lines = vec![
        format!("could not reach RPC endpoint `{rpc_url}`"),
        format!("transport error: {source_error}"),
    ];

    if source_error.contains("dns error") || source_error.contains("failed to lookup address") {
        lines.push(
            "hint: hostname resolution failed; verify the endpoint hostname and your DNS/network"
                .into(),
        );
    } else if source_error.to_ascii_lowercase().contains("connection refused") {
        lines.push(
            "hint: nothing is listening there; check that the node runs with its RPC module enabled"
                .into(),
        );
    } else if source_error.contains("timed out") {
        lines.push("hint: the node did not answer in time; try a larger --timeout-secs".into());
    } else if source_error.contains("401") || source_error.contains("403") {
        lines.push("hint: authentication failed; verify --rpc-user/--rpc-pass".into());
    } else if source_error.contains("404") {
        lines.push("hint: endpoint path is invalid; verify the full RPC URL".into());
    }

    lines.join("\n")
}
