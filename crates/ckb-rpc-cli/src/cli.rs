use clap::{Parser, Subcommand};

/// ckb-rpc — query a CKB full node over JSON-RPC and print the result.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// CKB node RPC URL.
    #[arg(long, default_value = ckb_rpc::DEFAULT_URL, env = "CKB_RPC_URL")]
    pub rpc_url: String,

    /// RPC username (only for nodes behind an authenticating proxy).
    #[arg(long, env = "CKB_RPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password (only for nodes behind an authenticating proxy).
    #[arg(long, env = "CKB_RPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Total request timeout in seconds. Unset means no client-side timeout.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch block 0.
    GenesisBlock,
    /// Fetch the hash of block 0.
    GenesisBlockHash,
    /// Hash of the block at a given number.
    GetBlockHash { block_number: String },
    GetBlock { block_hash: String },
    GetBlockByNumber { block_number: String },
    GetTipHeader,
    GetTipBlockNumber,
    GetCellsByLockHash {
        lock_hash: String,
        from: String,
        to: String,
    },
    GetTransaction { tx_hash: String },
    /// Look up a cell; `out_point` is a JSON object.
    GetLiveCell { out_point: String },
    /// Submit a transaction given as JSON.
    SendTransaction { transaction: String },
    LocalNodeInfo,
    /// Submit a transaction given as JSON for tracing.
    TraceTransaction { transaction: String },
    GetTransactionTrace { hash: String },
    GetCurrentEpoch,
    GetEpochByNumber { number: String },
    GetPeers,
    TxPoolInfo,
    /// Raw call: method name plus an optional JSON array of params.
    Call {
        method: String,
        params: Option<String>,
    },
}
