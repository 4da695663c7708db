//! pitoken: issue a custom token on a Stellar-protocol network.

mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use pitoken_types::{AccountId, Amount, Asset, AssetCode, HomeDomain, NetworkId};
use pitoken_utils::LogFormat;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "pitoken", about = "Custom token issuance on Pi Testnet")]
struct Cli {
    /// Network to sign for: "pi-testnet", "pi-mainnet" or "stellar-testnet".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "PITOKEN_NETWORK", global = true)]
    network: Option<NetworkId>,

    /// Horizon server root (defaults to the network's public server).
    #[arg(long, env = "PITOKEN_HORIZON_URL", global = true)]
    horizon_url: Option<String>,

    /// Validity window of submitted transactions, in seconds.
    #[arg(long, env = "PITOKEN_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Fixed per-operation fee in stroops.
    #[arg(long, env = "PITOKEN_BASE_FEE", global = true)]
    base_fee: Option<u32>,

    /// Text memo attached to submitted transactions (at most 28 bytes).
    #[arg(long, global = true)]
    memo: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "PITOKEN_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "PITOKEN_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "PITOKEN_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a new key pair.
    Keygen,

    /// Show an account's sequence, balances and home domain.
    Account { account: AccountId },

    /// Show the network's record of an asset.
    Asset { code: AssetCode, issuer: AccountId },

    /// Trust an asset from the holder account.
    Trust {
        code: AssetCode,
        issuer: AccountId,
        /// Trustline limit; unlimited when omitted.
        #[arg(long)]
        limit: Option<Amount>,
        /// Holder secret seed (S...).
        #[arg(long, env = "PITOKEN_HOLDER_SECRET", hide_env_values = true)]
        secret: String,
    },

    /// Mint by paying from the issuing account.
    Mint {
        code: AssetCode,
        destination: AccountId,
        amount: Amount,
        /// Submit even if the destination does not trust the asset yet.
        #[arg(long)]
        no_preflight: bool,
        /// Issuer secret seed (S...).
        #[arg(long, env = "PITOKEN_ISSUER_SECRET", hide_env_values = true)]
        secret: String,
    },

    /// Link a home domain to the issuing account.
    SetDomain {
        domain: HomeDomain,
        /// Issuer secret seed (S...).
        #[arg(long, env = "PITOKEN_ISSUER_SECRET", hide_env_values = true)]
        secret: String,
    },

    /// Trust, mint, link the domain and render pi.toml in one go.
    Issue {
        code: AssetCode,
        amount: Amount,
        #[arg(long)]
        limit: Option<Amount>,
        #[arg(long)]
        domain: Option<HomeDomain>,
        /// Token name for the pi.toml record.
        #[arg(long, requires_all = ["desc", "image"])]
        name: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        /// HTTPS URL of the token image.
        #[arg(long)]
        image: Option<String>,
        /// Write the rendered pi.toml here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, env = "PITOKEN_HOLDER_SECRET", hide_env_values = true)]
        holder_secret: String,
        #[arg(long, env = "PITOKEN_ISSUER_SECRET", hide_env_values = true)]
        issuer_secret: String,
    },

    /// Work with pi.toml documents.
    Toml {
        #[command(subcommand)]
        action: TomlAction,
    },
}

#[derive(clap::Subcommand)]
enum TomlAction {
    /// Render a pi.toml with a record for the token, merged into an
    /// existing document when one is given.
    Render {
        code: AssetCode,
        issuer: AccountId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        desc: String,
        #[arg(long)]
        image: String,
        /// Existing pi.toml to merge into.
        #[arg(long)]
        existing: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Fetch https://<domain>/.well-known/pi.toml and verify it against
    /// the configured network.
    Check {
        domain: HomeDomain,
        /// Also require a record for this asset, as CODE:ISSUER.
        #[arg(long)]
        asset: Option<Asset>,
    },
}

/// Layer command line values over the config file.
fn resolve_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if let Some(network) = &cli.network {
        config.network = network.clone();
    }
    if let Some(url) = &cli.horizon_url {
        config.horizon_url = Some(url.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.base_fee.is_some() {
        config.base_fee = cli.base_fee;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    pitoken_utils::init_logging(config.log_format, &config.log_level)?;

    if let Some(path) = &cli.config {
        tracing::debug!(path = %path.display(), "loaded config");
    }
    tracing::debug!(network = %config.network, "starting");

    commands::run(cli.command, cli.memo, &config).await
}
