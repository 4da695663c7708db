//! Subcommand handlers.

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use pitoken_client::{AccountSnapshot, LedgerClient};
use pitoken_crypto::{encode_account_id, encode_secret_seed, generate_keypair, keypair_from_secret};
use pitoken_horizon::{HorizonClient, HorizonConfig};
use pitoken_issuer::{
    DomainLinker, IssuanceFlow, IssuancePlan, IssueError, Issuer, LinkOutcome, Submitter,
    TokenMetadata, TrustlineEstablisher,
};
use pitoken_metadata::{well_known_url, CurrencyRecord, PiToml, Prober};
use pitoken_transactions::Memo;
use pitoken_types::{Asset, KeyPair};
use pitoken_utils::{format_duration, redact_secret};

use crate::config::CliConfig;
use crate::{Command, TomlAction};

pub async fn run(command: Command, memo: Option<String>, config: &CliConfig) -> anyhow::Result<()> {
    match command {
        Command::Keygen => keygen(),
        Command::Account { account } => {
            let client = horizon(config)?;
            let snapshot = client.load_account(&account).await?;
            print_account(&snapshot);
            Ok(())
        }
        Command::Asset { code, issuer } => {
            let client = horizon(config)?;
            let asset = Asset::credit(code, issuer);
            match client.asset(&asset).await? {
                Some(record) => {
                    println!("asset:    {}", record.asset);
                    println!("holders:  {}", record.num_accounts);
                    println!("supply:   {}", record.amount);
                    println!("toml:     {}", record.toml_href);
                }
                None => println!("{asset} is not recognized: no trustline references it"),
            }
            Ok(())
        }
        Command::Trust {
            code,
            issuer,
            limit,
            secret,
        } => {
            let holder = load_keys(&secret, "holder")?;
            let client = horizon(config)?;
            let submitter = submitter(&client, config, memo)?;
            let asset = Asset::credit(code, issuer);
            let response = TrustlineEstablisher::new(&submitter)
                .establish(&holder, &asset, limit)
                .await
                .map_err(issue_error)?;
            println!("trustline to {asset} established");
            println!("hash:   {}", response.hash);
            println!("ledger: {}", response.ledger);
            Ok(())
        }
        Command::Mint {
            code,
            destination,
            amount,
            no_preflight,
            secret,
        } => {
            let issuer_keys = load_keys(&secret, "issuer")?;
            let client = horizon(config)?;
            let submitter = submitter(&client, config, memo)?;
            let mut issuer = Issuer::new(&submitter);
            if no_preflight {
                issuer = issuer.without_preflight();
            }
            let response = issuer
                .mint(&issuer_keys, &destination, &code, amount)
                .await
                .map_err(issue_error)?;
            println!("minted {amount} {code} to {destination}");
            println!("hash:   {}", response.hash);
            println!("ledger: {}", response.ledger);
            Ok(())
        }
        Command::SetDomain { domain, secret } => {
            let issuer = load_keys(&secret, "issuer")?;
            let client = horizon(config)?;
            let submitter = submitter(&client, config, memo)?;
            match DomainLinker::new(&submitter)
                .link(&issuer, &domain)
                .await
                .map_err(issue_error)?
            {
                LinkOutcome::Linked(response) => {
                    println!("home domain set to {domain}");
                    println!("hash:   {}", response.hash);
                }
                LinkOutcome::Unchanged => println!("home domain already {domain}"),
            }
            println!("publish metadata at {}", well_known_url(&domain));
            Ok(())
        }
        Command::Issue {
            code,
            amount,
            limit,
            domain,
            name,
            desc,
            image,
            out,
            holder_secret,
            issuer_secret,
        } => {
            let holder = load_keys(&holder_secret, "holder")?;
            let issuer = load_keys(&issuer_secret, "issuer")?;
            let metadata = match (name, desc, image) {
                (Some(name), Some(desc), Some(image)) => Some(TokenMetadata { name, desc, image }),
                (None, None, None) => None,
                _ => bail!("--name, --desc and --image go together"),
            };
            let plan = IssuancePlan {
                code,
                limit,
                amount,
                home_domain: domain,
                metadata,
            };

            let client = horizon(config)?;
            let submitter = submitter(&client, config, memo)?;
            let report = IssuanceFlow::new(&submitter)
                .run(&holder, &issuer, &plan)
                .await
                .map_err(issue_error)?;

            match &report.trustline {
                Some(response) => println!("trust:  {}", response.hash),
                None => println!("trust:  already in place"),
            }
            println!("mint:   {}", report.mint.hash);
            match &report.domain {
                Some(LinkOutcome::Linked(response)) => println!("domain: {}", response.hash),
                Some(LinkOutcome::Unchanged) => println!("domain: unchanged"),
                None => {}
            }
            if let Some(record) = &report.asset_record {
                println!("supply: {} held by {} account(s)", record.amount, record.num_accounts);
                if record.has_metadata_link() {
                    println!("toml:   {}", record.toml_href);
                }
            }
            if let Some(document) = &report.pi_toml {
                emit(document, out.as_deref())?;
            }
            Ok(())
        }
        Command::Toml { action } => toml(action, config).await,
    }
}

fn keygen() -> anyhow::Result<()> {
    let keys = generate_keypair();
    println!("public: {}", encode_account_id(&keys.public));
    println!("secret: {}", encode_secret_seed(&keys.private));
    println!("fund the public key before using it; keep the secret offline");
    Ok(())
}

async fn toml(action: TomlAction, config: &CliConfig) -> anyhow::Result<()> {
    match action {
        TomlAction::Render {
            code,
            issuer,
            name,
            desc,
            image,
            existing,
            out,
        } => {
            let mut document = match &existing {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    PiToml::parse(&text)?
                }
                None => PiToml::for_network(&config.network),
            };
            document.upsert(CurrencyRecord::new(&code, &issuer, name, desc, image));
            document.validate_for(&config.network)?;
            emit(&document.render()?, out.as_deref())
        }
        TomlAction::Check { domain, asset } => {
            let url = well_known_url(&domain);
            let prober =
                Prober::new(Prober::DEFAULT_TIMEOUT_SECS)?.for_network(config.network.clone());
            let report = prober.probe(&url).await;

            let mut problems: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
            if let (Some(asset), Some(document)) = (asset, &report.document) {
                for missing in document.missing_records(&[asset]) {
                    problems.push(format!("no record for {missing}"));
                }
            }

            if problems.is_empty() {
                let count = report.document.map(|d| d.currencies.len()).unwrap_or(0);
                println!("{url}: ok ({count} record(s))");
                return Ok(());
            }
            for problem in &problems {
                println!("{url}: {problem}");
            }
            bail!("{} problem(s) found", problems.len())
        }
    }
}

fn horizon(config: &CliConfig) -> anyhow::Result<HorizonClient> {
    let url = config.horizon_url()?;
    tracing::debug!(%url, "using horizon server");
    Ok(HorizonClient::new(HorizonConfig::new(url))?)
}

fn submitter<'a>(
    client: &'a HorizonClient,
    config: &CliConfig,
    memo: Option<String>,
) -> anyhow::Result<Submitter<'a, HorizonClient>> {
    let memo = memo.map(Memo::Text).unwrap_or_default();
    let options = config.submit_options(memo);
    tracing::info!(
        network = %config.network,
        valid_for = %format_duration(options.timeout_secs),
        "submitting to {}",
        client.base_url()
    );
    Ok(Submitter::new(client, config.network.clone()).with_options(options))
}

fn load_keys(secret: &str, role: &str) -> anyhow::Result<KeyPair> {
    keypair_from_secret(secret)
        .map_err(|e| anyhow!("invalid {role} secret {}: {e}", redact_secret(secret)))
}

fn issue_error(err: IssueError) -> anyhow::Error {
    anyhow!("{err} [{}]", err.category())
}

fn emit(document: &str, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => print!("{document}"),
    }
    Ok(())
}

fn print_account(snapshot: &AccountSnapshot) {
    println!("account:     {}", snapshot.account_id);
    println!("sequence:    {}", snapshot.sequence);
    println!(
        "home domain: {}",
        snapshot
            .home_domain
            .as_ref()
            .map(|d| d.as_str())
            .unwrap_or("-")
    );
    for line in &snapshot.balances {
        match line.limit {
            Some(limit) => println!("  {}  {} (limit {})", line.asset, line.balance, limit),
            None => println!("  {}  {}", line.asset, line.balance),
        }
    }
}
