//! HTTP client for a Horizon server.

use std::time::Duration;

use chrono::DateTime;
use pitoken_client::{
    AccountSnapshot, AssetRecord, BalanceLine, ClientError, LedgerClient, SubmitResponse,
};
use pitoken_transactions::TransactionEnvelope;
use pitoken_types::{AccountId, Amount, Asset, AssetCode, HomeDomain, TimeBounds, Timestamp};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::HorizonConfig;
use crate::responses::{
    AccountResponse, AssetResponse, BalanceResponse, LedgerResponse, Page, Problem, SubmitSuccess,
};

/// Wraps `reqwest::Client` with the server's base URL and provides typed
/// methods for each Horizon resource the issuance flows need.
#[derive(Clone, Debug)]
pub struct HorizonClient {
    http: reqwest::Client,
    config: HorizonConfig,
}

impl HorizonClient {
    pub fn new(config: HorizonConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(format!("{path}: {e}"))),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(path.to_string())),
            status => Err(ClientError::Transport(format!(
                "{path}: server returned HTTP {status}"
            ))),
        }
    }

    /// Server time from the `Date` header of the root resource.
    async fn server_time(&self) -> Result<Timestamp, ClientError> {
        let response = self
            .http
            .get(self.url("/"))
            .send()
            .await
            .map_err(transport_error)?;
        let header = response
            .headers()
            .get(reqwest::header::DATE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ClientError::Decode("response has no Date header".into()))?;
        let parsed = DateTime::parse_from_rfc2822(header)
            .map_err(|e| ClientError::Decode(format!("bad Date header {header:?}: {e}")))?;
        u64::try_from(parsed.timestamp())
            .map(Timestamp::new)
            .map_err(|_| ClientError::Decode(format!("Date header before epoch: {header}")))
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(e.to_string())
    }
}

fn decode<E: std::fmt::Display>(what: &'static str, value: &str) -> impl FnOnce(E) -> ClientError {
    let value = value.to_string();
    move |e| ClientError::Decode(format!("{what} {value:?}: {e}"))
}

const LIQUIDITY_POOL_SHARES: &str = "liquidity_pool_shares";

fn parse_amount(value: &str) -> Result<Amount, ClientError> {
    value.parse().map_err(decode("amount", value))
}

/// Pool-share lines carry no asset and yield `None`.
fn parse_balance(line: BalanceResponse) -> Result<Option<BalanceLine>, ClientError> {
    if line.asset_type == LIQUIDITY_POOL_SHARES {
        return Ok(None);
    }
    let asset = if line.asset_type == "native" {
        Asset::Native
    } else {
        let (Some(code), Some(issuer)) = (line.asset_code.as_deref(), line.asset_issuer.as_deref())
        else {
            return Err(ClientError::Decode(format!(
                "{} balance without code or issuer",
                line.asset_type
            )));
        };
        let code = AssetCode::new(code).map_err(decode("asset code", code))?;
        let issuer: AccountId = issuer.parse().map_err(decode("issuer", issuer))?;
        Asset::credit(code, issuer)
    };
    let limit = line.limit.as_deref().map(parse_amount).transpose()?;
    Ok(Some(BalanceLine {
        asset,
        balance: parse_amount(&line.balance)?,
        limit,
    }))
}

fn parse_account(body: AccountResponse) -> Result<AccountSnapshot, ClientError> {
    let account_id: AccountId = body
        .account_id
        .parse()
        .map_err(decode("account id", &body.account_id))?;
    let sequence: i64 = body
        .sequence
        .parse()
        .map_err(decode("sequence", &body.sequence))?;
    let home_domain = match body.home_domain.as_deref() {
        None | Some("") => None,
        Some(domain) => match HomeDomain::new(domain) {
            Ok(domain) => Some(domain),
            Err(e) => {
                tracing::warn!(account = %account_id, error = %e, "ignoring unparseable home domain");
                None
            }
        },
    };
    let balances = body
        .balances
        .into_iter()
        .filter_map(|line| parse_balance(line).transpose())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AccountSnapshot {
        account_id,
        sequence,
        balances,
        home_domain,
        subentry_count: body.subentry_count,
    })
}

impl LedgerClient for HorizonClient {
    async fn load_account(&self, account: &AccountId) -> Result<AccountSnapshot, ClientError> {
        let path = format!("/accounts/{account}");
        let body: AccountResponse = self.get_json(&path, &[]).await?;
        let snapshot = parse_account(body)?;
        tracing::debug!(
            account = %snapshot.account_id,
            sequence = snapshot.sequence,
            balances = snapshot.balances.len(),
            "loaded account"
        );
        Ok(snapshot)
    }

    async fn fetch_base_fee(&self) -> Result<u32, ClientError> {
        let page: Page<LedgerResponse> = self
            .get_json("/ledgers", &[("order", "desc"), ("limit", "1")])
            .await?;
        page.embedded
            .records
            .first()
            .map(|ledger| ledger.base_fee_in_stroops)
            .ok_or_else(|| ClientError::Decode("ledger page is empty".into()))
    }

    async fn fetch_timebounds(&self, timeout_secs: u64) -> Result<TimeBounds, ClientError> {
        let now = match self.server_time().await {
            Ok(now) => now,
            Err(e) => {
                tracing::warn!(error = %e, "server time unavailable, using local clock");
                Timestamp::now()
            }
        };
        Ok(TimeBounds::with_timeout(now, timeout_secs))
    }

    async fn submit_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SubmitResponse, ClientError> {
        let tx = envelope.to_xdr_base64();
        let response = self
            .http
            .post(self.url("/transactions"))
            .form(&[("tx", tx.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            let body: SubmitSuccess = response
                .json()
                .await
                .map_err(|e| ClientError::Decode(format!("submission response: {e}")))?;
            let hash = body.hash.parse().map_err(decode("hash", &body.hash))?;
            return Ok(SubmitResponse {
                hash,
                ledger: body.ledger,
            });
        }
        if status == StatusCode::GATEWAY_TIMEOUT {
            return Err(ClientError::Timeout);
        }

        let problem: Problem = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("HTTP {status} problem body: {e}")))?;
        match problem.extras.and_then(|extras| extras.result_codes) {
            Some(rejection) => Err(ClientError::Rejected(rejection)),
            None => Err(ClientError::Transport(format!(
                "HTTP {status}: {}",
                problem.title.unwrap_or_default()
            ))),
        }
    }

    async fn asset(&self, asset: &Asset) -> Result<Option<AssetRecord>, ClientError> {
        let (Some(code), Some(issuer)) = (asset.code(), asset.issuer()) else {
            return Ok(None);
        };
        let issuer_text = issuer.to_string();
        let page: Page<AssetResponse> = self
            .get_json(
                "/assets",
                &[("asset_code", code.as_str()), ("asset_issuer", issuer_text.as_str())],
            )
            .await?;

        let Some(record) = page
            .embedded
            .records
            .into_iter()
            .find(|r| r.asset_code == code.as_str() && r.asset_issuer == issuer_text)
        else {
            return Ok(None);
        };
        Ok(Some(AssetRecord {
            asset: asset.clone(),
            num_accounts: record.num_accounts,
            amount: parse_amount(&record.amount)?,
            toml_href: record.links.toml.href,
        }))
    }
}
