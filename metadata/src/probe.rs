//! Checks a published pi.toml the way a scanner would.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use pitoken_types::NetworkId;

use crate::document::PiToml;
use crate::error::{MetadataError, ValidationIssue};

/// Something that would make a scanner reject the published document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeIssue {
    NotHttps,
    Unreachable(String),
    HttpStatus(u16),
    WrongContentType(String),
    Parse(String),
    Invalid(Vec<ValidationIssue>),
    ImageUnreachable { url: String, reason: String },
}

impl std::fmt::Display for ProbeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotHttps => write!(f, "document is not served over https"),
            Self::Unreachable(reason) => write!(f, "document unreachable: {reason}"),
            Self::HttpStatus(status) => write!(f, "document returned HTTP {status}"),
            Self::WrongContentType(found) => {
                write!(f, "content type is {found:?}, expected text/plain")
            }
            Self::Parse(reason) => write!(f, "{reason}"),
            Self::Invalid(issues) => {
                for (i, issue) in issues.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{issue}")?;
                }
                Ok(())
            }
            Self::ImageUnreachable { url, reason } => {
                write!(f, "image {url} unreachable: {reason}")
            }
        }
    }
}

/// What [`Prober::probe`] found at a URL.
#[derive(Clone, Debug, Default)]
pub struct ProbeReport {
    pub url: String,
    pub status: Option<u16>,
    pub content_type: Option<String>,
    /// The parsed document, when the body parsed at all.
    pub document: Option<PiToml>,
    pub issues: Vec<ProbeIssue>,
}

impl ProbeReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Prober {
    http: reqwest::Client,
    require_https: bool,
    network: Option<NetworkId>,
}

impl Prober {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn new(timeout_secs: u64) -> Result<Self, MetadataError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MetadataError::Http(e.to_string()))?;
        Ok(Self {
            http,
            require_https: true,
            network: None,
        })
    }

    /// Also reject documents whose `NETWORK_PASSPHRASE` names another network.
    pub fn for_network(mut self, network: NetworkId) -> Self {
        self.network = Some(network);
        self
    }

    /// A prober that accepts plain http URLs, for the document and its
    /// images. Only for local test servers.
    pub fn insecure(timeout_secs: u64) -> Result<Self, MetadataError> {
        Ok(Self {
            require_https: false,
            ..Self::new(timeout_secs)?
        })
    }

    /// Fetch and verify the document at `url`, then check every image.
    ///
    /// Never fails: every problem ends up in the report.
    pub async fn probe(&self, url: &str) -> ProbeReport {
        let mut report = ProbeReport {
            url: url.to_string(),
            ..ProbeReport::default()
        };

        if self.require_https && !url.starts_with("https://") {
            report.issues.push(ProbeIssue::NotHttps);
            return report;
        }

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, error = %e, "pi.toml fetch failed");
                report.issues.push(ProbeIssue::Unreachable(e.to_string()));
                return report;
            }
        };

        let status = response.status();
        report.status = Some(status.as_u16());
        report.content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if !status.is_success() {
            report.issues.push(ProbeIssue::HttpStatus(status.as_u16()));
            return report;
        }
        match &report.content_type {
            Some(ct) if ct.trim_start().starts_with("text/plain") => {}
            Some(ct) => report
                .issues
                .push(ProbeIssue::WrongContentType(ct.clone())),
            None => report
                .issues
                .push(ProbeIssue::WrongContentType(String::new())),
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                report.issues.push(ProbeIssue::Unreachable(e.to_string()));
                return report;
            }
        };
        let document = match PiToml::parse(&body) {
            Ok(document) => document,
            Err(e) => {
                report.issues.push(ProbeIssue::Parse(e.to_string()));
                return report;
            }
        };

        let mut invalid = match &self.network {
            Some(network) => document.issues_for(network),
            None => document.issues(),
        };
        if !self.require_https {
            invalid.retain(|issue| !matches!(issue, ValidationIssue::ImageNotHttps { .. }));
        }
        if !invalid.is_empty() {
            report.issues.push(ProbeIssue::Invalid(invalid));
        }

        for record in &document.currencies {
            if record.image.is_empty() {
                continue;
            }
            if self.require_https && !record.image.starts_with("https://") {
                // Already reported as a validation issue.
                continue;
            }
            if let Err(reason) = self.check_image(&record.image).await {
                report.issues.push(ProbeIssue::ImageUnreachable {
                    url: record.image.clone(),
                    reason,
                });
            }
        }

        tracing::debug!(url, issues = report.issues.len(), "pi.toml probed");
        report.document = Some(document);
        report
    }

    async fn check_image(&self, url: &str) -> Result<(), String> {
        let response = self
            .http
            .head(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("HTTP {}", response.status().as_u16()))
        }
    }
}

/// Probe `url` with a default HTTPS-only prober.
pub async fn probe(url: &str) -> Result<ProbeReport, MetadataError> {
    Ok(Prober::new(Prober::DEFAULT_TIMEOUT_SECS)?.probe(url).await)
}
