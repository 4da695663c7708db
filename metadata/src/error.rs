use std::fmt;

use thiserror::Error;

/// A problem found in a metadata document. `index` is the position of the
/// record in `CURRENCIES`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationIssue {
    NoCurrencies,
    MissingField { index: usize, field: &'static str },
    InvalidCode { index: usize, code: String },
    InvalidIssuer { index: usize, issuer: String },
    ImageNotHttps { index: usize, url: String },
    Duplicate { code: String, issuer: String },
    /// `ACCOUNTS` is present but does not list a record's issuer.
    IssuerNotListed { index: usize, issuer: String },
    NetworkMismatch { expected: String, found: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCurrencies => write!(f, "no [[CURRENCIES]] records"),
            Self::MissingField { index, field } => {
                write!(f, "currency #{index}: missing or empty `{field}`")
            }
            Self::InvalidCode { index, code } => {
                write!(f, "currency #{index}: invalid asset code {code:?}")
            }
            Self::InvalidIssuer { index, issuer } => {
                write!(f, "currency #{index}: issuer {issuer:?} is not a valid account id")
            }
            Self::ImageNotHttps { index, url } => {
                write!(f, "currency #{index}: image {url:?} is not an https URL")
            }
            Self::Duplicate { code, issuer } => {
                write!(f, "duplicate record for {code}:{issuer}")
            }
            Self::IssuerNotListed { index, issuer } => {
                write!(f, "currency #{index}: issuer {issuer} is not listed in ACCOUNTS")
            }
            Self::NetworkMismatch { expected, found } => {
                write!(f, "NETWORK_PASSPHRASE is {found:?}, expected {expected:?}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to parse pi.toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render pi.toml: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid pi.toml: {}", join(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error("failed to create HTTP client: {0}")]
    Http(String),
}

fn join(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
