//! The pi.toml document model.

use std::collections::HashSet;

use pitoken_types::{AccountId, Asset, AssetCode, HomeDomain, NetworkId};
use serde::{Deserialize, Serialize};

use crate::error::{MetadataError, ValidationIssue};

/// One token's record. Every field is required by scanners; they default to
/// empty when parsing so that an incomplete document can still be loaded
/// and reported on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    #[serde(default)]
    pub code: String,
    /// Issuer account id, `G...`.
    #[serde(default)]
    pub issuer: String,
    /// Display name of the token.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// HTTPS URL of the token image.
    #[serde(default)]
    pub image: String,
}

impl CurrencyRecord {
    pub fn new(
        code: &AssetCode,
        issuer: &AccountId,
        name: impl Into<String>,
        desc: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            code: code.to_string(),
            issuer: issuer.to_string(),
            name: name.into(),
            desc: desc.into(),
            image: image.into(),
        }
    }

    /// Whether this record describes `asset`.
    pub fn describes(&self, asset: &Asset) -> bool {
        match (asset.code(), asset.issuer()) {
            (Some(code), Some(issuer)) => {
                self.code == code.as_str() && self.issuer == issuer.to_string()
            }
            _ => false,
        }
    }

    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("code", &self.code),
            ("issuer", &self.issuer),
            ("name", &self.name),
            ("desc", &self.desc),
            ("image", &self.image),
        ]
    }
}

/// A pi.toml document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiToml {
    #[serde(
        rename = "NETWORK_PASSPHRASE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_passphrase: Option<String>,

    /// Accounts controlled by the domain owner.
    #[serde(rename = "ACCOUNTS", default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<String>,

    #[serde(rename = "CURRENCIES", default)]
    pub currencies: Vec<CurrencyRecord>,
}

/// Where the document for `domain` must be served.
pub fn well_known_url(domain: &HomeDomain) -> String {
    domain.well_known_url()
}

impl PiToml {
    /// An empty document declaring `network`'s passphrase.
    pub fn for_network(network: &NetworkId) -> Self {
        Self {
            network_passphrase: Some(network.passphrase().to_string()),
            ..Self::default()
        }
    }

    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        Ok(toml::from_str(text)?)
    }

    pub fn render(&self) -> Result<String, MetadataError> {
        Ok(toml::to_string(self)?)
    }

    /// Insert `record`, replacing any record for the same (code, issuer).
    /// The issuer is added to `ACCOUNTS` when that list is in use.
    pub fn upsert(&mut self, record: CurrencyRecord) {
        if !self.accounts.is_empty() && !self.accounts.contains(&record.issuer) {
            self.accounts.push(record.issuer.clone());
        }
        match self
            .currencies
            .iter_mut()
            .find(|existing| existing.code == record.code && existing.issuer == record.issuer)
        {
            Some(existing) => *existing = record,
            None => self.currencies.push(record),
        }
    }

    /// Assets with no record in this document.
    pub fn missing_records(&self, assets: &[Asset]) -> Vec<Asset> {
        assets
            .iter()
            .filter(|asset| !asset.is_native())
            .filter(|asset| !self.currencies.iter().any(|record| record.describes(asset)))
            .cloned()
            .collect()
    }

    /// Every problem a scanner would reject the document for.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.currencies.is_empty() {
            issues.push(ValidationIssue::NoCurrencies);
        }

        let mut seen = HashSet::new();
        for (index, record) in self.currencies.iter().enumerate() {
            for (field, value) in record.fields() {
                if value.trim().is_empty() {
                    issues.push(ValidationIssue::MissingField { index, field });
                }
            }
            if !record.code.is_empty() && AssetCode::new(record.code.as_str()).is_err() {
                issues.push(ValidationIssue::InvalidCode {
                    index,
                    code: record.code.clone(),
                });
            }
            if !record.issuer.is_empty() && record.issuer.parse::<AccountId>().is_err() {
                issues.push(ValidationIssue::InvalidIssuer {
                    index,
                    issuer: record.issuer.clone(),
                });
            }
            if !record.image.is_empty() && !record.image.starts_with("https://") {
                issues.push(ValidationIssue::ImageNotHttps {
                    index,
                    url: record.image.clone(),
                });
            }
            if !self.accounts.is_empty()
                && !record.issuer.is_empty()
                && !self.accounts.contains(&record.issuer)
            {
                issues.push(ValidationIssue::IssuerNotListed {
                    index,
                    issuer: record.issuer.clone(),
                });
            }
            if !seen.insert((record.code.as_str(), record.issuer.as_str())) {
                issues.push(ValidationIssue::Duplicate {
                    code: record.code.clone(),
                    issuer: record.issuer.clone(),
                });
            }
        }
        issues
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(MetadataError::Invalid(issues))
        }
    }

    /// [`PiToml::issues`], plus the passphrase check when the document
    /// declares one.
    pub fn issues_for(&self, network: &NetworkId) -> Vec<ValidationIssue> {
        let mut issues = self.issues();
        if let Some(found) = &self.network_passphrase {
            if found != network.passphrase() {
                issues.push(ValidationIssue::NetworkMismatch {
                    expected: network.passphrase().to_string(),
                    found: found.clone(),
                });
            }
        }
        issues
    }

    pub fn validate_for(&self, network: &NetworkId) -> Result<(), MetadataError> {
        let issues = self.issues_for(network);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(MetadataError::Invalid(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitoken_types::PublicKey;

    fn issuer() -> AccountId {
        AccountId::new(PublicKey([9u8; 32]))
    }

    fn record(code: &str) -> CurrencyRecord {
        CurrencyRecord::new(
            &AssetCode::new(code).unwrap(),
            &issuer(),
            "Test Token",
            "A token for testing",
            "https://example.com/tst.png",
        )
    }

    #[test]
    fn renders_upper_case_sections() {
        let mut doc = PiToml::for_network(&NetworkId::PiTestnet);
        doc.upsert(record("TST"));
        let text = doc.render().unwrap();

        assert!(text.contains("NETWORK_PASSPHRASE = \"Pi Testnet\""));
        assert!(text.contains("[[CURRENCIES]]"));
        assert!(text.contains("code = \"TST\""));
        assert!(text.contains(&format!("issuer = \"{}\"", issuer())));

        let parsed = PiToml::parse(&text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn parses_hand_written_document() {
        let text = format!(
            r#"
NETWORK_PASSPHRASE = "Pi Testnet"

[[CURRENCIES]]
code = "TST"
issuer = "{issuer}"
name = "Test Token"
desc = "A token for testing"
image = "https://example.com/tst.png"
"#,
            issuer = issuer()
        );
        let doc = PiToml::parse(&text).unwrap();
        assert_eq!(doc.currencies.len(), 1);
        assert!(doc.validate_for(&NetworkId::PiTestnet).is_ok());
        assert!(doc.validate_for(&NetworkId::PiMainnet).is_err());
    }

    #[test]
    fn missing_fields_are_reported_not_rejected() {
        let doc = PiToml::parse("[[CURRENCIES]]\ncode = \"TST\"\n").unwrap();
        let issues = doc.issues();
        for field in ["issuer", "name", "desc", "image"] {
            assert!(issues.contains(&ValidationIssue::MissingField { index: 0, field }));
        }
        assert!(!issues.contains(&ValidationIssue::MissingField {
            index: 0,
            field: "code"
        }));
    }

    #[test]
    fn flags_bad_values() {
        let mut bad = record("TST");
        bad.code = "TOO-LONG-CODE!".into();
        bad.issuer = "GNOTANACCOUNT".into();
        bad.image = "http://example.com/tst.png".into();
        let doc = PiToml {
            currencies: vec![bad],
            ..PiToml::default()
        };
        let issues = doc.issues();
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], ValidationIssue::InvalidCode { .. }));
        assert!(matches!(issues[1], ValidationIssue::InvalidIssuer { .. }));
        assert!(matches!(issues[2], ValidationIssue::ImageNotHttps { .. }));
    }

    #[test]
    fn empty_document_is_invalid() {
        assert_eq!(PiToml::default().issues(), vec![ValidationIssue::NoCurrencies]);
    }

    #[test]
    fn duplicates_are_flagged() {
        let doc = PiToml {
            currencies: vec![record("TST"), record("TST")],
            ..PiToml::default()
        };
        assert!(matches!(
            doc.validate(),
            Err(MetadataError::Invalid(issues)) if issues.iter().any(|i| matches!(i, ValidationIssue::Duplicate { .. }))
        ));
    }

    #[test]
    fn upsert_replaces_matching_record() {
        let mut doc = PiToml::default();
        doc.upsert(record("TST"));
        let mut updated = record("TST");
        updated.desc = "Updated".into();
        doc.upsert(updated);
        doc.upsert(record("OTHER"));

        assert_eq!(doc.currencies.len(), 2);
        assert_eq!(doc.currencies[0].desc, "Updated");
    }

    #[test]
    fn upsert_extends_accounts_list() {
        let mut doc = PiToml {
            accounts: vec!["GOTHER".into()],
            ..PiToml::default()
        };
        doc.upsert(record("TST"));
        assert_eq!(doc.accounts, vec!["GOTHER".to_string(), issuer().to_string()]);
    }

    #[test]
    fn coverage_per_code_and_issuer() {
        let mut doc = PiToml::default();
        doc.upsert(record("TST"));
        let tst = Asset::credit(AssetCode::new("TST").unwrap(), issuer());
        let other = Asset::credit(AssetCode::new("OTHER").unwrap(), issuer());
        let foreign = Asset::credit(
            AssetCode::new("TST").unwrap(),
            AccountId::new(PublicKey([1u8; 32])),
        );

        assert_eq!(
            doc.missing_records(&[tst, other.clone(), foreign.clone(), Asset::Native]),
            vec![other, foreign]
        );
    }

    #[test]
    fn well_known_location() {
        let domain = HomeDomain::new("example.com").unwrap();
        assert_eq!(well_known_url(&domain), "https://example.com/.well-known/pi.toml");
    }
}
