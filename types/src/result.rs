//! Transaction and operation result codes reported by the ledger.
//!
//! The string forms are the ones Horizon returns under
//! `extras.result_codes`, so rejections read the same whether they come from
//! a live server or the in-memory reference ledger.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Coarse classification of a rejection, used to decide what the operator
/// has to fix before resubmitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid asset code, amount or other operation field.
    MalformedOperation,
    /// Missing trustline, insufficient limit, reserve or fee.
    PreconditionFailure,
    /// Sequence number mismatch or expired time bounds: reload and rebuild.
    StaleState,
    /// Wrong key, wrong network or malformed signature.
    SignatureFailure,
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedOperation => "malformed-operation",
            Self::PreconditionFailure => "precondition-failure",
            Self::StaleState => "stale-state",
            Self::SignatureFailure => "signature-failure",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a result-code enum with a string form and an `Other` fallback
/// for codes this crate does not know about.
macro_rules! result_codes {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(code) => code,
                }
            }

            /// Parse a wire string; unknown codes become `Other`.
            pub fn from_code(s: &str) -> Self {
                match s {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_code(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_code(&s))
            }
        }
    };
}

result_codes! {
    /// Transaction-level result.
    TxResultCode {
        Success => "tx_success",
        Failed => "tx_failed",
        TooEarly => "tx_too_early",
        TooLate => "tx_too_late",
        MissingOperation => "tx_missing_operation",
        BadSeq => "tx_bad_seq",
        BadAuth => "tx_bad_auth",
        InsufficientBalance => "tx_insufficient_balance",
        NoAccount => "tx_no_source_account",
        InsufficientFee => "tx_insufficient_fee",
        BadAuthExtra => "tx_bad_auth_extra",
        InternalError => "tx_internal_error",
        Malformed => "tx_malformed",
    }
}

result_codes! {
    /// Operation-level result, reported for each operation of a
    /// `tx_failed` transaction.
    OperationResultCode {
        Success => "op_success",
        Malformed => "op_malformed",
        Underfunded => "op_underfunded",
        SrcNoTrust => "op_src_no_trust",
        SrcNotAuthorized => "op_src_not_authorized",
        NoDestination => "op_no_destination",
        NoTrust => "op_no_trust",
        NotAuthorized => "op_not_authorized",
        LineFull => "op_line_full",
        NoIssuer => "op_no_issuer",
        InvalidLimit => "op_invalid_limit",
        LowReserve => "op_low_reserve",
        SelfNotAllowed => "op_self_not_allowed",
        InvalidHomeDomain => "op_invalid_home_domain",
        BadAuth => "op_bad_auth",
        NoSourceAccount => "op_no_source_account",
    }
}

impl TxResultCode {
    /// Category of a transaction-level code. `tx_failed` defers to the
    /// operation codes, so it maps to `Other` here.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BadSeq | Self::TooEarly | Self::TooLate => ErrorCategory::StaleState,
            Self::BadAuth | Self::BadAuthExtra => ErrorCategory::SignatureFailure,
            Self::Malformed | Self::MissingOperation => ErrorCategory::MalformedOperation,
            Self::InsufficientBalance | Self::InsufficientFee | Self::NoAccount => {
                ErrorCategory::PreconditionFailure
            }
            Self::Success | Self::Failed | Self::InternalError | Self::Other(_) => {
                ErrorCategory::Other
            }
        }
    }
}

impl OperationResultCode {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Malformed | Self::InvalidHomeDomain => ErrorCategory::MalformedOperation,
            Self::BadAuth => ErrorCategory::SignatureFailure,
            Self::Success | Self::Other(_) => ErrorCategory::Other,
            Self::Underfunded
            | Self::SrcNoTrust
            | Self::SrcNotAuthorized
            | Self::NoDestination
            | Self::NoTrust
            | Self::NotAuthorized
            | Self::LineFull
            | Self::NoIssuer
            | Self::InvalidLimit
            | Self::LowReserve
            | Self::SelfNotAllowed
            | Self::NoSourceAccount => ErrorCategory::PreconditionFailure,
        }
    }
}
