//! Dual-interpretation resolution of on-chain identifiers.
//!
//! Callers often paste a hex string without knowing whether it names an
//! account or a transaction. The resolver treats the caller's hint as an
//! ordering preference, not a requirement: the claimed kind is fetched
//! first, and if that fails the other kind is tried once. Two failures end
//! resolution with the first failure's message; there is never a third
//! strategy.

use std::fmt;

use crate::ledger::client::LedgerApi;
use crate::ledger::types::{LedgerResult, MoveModule};

/// The two interpretations of a target identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Address,
    Transaction,
}

impl Kind {
    /// The other interpretation.
    pub fn other(self) -> Self {
        match self {
            Kind::Address => Kind::Transaction,
            Kind::Transaction => Kind::Address,
        }
    }

    /// Map a caller-supplied hint to a kind. Absent or unrecognized hints
    /// default to `Address`.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("transaction") => Kind::Transaction,
            _ => Kind::Address,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Address => write!(f, "address"),
            Kind::Transaction => write!(f, "transaction"),
        }
    }
}

/// Outcome of resolving a target identifier.
///
/// Lives for the duration of one request; nothing is cached across calls.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContext {
    /// The identifier was understood as `kind` and yielded `text`.
    ///
    /// `text` may be empty: an account can exist while owning no modules
    /// with ABI data. That is "nothing to analyze", not a failure.
    Found { kind: Kind, text: String },

    /// Both interpretations failed. Carries the first failure's message.
    Unknown { reason: String },
}

/// Resolve a target identifier against the ledger.
///
/// At most two ledger calls: the claimed kind, then its alternate. The
/// second attempt's error is logged but never reported; the caller sees
/// the message from the claimed-kind failure.
pub async fn resolve<L>(ledger: &L, target: &str, hint: Option<&str>) -> ResolvedContext
where
    L: LedgerApi + ?Sized,
{
    let claimed = Kind::from_hint(hint);

    let first_err = match fetch_as(ledger, target, claimed).await {
        Ok(text) => {
            return ResolvedContext::Found {
                kind: claimed,
                text,
            }
        }
        Err(e) => e,
    };

    let alternate = claimed.other();
    tracing::debug!(
        target = %target,
        claimed = %claimed,
        error = %first_err,
        "Claimed kind failed, trying alternate"
    );

    match fetch_as(ledger, target, alternate).await {
        Ok(text) => ResolvedContext::Found {
            kind: alternate,
            text,
        },
        Err(second_err) => {
            tracing::debug!(target = %target, error = %second_err, "Alternate kind also failed");
            ResolvedContext::Unknown {
                reason: first_err.to_string(),
            }
        }
    }
}

async fn fetch_as<L>(ledger: &L, target: &str, kind: Kind) -> LedgerResult<String>
where
    L: LedgerApi + ?Sized,
{
    match kind {
        Kind::Address => Ok(abi_text(&ledger.fetch_modules(target).await?)),
        Kind::Transaction => Ok(ledger.fetch_transaction(target).await?.to_string()),
    }
}

/// Concatenate the ABI of every module that exposes one, joined by newlines.
fn abi_text(modules: &[MoveModule]) -> String {
    modules
        .iter()
        .filter_map(|module| module.abi.as_ref())
        .map(|abi| abi.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
