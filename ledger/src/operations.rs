//! Operation semantics.
//!
//! Each function applies one operation to staged state and returns the
//! failing result code, if any. Callers discard the staged state on failure,
//! so a function may return an error after partially mutating it.

use pitoken_transactions::{ChangeTrustOp, PaymentOp, SetOptionsOp};
use pitoken_types::{AccountId, Amount, Asset, OperationResultCode as Op};

use crate::params::LedgerParams;
use crate::state::{LedgerState, TrustLineEntry};

pub type OpResult = Result<(), Op>;

pub fn change_trust(
    state: &mut LedgerState,
    params: &LedgerParams,
    source: &AccountId,
    op: &ChangeTrustOp,
) -> OpResult {
    let Some(issuer) = op.asset.issuer() else {
        return Err(Op::Malformed);
    };
    if op.limit.stroops() < 0 {
        return Err(Op::Malformed);
    }
    if issuer == source {
        return Err(Op::SelfNotAllowed);
    }
    if state.account(issuer).is_none() {
        return Err(Op::NoIssuer);
    }

    if let Some(existing) = state.trustline(source, &op.asset).copied() {
        if op.limit < existing.balance {
            return Err(Op::InvalidLimit);
        }
        if op.limit.is_zero() {
            state.trustlines.remove(&(*source, op.asset.clone()));
            let account = state.account_mut(source).ok_or(Op::NoSourceAccount)?;
            account.subentry_count = account.subentry_count.saturating_sub(1);
            tracing::debug!(holder = %source, asset = %op.asset, "trustline removed");
        } else if let Some(line) = state.trustline_mut(source, &op.asset) {
            line.limit = op.limit;
        }
        return Ok(());
    }

    if op.limit.is_zero() {
        return Err(Op::InvalidLimit);
    }
    let account = state.account_mut(source).ok_or(Op::NoSourceAccount)?;
    if account.balance < params.minimum_balance(account.subentry_count + 1) {
        return Err(Op::LowReserve);
    }
    account.subentry_count += 1;
    state.trustlines.insert(
        (*source, op.asset.clone()),
        TrustLineEntry {
            balance: Amount::ZERO,
            limit: op.limit,
        },
    );
    tracing::debug!(holder = %source, asset = %op.asset, limit = %op.limit, "trustline created");
    Ok(())
}

pub fn payment(
    state: &mut LedgerState,
    params: &LedgerParams,
    source: &AccountId,
    op: &PaymentOp,
) -> OpResult {
    if !op.amount.is_positive() {
        return Err(Op::Malformed);
    }
    if state.account(&op.destination).is_none() {
        return Err(Op::NoDestination);
    }
    match &op.asset {
        Asset::Native => native_payment(state, params, source, op),
        Asset::Credit { issuer, .. } => credit_payment(state, source, issuer, op),
    }
}

fn native_payment(
    state: &mut LedgerState,
    params: &LedgerParams,
    source: &AccountId,
    op: &PaymentOp,
) -> OpResult {
    let sender = state.account_mut(source).ok_or(Op::NoSourceAccount)?;
    let remaining = sender.balance.checked_sub(op.amount).ok_or(Op::Underfunded)?;
    if remaining < params.minimum_balance(sender.subentry_count) {
        return Err(Op::Underfunded);
    }
    sender.balance = remaining;

    let receiver = state.account_mut(&op.destination).ok_or(Op::NoDestination)?;
    receiver.balance = receiver.balance.checked_add(op.amount).ok_or(Op::LineFull)?;
    Ok(())
}

fn credit_payment(
    state: &mut LedgerState,
    source: &AccountId,
    issuer: &AccountId,
    op: &PaymentOp,
) -> OpResult {
    if state.account(issuer).is_none() {
        return Err(Op::NoIssuer);
    }

    // The issuer creates supply out of nothing; anyone else spends a balance.
    if source != issuer {
        let line = state
            .trustline_mut(source, &op.asset)
            .ok_or(Op::SrcNoTrust)?;
        line.balance = line.balance.checked_sub(op.amount).ok_or(Op::Underfunded)?;
        if line.balance.stroops() < 0 {
            return Err(Op::Underfunded);
        }
    }

    // Paid back to the issuer, the amount leaves circulation.
    if op.destination != *issuer {
        let line = state
            .trustline_mut(&op.destination, &op.asset)
            .ok_or(Op::NoTrust)?;
        let credited = line.balance.checked_add(op.amount).ok_or(Op::LineFull)?;
        if credited > line.limit {
            return Err(Op::LineFull);
        }
        line.balance = credited;
    }
    Ok(())
}

pub fn set_options(state: &mut LedgerState, source: &AccountId, op: &SetOptionsOp) -> OpResult {
    let account = state.account_mut(source).ok_or(Op::NoSourceAccount)?;
    account.home_domain = if op.home_domain.is_cleared() {
        None
    } else {
        Some(op.home_domain.clone())
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AccountEntry;
    use pitoken_types::{AssetCode, HomeDomain, PublicKey};

    fn account(byte: u8) -> AccountId {
        AccountId::new(PublicKey([byte; 32]))
    }

    fn tst() -> Asset {
        Asset::credit(AssetCode::new("TST").unwrap(), account(9))
    }

    fn units(n: i64) -> Amount {
        Amount::from_units(n).unwrap()
    }

    fn state_with(ids: &[u8]) -> LedgerState {
        let mut state = LedgerState::default();
        for &byte in ids {
            state.accounts.insert(
                account(byte),
                AccountEntry {
                    id: account(byte),
                    balance: units(100),
                    sequence: 0,
                    home_domain: None,
                    subentry_count: 0,
                },
            );
        }
        state
    }

    fn pay(to: AccountId, amount: Amount) -> PaymentOp {
        PaymentOp {
            destination: to,
            asset: tst(),
            amount,
        }
    }

    #[test]
    fn trust_then_mint() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);
        change_trust(&mut state, &params, &account(1), &ChangeTrustOp::unlimited(tst())).unwrap();
        assert_eq!(state.account(&account(1)).unwrap().subentry_count, 1);

        payment(&mut state, &params, &account(9), &pay(account(1), units(1000))).unwrap();
        assert_eq!(state.trustline(&account(1), &tst()).unwrap().balance, units(1000));
        assert!(state.trustline(&account(9), &tst()).is_none());
    }

    #[test]
    fn change_trust_rejections() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);

        let native = ChangeTrustOp::unlimited(Asset::Native);
        assert_eq!(change_trust(&mut state, &params, &account(1), &native), Err(Op::Malformed));

        let negative = ChangeTrustOp::with_limit(tst(), Amount::from_stroops(-1));
        assert_eq!(change_trust(&mut state, &params, &account(1), &negative), Err(Op::Malformed));

        let own = ChangeTrustOp::unlimited(tst());
        assert_eq!(change_trust(&mut state, &params, &account(9), &own), Err(Op::SelfNotAllowed));

        let ghost = ChangeTrustOp::unlimited(Asset::credit(AssetCode::new("TST").unwrap(), account(5)));
        assert_eq!(change_trust(&mut state, &params, &account(1), &ghost), Err(Op::NoIssuer));

        let zero = ChangeTrustOp::remove(tst());
        assert_eq!(change_trust(&mut state, &params, &account(1), &zero), Err(Op::InvalidLimit));
    }

    #[test]
    fn limit_cannot_drop_below_balance() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);
        change_trust(&mut state, &params, &account(1), &ChangeTrustOp::unlimited(tst())).unwrap();
        payment(&mut state, &params, &account(9), &pay(account(1), units(50))).unwrap();

        let lower = ChangeTrustOp::with_limit(tst(), units(10));
        assert_eq!(change_trust(&mut state, &params, &account(1), &lower), Err(Op::InvalidLimit));
        let remove = ChangeTrustOp::remove(tst());
        assert_eq!(change_trust(&mut state, &params, &account(1), &remove), Err(Op::InvalidLimit));

        let exact = ChangeTrustOp::with_limit(tst(), units(50));
        change_trust(&mut state, &params, &account(1), &exact).unwrap();
        assert_eq!(state.trustline(&account(1), &tst()).unwrap().limit, units(50));
    }

    #[test]
    fn empty_line_can_be_removed() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);
        change_trust(&mut state, &params, &account(1), &ChangeTrustOp::unlimited(tst())).unwrap();
        change_trust(&mut state, &params, &account(1), &ChangeTrustOp::remove(tst())).unwrap();
        assert!(state.trustline(&account(1), &tst()).is_none());
        assert_eq!(state.account(&account(1)).unwrap().subentry_count, 0);
    }

    #[test]
    fn new_line_needs_reserve() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);
        state.account_mut(&account(1)).unwrap().balance = params.minimum_balance(0);
        assert_eq!(
            change_trust(&mut state, &params, &account(1), &ChangeTrustOp::unlimited(tst())),
            Err(Op::LowReserve)
        );
    }

    #[test]
    fn payment_without_trustline_fails() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);
        assert_eq!(
            payment(&mut state, &params, &account(9), &pay(account(1), units(1))),
            Err(Op::NoTrust)
        );
        assert_eq!(
            payment(&mut state, &params, &account(9), &pay(account(3), units(1))),
            Err(Op::NoDestination)
        );
    }

    #[test]
    fn payment_respects_limit_and_balance() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 2, 9]);
        let limited = ChangeTrustOp::with_limit(tst(), units(10));
        change_trust(&mut state, &params, &account(1), &limited).unwrap();
        change_trust(&mut state, &params, &account(2), &ChangeTrustOp::unlimited(tst())).unwrap();

        assert_eq!(
            payment(&mut state, &params, &account(9), &pay(account(1), units(11))),
            Err(Op::LineFull)
        );
        payment(&mut state, &params, &account(9), &pay(account(1), units(10))).unwrap();

        assert_eq!(
            payment(&mut state, &params, &account(1), &pay(account(2), units(11))),
            Err(Op::Underfunded)
        );
        assert_eq!(
            payment(&mut state, &params, &account(2), &pay(account(1), units(1))),
            Err(Op::Underfunded)
        );
        assert_eq!(
            payment(&mut state, &params, &account(2), &pay(account(1), Amount::ZERO)),
            Err(Op::Malformed)
        );
    }

    #[test]
    fn non_holder_cannot_send() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 2, 9]);
        change_trust(&mut state, &params, &account(2), &ChangeTrustOp::unlimited(tst())).unwrap();
        assert_eq!(
            payment(&mut state, &params, &account(1), &pay(account(2), units(1))),
            Err(Op::SrcNoTrust)
        );
    }

    #[test]
    fn paying_issuer_burns() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 9]);
        change_trust(&mut state, &params, &account(1), &ChangeTrustOp::unlimited(tst())).unwrap();
        payment(&mut state, &params, &account(9), &pay(account(1), units(10))).unwrap();
        payment(&mut state, &params, &account(1), &pay(account(9), units(4))).unwrap();
        assert_eq!(state.asset_record(&tst()).unwrap().amount, units(6));
    }

    #[test]
    fn native_payment_keeps_reserve() {
        let params = LedgerParams::default();
        let mut state = state_with(&[1, 2]);
        let all = PaymentOp {
            destination: account(2),
            asset: Asset::Native,
            amount: units(100),
        };
        assert_eq!(payment(&mut state, &params, &account(1), &all), Err(Op::Underfunded));

        let some = PaymentOp {
            amount: units(99),
            ..all
        };
        payment(&mut state, &params, &account(1), &some).unwrap();
        assert_eq!(state.account(&account(2)).unwrap().balance, units(199));
    }

    #[test]
    fn set_options_replaces_domain() {
        let mut state = state_with(&[9]);
        for domain in ["a.example.com", "b.example.com"] {
            let op = SetOptionsOp {
                home_domain: HomeDomain::new(domain).unwrap(),
            };
            set_options(&mut state, &account(9), &op).unwrap();
            assert_eq!(
                state.account(&account(9)).unwrap().home_domain.as_ref().unwrap().as_str(),
                domain
            );
        }
        let clear = SetOptionsOp {
            home_domain: HomeDomain::cleared(),
        };
        set_options(&mut state, &account(9), &clear).unwrap();
        assert!(state.account(&account(9)).unwrap().home_domain.is_none());
    }
}
