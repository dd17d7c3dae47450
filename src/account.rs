// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Account entity.
//!
//! An [`Account`] pairs an immutable identifier with a mutex-guarded
//! [`AccountState`] (balance plus bounded outgoing-transfer history).
//! The mutex is private to the account and never shared across accounts;
//! all mutation goes through [`Ledger`](crate::Ledger) operations that
//! hold it.

use crate::base::AccountId;
use crate::history::{OutgoingTransfer, TransferHistory};
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Mutable account state, only reachable through the account's mutex.
#[derive(Debug)]
pub(crate) struct AccountState {
    balance: Decimal,
    history: TransferHistory,
}

impl AccountState {
    fn new() -> Self {
        Self {
            balance: Decimal::ZERO,
            history: TransferHistory::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.balance
    }

    /// Increases the balance. Caller has validated `amount > 0`.
    pub(crate) fn credit(&mut self, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO);
        self.balance += amount;
        self.assert_invariants();
    }

    /// Decreases the balance. Caller has validated `amount > 0` and
    /// checked `amount <= balance` under this lock.
    pub(crate) fn debit(&mut self, amount: Decimal) {
        debug_assert!(amount > Decimal::ZERO);
        debug_assert!(amount <= self.balance);
        self.balance -= amount;
        self.assert_invariants();
    }

    /// Records an outgoing transfer at the head of the history.
    pub(crate) fn record_outgoing(&mut self, transfer: OutgoingTransfer) {
        self.history.record(transfer);
    }

    /// Returns the outgoing-transfer history, newest first.
    pub(crate) fn recent_outgoing(&self) -> Vec<OutgoingTransfer> {
        self.history.snapshot()
    }
}

/// Ledger account: immutable id plus lock-guarded balance and history.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    state: Mutex<AccountState>,
}

impl Account {
    /// Creates an account with a fresh identifier, zero balance, and an
    /// empty history.
    pub(crate) fn new() -> Self {
        Self {
            id: AccountId::new(),
            state: Mutex::new(AccountState::new()),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the current balance.
    pub fn balance(&self) -> Decimal {
        self.state.lock().balance
    }

    /// Acquires this account's lock, blocking until it is available.
    ///
    /// Code that locks two accounts must acquire the lower [`AccountId`]
    /// first; see [`Ledger::transfer`](crate::Ledger::transfer).
    pub(crate) fn lock(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock()
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Taken under the lock so id/balance reflect one instant.
        let state = self.state.lock();
        let mut out = serializer.serialize_struct("Account", 2)?;
        out.serialize_field("id", &self.id)?;
        out.serialize_field("balance", &state.balance)?;
        out.end()
    }
}

/// Consistent snapshot of an account: balance and recent outgoing
/// transfers read under a single lock hold.
#[derive(Debug, Clone, Serialize)]
pub struct AccountDetails {
    pub id: AccountId,
    pub balance: Decimal,
    /// Newest first, at most [`HISTORY_CAPACITY`](crate::HISTORY_CAPACITY)
    /// entries.
    pub last_outgoing_transfers: Vec<OutgoingTransfer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    // === AccountState internal tests ===
    // These exercise the private mutators directly, without the lock.

    #[test]
    fn new_state_is_empty() {
        let state = AccountState::new();
        assert_eq!(state.balance(), Decimal::ZERO);
        assert!(state.recent_outgoing().is_empty());
    }

    #[test]
    fn credit_increases_balance() {
        let mut state = AccountState::new();
        state.credit(dec!(100.00));
        state.credit(dec!(0.50));
        assert_eq!(state.balance(), dec!(100.50));
    }

    #[test]
    fn debit_decreases_balance() {
        let mut state = AccountState::new();
        state.credit(dec!(100.00));
        state.debit(dec!(30.00));
        assert_eq!(state.balance(), dec!(70.00));
    }

    #[test]
    fn record_outgoing_appends_newest_first() {
        let mut state = AccountState::new();
        let to = AccountId::new();
        state.record_outgoing(OutgoingTransfer::new(to, dec!(1.00), Utc::now()));
        state.record_outgoing(OutgoingTransfer::new(to, dec!(2.00), Utc::now()));

        let recent = state.recent_outgoing();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].amount, dec!(2.00));
        assert_eq!(recent[1].amount, dec!(1.00));
    }

    // === Account tests ===

    #[test]
    fn new_account_has_zero_balance() {
        let account = Account::new();
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn accounts_get_distinct_ids() {
        let a = Account::new();
        let b = Account::new();
        assert_ne!(a.id(), b.id());
    }

    // === Serialization tests ===

    #[test]
    fn serializes_id_and_balance() {
        let account = Account::new();
        account.lock().credit(dec!(12.34));

        let json = serde_json::to_string(&account).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["id"].as_str().unwrap(), account.id().to_string());
        // rust_decimal's serde-str feature serializes amounts as strings.
        assert_eq!(parsed["balance"].as_str().unwrap(), "12.34");
    }

    #[test]
    fn details_serialize_with_transfer_fields() {
        let to = AccountId::new();
        let details = AccountDetails {
            id: AccountId::new(),
            balance: dec!(60.00),
            last_outgoing_transfers: vec![OutgoingTransfer::new(to, dec!(40.00), Utc::now())],
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&details).unwrap()).unwrap();

        assert_eq!(parsed["balance"].as_str().unwrap(), "60.00");
        let transfers = parsed["last_outgoing_transfers"].as_array().unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0]["to_account_id"].as_str().unwrap(), to.to_string());
        assert_eq!(transfers[0]["amount"].as_str().unwrap(), "40.00");
        assert!(transfers[0]["timestamp"].is_string());
    }
}
