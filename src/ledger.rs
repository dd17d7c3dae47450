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

//! Ledger service.
//!
//! The [`Ledger`] is the central component that executes deposits,
//! withdrawals, and transfers against the account registry. Every public
//! operation follows the same shape: validate arguments, resolve the
//! account(s), acquire the account lock(s), mutate or snapshot, release.
//!
//! # Locking Discipline
//!
//! - Validation never acquires a lock; malformed input is rejected before
//!   any lookup.
//! - Balance sufficiency is only checked under the account lock, since
//!   the balance can change between validation and lock acquisition.
//! - Transfer locks both accounts in ascending [`AccountId`] order,
//!   whichever direction the money moves. Every thread acquiring two
//!   locks agrees on that order, so no cycle of waiting threads can form.
//! - Critical sections perform no I/O and no blocking calls.

use crate::account::{Account, AccountDetails};
use crate::base::AccountId;
use crate::error::LedgerError;
use crate::history::OutgoingTransfer;
use crate::registry::AccountRegistry;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Concurrent ledger over an [`AccountRegistry`].
///
/// Operations on distinct accounts run in parallel; operations on the
/// same account serialize on that account's lock. A transfer's debit,
/// credit, and history append happen while both account locks are held,
/// so no observer sees a half-applied transfer.
#[derive(Debug, Default)]
pub struct Ledger {
    registry: AccountRegistry,
}

impl Ledger {
    /// Creates a ledger with no accounts.
    pub fn new() -> Self {
        Self {
            registry: AccountRegistry::new(),
        }
    }

    /// Creates a new account with zero balance and returns it.
    pub fn create_account(&self) -> Arc<Account> {
        let account = self.registry.create();
        debug!(id = %account.id(), "account created");
        account
    }

    /// Credits `amount` to the account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] - `amount` is zero or negative.
    /// - [`LedgerError::AccountNotFound`] - `id` was never created.
    pub fn deposit(&self, id: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        let account = self.lookup(id)?;

        account.lock().credit(amount);
        debug!(%id, %amount, "deposit applied");
        Ok(())
    }

    /// Debits `amount` from the account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] - `amount` is zero or negative.
    /// - [`LedgerError::AccountNotFound`] - `id` was never created.
    /// - [`LedgerError::InsufficientFunds`] - balance is below `amount`,
    ///   checked under the account lock.
    pub fn withdraw(&self, id: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        let account = self.lookup(id)?;

        let mut state = account.lock();
        if state.balance() < amount {
            return Err(LedgerError::InsufficientFunds);
        }
        state.debit(amount);
        drop(state);

        debug!(%id, %amount, "withdrawal applied");
        Ok(())
    }

    /// Atomically moves `amount` from one account to another and records
    /// an [`OutgoingTransfer`] on the source.
    ///
    /// Both account locks are acquired in ascending [`AccountId`] order,
    /// regardless of transfer direction. This single global acquisition
    /// order is what makes concurrent opposing transfers deadlock-free.
    /// The debit, credit, and history append all happen while both locks
    /// are held; locks are released in reverse acquisition order.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::SameAccount`] - `from_id == to_id`.
    /// - [`LedgerError::InvalidAmount`] - `amount` is zero or negative.
    /// - [`LedgerError::AccountNotFound`] - either id was never created.
    /// - [`LedgerError::InsufficientFunds`] - source balance is below
    ///   `amount`, checked after both locks are held.
    pub fn transfer(
        &self,
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if from_id == to_id {
            return Err(LedgerError::SameAccount);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let from = self.lookup(from_id)?;
        let to = self.lookup(to_id)?;

        // Lower id locks first, always.
        let (mut from_state, mut to_state);
        if from_id < to_id {
            from_state = from.lock();
            to_state = to.lock();
        } else {
            to_state = to.lock();
            from_state = from.lock();
        }

        // Re-check under both locks; the balance may have moved since
        // validation.
        if from_state.balance() < amount {
            return Err(LedgerError::InsufficientFunds);
        }

        from_state.debit(amount);
        to_state.credit(amount);
        from_state.record_outgoing(OutgoingTransfer::new(to_id, amount, Utc::now()));

        drop(to_state);
        drop(from_state);

        debug!(from = %from_id, to = %to_id, %amount, "transfer applied");
        Ok(())
    }

    /// Returns a consistent snapshot of an account: balance and recent
    /// outgoing transfers read under a single lock hold, so the pair
    /// reflects one instant.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] - `id` was never created.
    pub fn account_details(&self, id: AccountId) -> Result<AccountDetails, LedgerError> {
        let account = self.lookup(id)?;

        let state = account.lock();
        Ok(AccountDetails {
            id,
            balance: state.balance(),
            last_outgoing_transfers: state.recent_outgoing(),
        })
    }

    /// Returns handles to all accounts.
    ///
    /// The set is not a single consistent cut across accounts; each
    /// account is individually consistent.
    pub fn all_accounts(&self) -> Vec<Arc<Account>> {
        self.registry.all()
    }

    fn lookup(&self, id: AccountId) -> Result<Arc<Account>, LedgerError> {
        self.registry
            .lookup(&id)
            .ok_or(LedgerError::AccountNotFound(id))
    }
}
