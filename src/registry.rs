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

//! Concurrent account store.
//!
//! The registry owns every [`Account`] and maps id to account through a
//! [`DashMap`], so creation and lookup never contend on unrelated
//! accounts. An id, once published, is never reassigned or removed.

use crate::account::Account;
use crate::base::AccountId;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrency-safe id → [`Account`] store.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Allocates a new account with a fresh id and zero balance,
    /// publishes it, and returns a handle to it.
    ///
    /// The account is visible to any subsequent [`lookup`](Self::lookup)
    /// of its id, from any thread.
    pub fn create(&self) -> Arc<Account> {
        let account = Arc::new(Account::new());
        self.accounts.insert(account.id(), Arc::clone(&account));
        account
    }

    /// Returns the account for `id`, or `None` if it was never created.
    pub fn lookup(&self, id: &AccountId) -> Option<Arc<Account>> {
        self.accounts.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns handles to all currently known accounts.
    ///
    /// The enumeration is not atomic with respect to concurrent creates;
    /// each account is still individually consistent.
    pub fn all(&self) -> Vec<Arc<Account>> {
        self.accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Number of accounts created so far.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
