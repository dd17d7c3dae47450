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

//! Error types for ledger operations.

use crate::base::AccountId;
use thiserror::Error;

/// Ledger operation errors.
///
/// Every error is raised before any mutation takes place, so a failed
/// operation leaves all account balances and histories untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Transfer source and destination are the same account
    #[error("cannot transfer to the same account")]
    SameAccount,

    /// Referenced account identifier does not exist
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// Withdrawal or transfer exceeds the source account's balance
    #[error("insufficient funds")]
    InsufficientFunds,
}
