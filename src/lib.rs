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

//! # Bank Ledger
//!
//! This library provides a concurrent in-memory ledger for maintaining
//! account balances and executing deposits, withdrawals, and atomic
//! transfers between accounts.
//!
//! ## Core Components
//!
//! - [`Ledger`]: Central service executing validated, locked operations
//! - [`AccountRegistry`]: Concurrency-safe id → account store
//! - [`Account`]: Account entity with a private per-account lock
//! - [`LedgerError`]: Error types for failed operations
//!
//! ## Example
//!
//! ```
//! use bank_ledger_rs::Ledger;
//! use rust_decimal_macros::dec;
//!
//! let ledger = Ledger::new();
//! let a = ledger.create_account();
//! let b = ledger.create_account();
//!
//! ledger.deposit(a.id(), dec!(100.00)).unwrap();
//! ledger.transfer(a.id(), b.id(), dec!(40.00)).unwrap();
//!
//! assert_eq!(a.balance(), dec!(60.00));
//! assert_eq!(b.balance(), dec!(40.00));
//!
//! let details = ledger.account_details(a.id()).unwrap();
//! assert_eq!(details.last_outgoing_transfers.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Accounts live behind individual locks, so operations on distinct
//! accounts run in parallel. Transfers acquire both account locks in a
//! fixed global order (ascending [`AccountId`]), which rules out
//! deadlock between concurrent opposing transfers.

pub mod account;
mod base;
pub mod error;
mod history;
mod ledger;
mod registry;

pub use account::{Account, AccountDetails};
pub use base::AccountId;
pub use error::LedgerError;
pub use history::{HISTORY_CAPACITY, OutgoingTransfer};
pub use ledger::Ledger;
pub use registry::AccountRegistry;
