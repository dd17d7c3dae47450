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

//! Outgoing transfer records and the bounded per-account history.
//!
//! Each account keeps the last [`HISTORY_CAPACITY`] transfers it sent,
//! newest first. Once full, recording a new transfer evicts the oldest
//! entry (ring semantics, O(1) per insert).

use crate::base::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::VecDeque;

/// Maximum number of outgoing transfers retained per account.
pub const HISTORY_CAPACITY: usize = 50;

/// A completed outgoing transfer, immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingTransfer {
    /// Destination account.
    pub to_account_id: AccountId,
    /// Transferred amount, always positive.
    pub amount: Decimal,
    /// Wall-clock instant at which the transfer was recorded.
    pub timestamp: DateTime<Utc>,
}

impl OutgoingTransfer {
    pub fn new(to_account_id: AccountId, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            to_account_id,
            amount,
            timestamp,
        }
    }
}

/// Bounded newest-first ring of [`OutgoingTransfer`] records.
///
/// Not synchronized; it lives inside the owning account's mutex and is
/// only touched while that lock is held.
#[derive(Debug)]
pub(crate) struct TransferHistory {
    entries: VecDeque<OutgoingTransfer>,
}

impl TransferHistory {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Inserts at the head, evicting the oldest entry once full.
    pub(crate) fn record(&mut self, transfer: OutgoingTransfer) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_back();
        }
        self.entries.push_front(transfer);
    }

    /// Returns the history as an owned sequence, newest first.
    pub(crate) fn snapshot(&self) -> Vec<OutgoingTransfer> {
        self.entries.iter().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transfer(amount: Decimal) -> OutgoingTransfer {
        OutgoingTransfer::new(AccountId::new(), amount, Utc::now())
    }

    #[test]
    fn empty_history_has_empty_snapshot() {
        let history = TransferHistory::new();
        assert_eq!(history.len(), 0);
        assert!(history.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_newest_first() {
        let mut history = TransferHistory::new();
        history.record(transfer(dec!(1.00)));
        history.record(transfer(dec!(2.00)));
        history.record(transfer(dec!(3.00)));

        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].amount, dec!(3.00));
        assert_eq!(snapshot[1].amount, dec!(2.00));
        assert_eq!(snapshot[2].amount, dec!(1.00));
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut history = TransferHistory::new();
        for i in 0..(HISTORY_CAPACITY + 25) {
            history.record(transfer(Decimal::from(i as i64 + 1)));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn oldest_entry_is_evicted_first() {
        let mut history = TransferHistory::new();

        // Distinct amounts 1..=51; the first (amount 1) must be evicted.
        for i in 1..=(HISTORY_CAPACITY as i64 + 1) {
            history.record(transfer(Decimal::from(i)));
        }

        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), HISTORY_CAPACITY);
        assert_eq!(snapshot[0].amount, Decimal::from(HISTORY_CAPACITY as i64 + 1));
        assert_eq!(snapshot.last().unwrap().amount, dec!(2));
        assert!(snapshot.iter().all(|t| t.amount != dec!(1)));
    }
}
