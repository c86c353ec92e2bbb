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

//! Live-account counting.
//!
//! An [`AccountCounter`] is handed to accounts at construction. Each tracked
//! account holds a guard that bumps the count when it is created and drops it
//! again when the account is destroyed, whichever way that happens.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared count of constructed-but-not-destroyed accounts.
///
/// Only accounts that report to this counter are counted: those opened with
/// [`AccountBuilder::tracked_by`](crate::AccountBuilder::tracked_by), and
/// untracked accounts from the moment a [`BankingSystem`](crate::BankingSystem)
/// using this counter adopts them. An account opened without a counter and
/// never added to a registry is not counted anywhere.
///
/// Cloning yields another handle to the same count.
#[derive(Debug, Clone, Default)]
pub struct AccountCounter {
    live: Arc<AtomicUsize>,
}

impl AccountCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live accounts tracked by this counter.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Returns `true` if both handles share the same count.
    pub fn same_as(&self, other: &AccountCounter) -> bool {
        Arc::ptr_eq(&self.live, &other.live)
    }

    pub(crate) fn register(&self) -> LiveAccount {
        self.live.fetch_add(1, Ordering::SeqCst);
        LiveAccount {
            live: Arc::clone(&self.live),
        }
    }
}

/// Guard owned by a tracked account.
#[derive(Debug)]
pub(crate) struct LiveAccount {
    live: Arc<AtomicUsize>,
}

impl LiveAccount {
    pub(crate) fn counter(&self) -> AccountCounter {
        AccountCounter {
            live: Arc::clone(&self.live),
        }
    }
}

impl Drop for LiveAccount {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
