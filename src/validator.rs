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

//! Amount and balance predicates shared by every account variant.

/// Returns `true` if `amount` may be deposited or withdrawn.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Returns `true` if `amount` can be taken from `balance` without going negative.
pub fn has_enough_balance(balance: f64, amount: f64) -> bool {
    has_enough_balance_within(balance, amount, 0.0)
}

/// Returns `true` if `amount <= balance + allowance`.
///
/// A positive `allowance` lets the balance dip below zero (overdraft); a
/// negative one keeps it above a floor (minimum balance). The comparison is
/// made on the resulting balance so it agrees exactly with the value an
/// account would store.
pub fn has_enough_balance_within(balance: f64, amount: f64, allowance: f64) -> bool {
    balance - amount >= -allowance
}
