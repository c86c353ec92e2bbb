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

//! Outcomes of successful account operations.
//!
//! Accounts never print. They hand back a [`Transaction`] describing what was
//! applied, and the caller decides how to present it. The `Display` impl gives
//! the customary one-line summary used by the ATM.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    Deposit {
        amount: f64,
        fee: f64,
        balance: f64,
    },
    Withdrawal {
        amount: f64,
        fee: f64,
        balance: f64,
    },
    Interest {
        interest: f64,
        balance: f64,
    },
}

impl Transaction {
    /// Requested amount, or the interest credited.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Deposit { amount, .. } => *amount,
            Self::Withdrawal { amount, .. } => *amount,
            Self::Interest { interest, .. } => *interest,
        }
    }

    pub fn fee(&self) -> f64 {
        match self {
            Self::Deposit { fee, .. } => *fee,
            Self::Withdrawal { fee, .. } => *fee,
            Self::Interest { .. } => 0.0,
        }
    }

    /// Balance right after the operation.
    pub fn balance(&self) -> f64 {
        match self {
            Self::Deposit { balance, .. } => *balance,
            Self::Withdrawal { balance, .. } => *balance,
            Self::Interest { balance, .. } => *balance,
        }
    }

    /// Signed change applied to the balance.
    pub fn net(&self) -> f64 {
        match self {
            Self::Deposit { amount, fee, .. } => amount - fee,
            Self::Withdrawal { amount, fee, .. } => -(amount + fee),
            Self::Interest { interest, .. } => *interest,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit {
                amount, balance, ..
            } => write!(f, "Deposited: {amount}. New balance: {balance}"),
            Self::Withdrawal {
                amount, balance, ..
            } => write!(f, "Withdrew: {amount}. Remaining balance: {balance}"),
            Self::Interest { interest, balance } => {
                write!(f, "Interest Applied: {interest}, New Balance: {balance}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_summary() {
        let tx = Transaction::Deposit {
            amount: 200.0,
            fee: 0.0,
            balance: 700.0,
        };
        assert_eq!(tx.to_string(), "Deposited: 200. New balance: 700");
    }

    #[test]
    fn withdrawal_summary() {
        let tx = Transaction::Withdrawal {
            amount: 100.0,
            fee: 0.0,
            balance: 600.0,
        };
        assert_eq!(tx.to_string(), "Withdrew: 100. Remaining balance: 600");
    }

    #[test]
    fn interest_summary() {
        let tx = Transaction::Interest {
            interest: 50.0,
            balance: 1050.0,
        };
        assert_eq!(tx.to_string(), "Interest Applied: 50, New Balance: 1050");
    }

    #[test]
    fn net_change_accounts_for_fees() {
        let deposit = Transaction::Deposit {
            amount: 100.0,
            fee: 2.0,
            balance: 98.0,
        };
        let withdrawal = Transaction::Withdrawal {
            amount: 100.0,
            fee: 2.0,
            balance: -4.0,
        };
        assert_eq!(deposit.net(), 98.0);
        assert_eq!(withdrawal.net(), -102.0);
        assert_eq!(withdrawal.fee(), 2.0);
        assert_eq!(withdrawal.amount(), 100.0);
    }
}
