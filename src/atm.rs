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

//! ATM façade.
//!
//! An [`Atm`] borrows one account for its whole lifetime and forwards
//! operations to it. Failures never propagate out of the ATM: each outcome is
//! written as a one-line message, successes to the out stream and failures as
//! `ERROR: <message>` to the err stream.

use crate::account::Account;
use crate::{AccountError, Transaction};
use std::io::{self, Stderr, Stdout, Write};

/// Non-owning handle over a single [`Account`].
///
/// The borrow ties the ATM's lifetime to the account's, so an ATM can never
/// outlive the account it serves.
pub struct Atm<'a, O = Stdout, E = Stderr> {
    account: &'a mut Account,
    out: O,
    err: E,
}

impl<'a> Atm<'a> {
    /// ATM printing to the process's stdout and stderr.
    pub fn new(account: &'a mut Account) -> Self {
        Self::with_output(account, io::stdout(), io::stderr())
    }
}

impl<'a, O: Write, E: Write> Atm<'a, O, E> {
    pub fn with_output(account: &'a mut Account, out: O, err: E) -> Self {
        Self { account, out, err }
    }

    pub fn account(&self) -> &Account {
        self.account
    }

    pub fn balance(&self) -> f64 {
        self.account.balance()
    }

    /// Deposits `amount`, returning the outcome if it was accepted.
    pub fn add_amount(&mut self, amount: f64) -> Option<Transaction> {
        let result = self.account.deposit(amount);
        self.report("deposit", result)
    }

    /// Withdraws `amount`, returning the outcome if it was accepted.
    pub fn withdraw_amount(&mut self, amount: f64) -> Option<Transaction> {
        let result = self.account.withdraw(amount);
        self.report("withdraw", result)
    }

    /// Runs the behaviour particular to the bound account's variant.
    ///
    /// Savings accounts get one period of interest; current accounts have
    /// nothing to do and return `None` without output.
    pub fn apply_specific_behavior(&mut self) -> Option<Transaction> {
        let result = self.account.as_interest_bearing_mut()?.apply_interest();
        self.report("interest", result)
    }

    /// Releases the output streams.
    pub fn into_output(self) -> (O, E) {
        (self.out, self.err)
    }

    fn report(
        &mut self,
        operation: &'static str,
        result: Result<Transaction, AccountError>,
    ) -> Option<Transaction> {
        match result {
            Ok(transaction) => {
                tracing::debug!(
                    account = %self.account.number(),
                    operation,
                    amount = transaction.amount(),
                    fee = transaction.fee(),
                    balance = transaction.balance(),
                    "atm operation applied"
                );
                // Display output is best effort; a closed stream must not undo the operation.
                let _ = writeln!(self.out, "{transaction}");
                Some(transaction)
            }
            Err(error) => {
                tracing::warn!(
                    account = %self.account.number(),
                    operation,
                    %error,
                    "atm operation rejected"
                );
                let _ = writeln!(self.err, "ERROR: {error}");
                None
            }
        }
    }
}
