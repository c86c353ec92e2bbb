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

//! Account registry.
//!
//! The [`BankingSystem`] owns every account added to it and keeps them in
//! insertion order. Lookups compare account numbers exactly and return the
//! first match, so a duplicate number shadows nothing that was added earlier.
//!
//! Accounts added to the system are counted by its [`AccountCounter`] unless
//! they already report to another one. Removing an account hands ownership
//! back to the caller; the count drops when that account is finally dropped.

use crate::account::{Account, AccountBuilder};
use crate::base::{AccountNumber, AccountType};
use crate::counter::AccountCounter;
use crate::AccountError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::ser::{Error as _, Serialize, SerializeStruct, Serializer};

/// Registry owning a collection of accounts.
#[derive(Debug, Default)]
pub struct BankingSystem {
    accounts: Vec<Account>,
    counter: AccountCounter,
}

impl BankingSystem {
    /// Creates an empty registry with its own counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that counts its accounts in `counter`.
    pub fn with_counter(counter: AccountCounter) -> Self {
        Self {
            accounts: Vec::new(),
            counter,
        }
    }

    pub fn counter(&self) -> &AccountCounter {
        &self.counter
    }

    /// Number of live accounts known to this registry's counter.
    pub fn live_accounts(&self) -> usize {
        self.counter.live()
    }

    /// Takes ownership of `account`, appending it after every existing one.
    pub fn add_account(&mut self, mut account: Account) -> &mut Account {
        account.track(&self.counter);
        tracing::debug!(
            account = %account.number(),
            kind = %account.account_type(),
            balance = account.balance(),
            "account added"
        );
        self.accounts.push(account);
        let last = self.accounts.len() - 1;
        &mut self.accounts[last]
    }

    /// Opens the account described by `builder` and adds it.
    ///
    /// # Errors
    ///
    /// Propagates [`AccountError::InvalidParameter`] from [`AccountBuilder::open`].
    pub fn open_account(&mut self, builder: AccountBuilder) -> Result<&mut Account, AccountError> {
        let builder = if builder.has_counter() {
            builder
        } else {
            builder.tracked_by(&self.counter)
        };
        let account = builder.open()?;
        Ok(self.add_account(account))
    }

    /// Retrieves the first account numbered `number`.
    ///
    /// Returns `None` if no such account exists.
    pub fn find_account(&self, number: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number() == number)
    }

    pub fn find_account_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.number() == number)
    }

    /// Removes the first account numbered `number` and returns it.
    pub fn remove_account(&mut self, number: &str) -> Option<Account> {
        let index = self
            .accounts
            .iter()
            .position(|account| account.number() == number)?;
        let account = self.accounts.remove(index);
        tracing::debug!(account = %account.number(), "account removed");
        Some(account)
    }

    /// Returns an iterator over all accounts in insertion order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// One report line per account, in insertion order.
    pub fn generate_report(&self) -> impl Iterator<Item = ReportLine> + '_ {
        self.accounts.iter().map(ReportLine::from)
    }
}

/// Snapshot of one account for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub account_number: AccountNumber,
    pub account_type: AccountType,
    pub balance: f64,
}

impl ReportLine {
    const DECIMAL_PRECISION: u32 = 4;
}

impl From<&Account> for ReportLine {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.number().clone(),
            account_type: account.account_type(),
            balance: account.balance(),
        }
    }
}

impl Serialize for ReportLine {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let balance = Decimal::from_f64(self.balance)
            .ok_or_else(|| S::Error::custom("balance is not representable as a decimal"))?
            .round_dp(ReportLine::DECIMAL_PRECISION);

        let mut state = serializer.serialize_struct("ReportLine", 3)?;
        state.serialize_field("account", &self.account_number)?;
        state.serialize_field("type", self.account_type.as_str())?;
        state.serialize_field("balance", &balance)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SavingsTerms;

    fn line(balance: f64) -> ReportLine {
        ReportLine {
            account_number: AccountNumber::from("SA001"),
            account_type: AccountType::Savings,
            balance,
        }
    }

    #[test]
    fn serializer_rounds_to_four_decimal_places() {
        let json = serde_json::to_string(&line(123.456789)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["account"], "SA001");
        assert_eq!(parsed["type"], "Savings");
        assert_eq!(parsed["balance"].as_str().unwrap(), "123.4568");
    }

    #[test]
    fn serializer_handles_negative_balances() {
        let json = serde_json::to_string(&line(-100.0)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["balance"].as_str().unwrap(), "-100");
    }

    #[test]
    fn serializer_rejects_non_finite_balance() {
        assert!(serde_json::to_string(&line(f64::NAN)).is_err());
    }

    #[test]
    fn serializer_precision_constant_is_four() {
        assert_eq!(ReportLine::DECIMAL_PRECISION, 4);
    }

    #[test]
    fn open_account_uses_registry_counter() {
        let mut bank = BankingSystem::new();
        bank.open_account(Account::savings("S", 10.0, SavingsTerms::new(0.0)))
            .unwrap();
        assert_eq!(bank.live_accounts(), 1);
        assert!(bank.accounts().all(Account::is_tracked));
    }

    #[test]
    fn open_account_keeps_foreign_counter() {
        let foreign = AccountCounter::new();
        let mut bank = BankingSystem::new();
        bank.open_account(Account::current("C", 0.0, 0.0).tracked_by(&foreign))
            .unwrap();
        assert_eq!(foreign.live(), 1);
        assert_eq!(bank.live_accounts(), 0);
    }
}
